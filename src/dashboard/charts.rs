//! The onboarding progress chart on the dashboard.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType, JsFunction},
    series::Bar,
};

use crate::{charts::percent_tooltip, progress::Program};

/// A bar chart of the average completion of each program.
pub(super) fn program_progress_chart(averages: &[(Program, u32)]) -> Chart {
    let labels = averages
        .iter()
        .map(|(program, _)| program.label().to_owned())
        .collect::<Vec<_>>();
    let values = averages
        .iter()
        .map(|(_, average)| f64::from(*average))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Onboarding Progress"))
        .tooltip(percent_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(
                    AxisLabel::new()
                        .formatter(JsFunction::new_with_args("number", "return number + '%';")),
                ),
        )
        .series(Bar::new().name("Average completion").data(values))
}
