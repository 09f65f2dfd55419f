//! The rent collection chart shown on the history tab.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType},
    series::Bar,
};

use crate::{charts::currency_formatter, charts::currency_tooltip, html::to_display_f64};

use super::ledger::MonthlyCollection;

/// A bar chart of the rent collected in each month, oldest first.
pub(super) fn collection_chart(summary: &[MonthlyCollection]) -> Chart {
    let labels = summary
        .iter()
        .map(|collection| collection.month.to_string())
        .collect::<Vec<_>>();
    let collected = summary
        .iter()
        .map(|collection| to_display_f64(collection.collected))
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text("Rent Collected")
                .subtext(format!("Last {} months", summary.len())),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().right("4%"))
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
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Collected").data(collected))
}
