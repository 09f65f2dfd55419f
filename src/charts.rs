//! Rendering of ECharts visualizations.
//!
//! Charts are built with `charming` and serialized to the JSON option object
//! that ECharts expects. Each chart gets an HTML container and a snippet of
//! JavaScript that initializes it once the page has loaded.

use charming::element::{AxisPointer, AxisPointerType, JsFunction, Tooltip, Trigger};
use maud::{Markup, PreEscaped, html};

use crate::html::HeadElement;

/// The script that provides the global `echarts` object.
pub const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for `charts`.
pub fn charts_view(charts: &[PageChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// The head elements that load ECharts and initialize `charts`.
///
/// The charts follow the browser's dark mode setting and resize with the window.
pub fn charts_head_elements(charts: &[PageChart]) -> Vec<HeadElement> {
    vec![
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(charts),
    ]
}

fn charts_script(charts: &[PageChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

#[inline]
pub fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
pub fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

/// Creates a tooltip configuration for percentages
pub fn percent_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(JsFunction::new_with_args("number", "return number + '%';"))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
