//! The stacked bar chart of recurring vs. one-off spending for each month of a year.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::bar::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    calendar::short_month_name,
    expense::aggregation::YearSummary,
    html::HeadElement,
};

/// The HTML element ID of the chart container.
pub(super) const YEAR_CHART_ID: &str = "year-chart";

const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

pub(super) fn year_chart(summary: &YearSummary) -> Chart {
    let labels: Vec<String> = summary
        .months
        .iter()
        .map(|totals| short_month_name(totals.month).to_owned())
        .collect();
    let defaults: Vec<f64> = summary
        .months
        .iter()
        .map(|totals| totals.defaults_total.as_f64())
        .collect();
    let specifics: Vec<f64> = summary
        .months
        .iter()
        .map(|totals| totals.specifics_total.as_f64())
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text(format!("Expenses in {}", summary.year))
                .subtext("Recurring and one-off spending per month")
                .left(20)
                .top("1%"),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter())
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().right(20).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Default")
                .stack("Expenses")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(defaults),
        )
        .series(
            Bar::new()
                .name("Specific")
                .stack("Expenses")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(specifics),
        )
}

/// The empty container the chart is drawn into.
pub(super) fn year_chart_container() -> Markup {
    html!(
        div
            id=(YEAR_CHART_ID)
            class="w-full min-h-[380px] rounded dark:bg-slate-100"
        {}
    )
}

/// The ECharts library and the script that draws `chart` once the page loads.
pub(super) fn year_chart_scripts(chart: &Chart) -> [HeadElement; 2] {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{YEAR_CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {chart};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(script)),
    ]
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
