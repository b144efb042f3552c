//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for the survey data:
//! - **Grouped Count Chart**: Bars for each pair of two categorical columns
//! - **Category Count Chart**: Bars for one categorical column, most frequent first
//! - **Histogram Chart**: Binned counts of a numeric column with a density curve
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle,
        Symbol, Tooltip, Trigger,
    },
    series::{Line, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::survey::{CategoryCount, GroupedCounts, Histogram};

/// A dashboard chart with its HTML container ID and ECharts configuration.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl DashboardChart {
    pub(super) fn new(id: &'static str, chart: Chart) -> Self {
        Self {
            id,
            options: chart.to_string(),
        }
    }
}

/// Renders the HTML container for a single chart.
pub(super) fn chart_container(chart: &DashboardChart) -> Markup {
    html!(
        div
            id=(chart.id)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}
    )
}

/// Sets up the registry of live chart instances the first time it runs.
///
/// One resize listener and one colour scheme listener serve every chart, so
/// redrawing the charts adds no listeners.
const CHART_REGISTRY_SCRIPT: &str = r#"
if (!window.surveyCharts) {
    window.surveyCharts = new Map();
    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
    window.surveyChartTheme = () => darkModeMediaQuery.matches ? 'dark' : 'default';

    window.addEventListener('resize', () => {
        window.surveyCharts.forEach((chart) => chart.resize());
    });
    darkModeMediaQuery.addEventListener('change', () => {
        window.surveyCharts.forEach((chart) => chart.setTheme(window.surveyChartTheme()));
    });
}

window.surveyCharts.forEach((chart) => chart.dispose());
window.surveyCharts.clear();
"#;

/// Generates JavaScript initialization code for dashboard charts.
///
/// The charts drawn by an earlier run are disposed before the new ones are
/// created. The script is placed after the chart containers rather than in
/// the page head so that it runs again when HTMX swaps in new dashboard
/// content.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// A script element containing the initialization JavaScript.
pub(super) fn charts_script(charts: &[&DashboardChart]) -> Markup {
    let chart_scripts = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chart = echarts.init(document.getElementById("{}"));
                    chart.setOption({});
                    chart.setTheme(window.surveyChartTheme());
                    window.surveyCharts.set("{}", chart);
                }})();"#,
                chart.id,
                escape_for_script(&chart.options),
                chart.id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(CHART_REGISTRY_SCRIPT)) (PreEscaped(chart_scripts)) })
}

/// Category labels come from the data file. Writing `<` as a JSON escape keeps
/// them from closing the script element or opening an HTML comment.
fn escape_for_script(options: &str) -> String {
    options.replace('<', "\\u003c")
}

/// Bar chart of `counts` with one bar per category and one series per group.
pub(super) fn grouped_count_chart(title: &str, counts: &GroupedCounts) -> Chart {
    let mut chart = Chart::new()
        .title(Title::new().text(title).left(20).top("1%"))
        .tooltip(count_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(counts.categories.clone())
                .axis_label(AxisLabel::new().rotate(30)),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Count"));

    for (group, group_counts) in &counts.groups {
        chart = chart.series(
            bar::Bar::new()
                .name(group.as_str())
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(to_chart_counts(group_counts)),
        );
    }

    chart
}

/// Bar chart of `counts` with categories in the order given.
pub(super) fn category_count_chart(title: &str, counts: &[CategoryCount]) -> Chart {
    let labels: Vec<String> = counts.iter().map(|count| count.category.clone()).collect();
    let values: Vec<usize> = counts.iter().map(|count| count.count).collect();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(count_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value).name("Count"))
        .series(bar::Bar::new().name("Count").data(to_chart_counts(&values)))
}

/// Bar chart of the bins in `histogram` with a smoothed density curve on top.
///
/// The density curve is left out if it could not be estimated, e.g., when
/// there are fewer than two values.
pub(super) fn histogram_chart(title: &str, histogram: &Histogram, colour: &str) -> Chart {
    let labels: Vec<String> = histogram
        .bin_edges()
        .into_iter()
        .map(|(left, right)| format!("{left:.1}-{right:.1}"))
        .collect();

    let chart = Chart::new()
        .title(Title::new().text(title))
        .tooltip(count_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value).name("Count"))
        .series(
            bar::Bar::new()
                .name("Count")
                .item_style(ItemStyle::new().color(colour))
                .data(to_chart_counts(&histogram.counts)),
        );

    match histogram.density_overlay() {
        Some(density) => chart.series(
            Line::new()
                .name("Density")
                .smooth(0.5)
                .symbol(Symbol::None)
                .item_style(ItemStyle::new().color(colour))
                .data(round_for_display(&density)),
        ),
        None => chart,
    }
}

/// ECharts takes numbers, the counts will never be large enough to overflow.
fn to_chart_counts(counts: &[usize]) -> Vec<i64> {
    counts.iter().map(|count| *count as i64).collect()
}

/// Keep the JSON small and the tooltips readable.
fn round_for_display(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|value| (value * 100.0).round() / 100.0)
        .collect()
}

/// Creates a tooltip configuration for count values
fn count_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
