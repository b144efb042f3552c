//! HTML views for the parts of the dashboard page.

use std::collections::HashSet;

use maud::{Markup, html};

use crate::{
    Error,
    dashboard::{
        charts::{DashboardChart, chart_container, charts_script},
        panels::{Panel, PanelSection},
    },
    endpoints,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_count},
    survey::SurveyTable,
};

/// The number of rows shown in the raw data preview.
pub(super) const PREVIEW_ROW_COUNT: usize = 5;

/// The id of the element that is replaced when the country filter changes.
pub(super) const DASHBOARD_CONTENT_ID: &str = "dashboard-content";

/// A panel paired with its chart, or the reason the chart could not be built.
pub(super) struct PanelView {
    pub panel: Panel,
    pub chart: Result<DashboardChart, Error>,
}

/// The panels of one [PanelSection] after rendering.
pub(super) struct SectionView {
    pub heading: Option<&'static str>,
    pub panels: Vec<PanelView>,
}

impl SectionView {
    pub(super) fn new(section: &PanelSection, panels: Vec<PanelView>) -> Self {
        Self {
            heading: section.heading,
            panels,
        }
    }
}

/// The page title and a short description of the survey.
pub(super) fn header_view() -> Markup {
    html! {
        header class="w-full mb-6"
        {
            h1 class="text-3xl font-bold mb-2"
            {
                "Mental Health in the Workplace - Survey Insights"
            }

            p class="text-gray-600 dark:text-gray-400"
            {
                "An overview of insights from the Workplace Mental Health Survey with interactive EDA."
            }
        }
    }
}

/// A collapsible table with the first few rows of the survey data.
pub(super) fn raw_data_preview(table: &SurveyTable) -> Markup {
    html! {
        details id="raw-data" class="w-full mb-6 bg-white dark:bg-gray-800 rounded-lg shadow"
        {
            summary class="cursor-pointer px-4 py-3 font-semibold" { "View Raw Data" }

            div class="overflow-x-auto"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            @for header in table.headers() {
                                th scope="col" class=(TABLE_CELL_STYLE) { (header) }
                            }
                        }
                    }

                    tbody
                    {
                        @for row in table.head(PREVIEW_ROW_COUNT) {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                @for cell in row {
                                    td class=(TABLE_CELL_STYLE) { (cell) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The sidebar with the country selection.
///
/// Every change to the selection posts the checked countries and replaces the
/// dashboard content with the response.
pub(super) fn country_filter_view(countries: &[String], selected: &HashSet<String>) -> Markup {
    html! {
        aside class="w-full lg:w-64 lg:shrink-0 mb-6 lg:mb-0"
        {
            h2 class="text-xl font-semibold mb-4" { "Filters" }

            form
                id="country-filter"
                hx-post=(endpoints::DASHBOARD_COUNTRY_FILTER)
                hx-target={ "#" (DASHBOARD_CONTENT_ID) }
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                hx-trigger="change"
                class="bg-white dark:bg-gray-800 p-4 rounded-lg shadow"
            {
                fieldset
                {
                    legend class="text-sm font-medium mb-3" { "Select Country" }

                    div class="flex flex-col gap-2 max-h-96 overflow-y-auto"
                    {
                        @for country in countries {
                            label class="flex items-center space-x-2"
                            {
                                input
                                    type="checkbox"
                                    name="countries"
                                    value=(country)
                                    checked[selected.contains(country)]
                                    class="rounded-sm border-gray-300
                                        text-blue-600 shadow-xs
                                        focus:border-blue-300 focus:ring-3
                                        focus:ring-blue-200/50"
                                ;

                                span
                                    class="inline-flex items-center
                                        px-2.5 py-0.5
                                        text-xs font-semibold text-blue-800
                                        bg-blue-100 rounded-full
                                        dark:bg-blue-900 dark:text-blue-300"
                                {
                                    (country)
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The response and country counts for the current selection.
pub(super) fn overview_view(response_count: usize, countries_represented: usize) -> Markup {
    html! {
        section id="overview" class="w-full mb-6"
        {
            h2 class="text-xl font-semibold mb-4" { "Dataset Overview" }

            dl class="grid grid-cols-1 sm:grid-cols-2 gap-4"
            {
                div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
                {
                    dt class="text-sm text-gray-600 dark:text-gray-400" { "Number of responses" }
                    dd id="response-count" class="text-3xl font-bold" { (format_count(response_count)) }
                }

                div class="bg-white dark:bg-gray-800 rounded-lg shadow p-4"
                {
                    dt class="text-sm text-gray-600 dark:text-gray-400" { "Countries represented" }
                    dd id="countries-represented" class="text-3xl font-bold" { (format_count(countries_represented)) }
                }
            }
        }
    }
}

/// Renders each section as a two-column grid of panels, followed by the script
/// that draws the charts.
pub(super) fn panel_sections_view(sections: &[SectionView]) -> Markup {
    let charts: Vec<&DashboardChart> = sections
        .iter()
        .flat_map(|section| section.panels.iter())
        .filter_map(|panel| panel.chart.as_ref().ok())
        .collect();

    html! {
        @for section in sections {
            section class="w-full mx-auto mb-4"
            {
                @if let Some(heading) = section.heading {
                    h2 class="text-xl font-semibold mb-4" { (heading) }
                }

                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for panel in &section.panels {
                        (panel_view(panel))
                    }
                }
            }
        }

        (charts_script(&charts))
    }
}

fn panel_view(panel: &PanelView) -> Markup {
    match &panel.chart {
        Ok(chart) => chart_container(chart),
        Err(error) => panel_error_view(panel.panel.id, panel.panel.title, error),
    }
}

/// Shown in place of a chart that could not be built.
fn panel_error_view(id: &str, title: &str, error: &Error) -> Markup {
    html! {
        div
            id=(id)
            role="alert"
            class="min-h-[380px] rounded-lg border border-red-300 bg-red-50
                dark:bg-gray-800 dark:border-red-800 p-4 text-red-800
                dark:text-red-400"
        {
            h3 class="text-lg font-semibold mb-2" { (title) }
            p { "This chart could not be drawn: " (error.to_string()) "." }
        }
    }
}

pub(super) fn footer_view() -> Markup {
    html! {
        footer class="w-full mt-8 pt-4 border-t border-gray-200 dark:border-gray-700"
        {
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Developed using Rust | Data Source: Workplace Mental Health Survey"
            }
        }
    }
}
