//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and updating the country filter
//! - The page layout that combines the dashboard views
//! - State and form types used by the handlers

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        panels::PANEL_SECTIONS,
        views::{
            DASHBOARD_CONTENT_ID, PanelView, SectionView, country_filter_view, footer_view,
            header_view, overview_view, panel_sections_view, raw_data_preview,
        },
    },
    html::{ECHARTS_SCRIPT, HeadElement, PAGE_CONTAINER_STYLE, base},
    survey::{SurveySource, SurveyTable, columns, filter_by_country},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Where the survey responses are loaded from.
    pub survey_source: Arc<SurveySource>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            survey_source: state.survey_source.clone(),
        }
    }
}

/// Form data for updating the countries shown on the dashboard.
#[derive(Debug, Deserialize)]
pub struct CountryFilterForm {
    /// The selected countries. Empty when every checkbox is cleared.
    #[serde(default)]
    pub countries: Vec<String>,
}

/// Holds all the data needed to render the dashboard content.
struct DashboardData {
    response_count: usize,
    countries_represented: usize,
    sections: Vec<SectionView>,
}

/// Display the dashboard with every country selected.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let table = state.survey_source.table()?;

    let countries = table
        .distinct_values(columns::COUNTRY)
        .inspect_err(|error| tracing::error!("could not get countries: {error}"))?;
    let selected: HashSet<String> = countries.iter().cloned().collect();

    let data = build_dashboard_data(&table, &selected)?;

    Ok(dashboard_view(&table, &countries, &selected, &data).into_response())
}

/// API endpoint to update the selected countries and return the redrawn dashboard content.
pub async fn update_country_filter(
    State(state): State<DashboardState>,
    Form(form): Form<CountryFilterForm>,
) -> Response {
    let table = match state.survey_source.table() {
        Ok(table) => table,
        Err(error) => {
            tracing::error!("could not load survey data: {error}");
            return error.into_alert_response();
        }
    };

    let selected: HashSet<String> = form.countries.into_iter().collect();
    tracing::debug!("Filtering survey responses by {} countries", selected.len());

    match build_dashboard_data(&table, &selected) {
        Ok(data) => dashboard_content(&data).into_response(),
        Err(error) => {
            tracing::error!("Failed to build dashboard data: {error}");
            error.into_alert_response()
        }
    }
}

/// Filters the survey and builds every panel for the filtered responses.
///
/// A panel that fails keeps its error so it can be shown in place of the chart,
/// the remaining panels are unaffected.
///
/// # Errors
/// Returns an error if the survey table has no country column.
fn build_dashboard_data(
    table: &SurveyTable,
    selected: &HashSet<String>,
) -> Result<DashboardData, Error> {
    let filtered = filter_by_country(table, selected)?;
    let countries_represented = filtered.distinct_values(columns::COUNTRY)?.len();

    let sections = PANEL_SECTIONS
        .iter()
        .map(|section| {
            let panels = section
                .panels
                .iter()
                .map(|panel| PanelView {
                    panel: *panel,
                    chart: panel.build_chart(&filtered).inspect_err(|error| {
                        tracing::error!("Could not build the {} chart: {error}", panel.id)
                    }),
                })
                .collect();

            SectionView::new(section, panels)
        })
        .collect();

    Ok(DashboardData {
        response_count: filtered.len(),
        countries_represented,
        sections,
    })
}

/// Renders the main dashboard page with the filter sidebar, raw data preview and charts.
fn dashboard_view(
    table: &SurveyTable,
    countries: &[String],
    selected: &HashSet<String>,
    data: &DashboardData,
) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-2xl"
            {
                (header_view())

                div class="flex flex-col lg:flex-row gap-6"
                {
                    (country_filter_view(countries, selected))

                    main class="flex-1 min-w-0"
                    {
                        (raw_data_preview(table))

                        div id=(DASHBOARD_CONTENT_ID)
                        {
                            (dashboard_content(data))
                        }
                    }
                }

                (footer_view())
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    base("Dashboard", &scripts, &content)
}

/// Renders the dashboard content (summary and charts) that is redrawn when the
/// country selection changes.
fn dashboard_content(data: &DashboardData) -> Markup {
    html!(
        (overview_view(data.response_count, data.countries_represented))
        (panel_sections_view(&data.sections))
    )
}
