//! Dashboard module
//!
//! Provides the survey insights page: a country filter, a summary of the
//! selected responses and a fixed set of charts.

mod charts;
mod handlers;
mod panels;
mod views;

pub use handlers::{get_dashboard_page, update_country_filter};
