//! Alerts for displaying error messages to users.
//!
//! Alerts are swapped into the page's `#alert-container` by HTMX when a request
//! made from the page fails.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

const ERROR_ALERT_STYLE: &str = "flex items-start p-4 mb-4 text-red-800 border \
    border-red-300 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800 shadow-lg";

/// An error message with a short summary and optional details.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                class=(ERROR_ALERT_STYLE)
            {
                div class="text-sm"
                {
                    span class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }
            }
        }
    }
}

impl IntoResponse for Alert<'_> {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
