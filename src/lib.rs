//! Survey Insights is a web dashboard for exploring the Workplace Mental Health
//! Survey.
//!
//! The survey responses are loaded once from a CSV file. Visitors can filter the
//! responses by country and the dashboard redraws a fixed set of descriptive
//! charts over the selected respondents.
//!
//! This library provides a REST API that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod internal_server_error;
mod not_found;
mod routing;
mod survey;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use routing::build_router;
pub use survey::{SurveySource, SurveyTable, load_survey};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The survey data file could not be opened or read.
    ///
    /// Callers should pass in the file path and the original error as a string.
    #[error("could not read survey data from \"{0}\": {1}")]
    DataFileAccess(String, String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// A column that is needed to draw a chart or filter the data is not in
    /// the survey data.
    #[error("the survey data has no column called \"{0}\"")]
    MissingColumn(String),

    /// A column that should only contain numbers has a cell that is not a
    /// number.
    ///
    /// `row` counts data rows from one and does not include the header row.
    #[error("expected a number in column \"{column}\" on row {row}, got \"{value}\"")]
    NonNumericValue {
        /// The name of the column.
        column: String,
        /// The data row, starting from one.
        row: usize,
        /// The cell that could not be parsed.
        value: String,
    },
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::MissingColumn(column) => InternalServerError {
                description: "Incomplete Survey Data",
                fix: &format!(
                    "The survey data does not have a \"{column}\" column. \
                    Check that the server was started with the right data file."
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingColumn(column) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Incomplete survey data",
                    &format!("The survey data does not have a \"{column}\" column."),
                ),
            )
                .into_response(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Something went wrong",
                        "An unexpected error occurred, check the server logs for more details.",
                    ),
                )
                    .into_response()
            }
        }
    }
}
