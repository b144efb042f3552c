//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use crate::{Error, survey::SurveySource};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the survey responses are loaded from.
    pub survey_source: Arc<SurveySource>,
}

impl AppState {
    /// Create a new [AppState] and load the survey data.
    ///
    /// The survey data is read here so that a missing or malformed file is
    /// reported when the server starts rather than on the first page view.
    ///
    /// # Errors
    /// Returns an error if the survey data cannot be loaded.
    pub fn new(survey_source: SurveySource) -> Result<Self, Error> {
        survey_source.table()?;

        Ok(Self {
            survey_source: Arc::new(survey_source),
        })
    }
}
