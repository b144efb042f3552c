//! Loading the survey table from a CSV file.

use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use csv::{ReaderBuilder, Trim};

use crate::{Error, survey::SurveyTable};

/// Read the survey CSV file at `path` into a [SurveyTable].
///
/// The first line of the file must be the header row. Cells are trimmed of
/// surrounding whitespace.
///
/// # Errors
/// Returns [Error::DataFileAccess] if the file cannot be opened, or
/// [Error::InvalidCSV] if the contents are not valid CSV, e.g., a row has a
/// different number of cells to the header.
pub fn load_survey(path: &Path) -> Result<SurveyTable, Error> {
    let file = File::open(path).map_err(|error| {
        Error::DataFileAccess(path.display().to_string(), error.to_string())
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCSV(error.to_string()))?
        .iter()
        .map(str::to_owned)
        .collect();

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(str::to_owned).collect())
                .map_err(|error| Error::InvalidCSV(error.to_string()))
        })
        .collect::<Result<Vec<Vec<String>>, Error>>()?;

    Ok(SurveyTable::new(headers, rows))
}

/// A survey file that is read at most once per process.
///
/// The file is assumed not to change while the process is running, so the
/// loaded table is never invalidated.
#[derive(Debug)]
pub struct SurveySource {
    path: PathBuf,
    table: OnceLock<Arc<SurveyTable>>,
}

impl SurveySource {
    /// Create a source for the CSV file at `path`. The file is not read until
    /// [SurveySource::table] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
        }
    }

    /// The path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a source that has already been loaded with `table`.
    #[cfg(test)]
    pub(crate) fn with_table(table: SurveyTable) -> Self {
        Self {
            path: PathBuf::from("in-memory.csv"),
            table: OnceLock::from(Arc::new(table)),
        }
    }

    /// Get the survey table, reading the file on the first call only.
    ///
    /// Failed loads are not cached, the next call will try to read the file
    /// again.
    ///
    /// # Errors
    /// Returns the error from [load_survey] if the file has not been loaded
    /// yet and could not be read.
    pub fn table(&self) -> Result<Arc<SurveyTable>, Error> {
        if let Some(table) = self.table.get() {
            return Ok(table.clone());
        }

        let table = load_survey(&self.path)?;
        tracing::info!(
            "Loaded {} survey responses from {}",
            table.len(),
            self.path.display()
        );

        // Another thread may have won the race, in which case its table is kept.
        Ok(self.table.get_or_init(|| Arc::new(table)).clone())
    }
}
