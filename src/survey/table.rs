//! The in-memory survey table.
//!
//! Cells are kept as the strings read from the CSV file. Columns are looked up
//! by name when they are used, so a missing column only fails the operation
//! that asks for it.

use std::collections::HashSet;

use crate::Error;

/// Whether `cell` holds no answer, i.e., it is blank or "NaN".
pub(crate) fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();

    cell.is_empty() || cell == "NaN"
}

/// A table of survey responses where each row is one respondent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurveyTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SurveyTable {
    /// Create a table from a header row and data rows.
    ///
    /// Each row is expected to have one cell per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Create a table with the same headers as `self` and the given `rows`.
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows,
        }
    }

    /// The column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The number of respondents in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no respondents.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows, or all rows if the table has fewer than `n`.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Get the position of the column called `name`.
    ///
    /// # Errors
    /// Returns [Error::MissingColumn] if there is no such column.
    pub fn column_index(&self, name: &str) -> Result<usize, Error> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| Error::MissingColumn(name.to_owned()))
    }

    /// Get every cell of the column called `name` in row order.
    ///
    /// Blank cells are kept so the result lines up with other columns of the
    /// same table, callers that count values skip them with [is_missing].
    ///
    /// # Errors
    /// Returns [Error::MissingColumn] if there is no such column.
    pub fn categorical_column(&self, name: &str) -> Result<Vec<&str>, Error> {
        let index = self.column_index(name)?;

        Ok(self.rows.iter().map(|row| row[index].as_str()).collect())
    }

    /// Get the column called `name` as numbers.
    ///
    /// Empty and "NaN" cells are treated as missing values and skipped.
    ///
    /// # Errors
    /// Returns [Error::MissingColumn] if there is no such column, or
    /// [Error::NonNumericValue] if a non-empty cell is not a number.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, Error> {
        let index = self.column_index(name)?;
        let mut values = Vec::with_capacity(self.rows.len());

        for (row_number, row) in self.rows.iter().enumerate() {
            let cell = row[index].trim();

            if is_missing(cell) {
                continue;
            }

            let value = cell.parse::<f64>().map_err(|_| Error::NonNumericValue {
                column: name.to_owned(),
                row: row_number + 1,
                value: cell.to_owned(),
            })?;

            // Spellings such as "nan" also parse to NaN.
            if value.is_nan() {
                continue;
            }

            values.push(value);
        }

        Ok(values)
    }

    /// Get the distinct values of the column called `name` in the order they
    /// first appear. Blank and "NaN" cells are not values and are left out.
    ///
    /// # Errors
    /// Returns [Error::MissingColumn] if there is no such column.
    pub fn distinct_values(&self, name: &str) -> Result<Vec<String>, Error> {
        let column = self.categorical_column(name)?;
        let mut seen = HashSet::new();

        Ok(column
            .into_iter()
            .filter(|value| !is_missing(value) && seen.insert(*value))
            .map(str::to_owned)
            .collect())
    }
}
