//! Restricting the survey table to a selection of categorical values.

use std::collections::HashSet;

use crate::{
    Error,
    survey::{SurveyTable, columns},
};

/// Get the rows of `table` whose value in `column` is one of `accepted`.
///
/// Rows keep their original order and `table` is left untouched. An empty
/// `accepted` set gives an empty table.
///
/// # Errors
/// Returns [Error::MissingColumn] if `table` has no column called `column`.
pub fn filter_rows(
    table: &SurveyTable,
    column: &str,
    accepted: &HashSet<String>,
) -> Result<SurveyTable, Error> {
    let index = table.column_index(column)?;

    let rows = table
        .rows()
        .iter()
        .filter(|row| accepted.contains(&row[index]))
        .cloned()
        .collect();

    Ok(table.with_rows(rows))
}

/// Get the respondents from the `accepted` countries.
///
/// # Errors
/// Returns [Error::MissingColumn] if `table` has no country column.
pub fn filter_by_country(
    table: &SurveyTable,
    accepted: &HashSet<String>,
) -> Result<SurveyTable, Error> {
    filter_rows(table, columns::COUNTRY, accepted)
}
