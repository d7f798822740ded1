//! CSV export support.
//!
//! Rows are written with the `csv` crate so commas, quotes and newlines in
//! free text are quoted correctly. Text cells that a spreadsheet would
//! evaluate as a formula (leading `=`, `+`, `-` or `@`) are prefixed with a
//! single quote.

use serde::{Deserialize, Serialize};

use super::error::ServiceError;

/// A generated CSV document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    pub row_count: usize,
}

/// Neutralize spreadsheet formula prefixes in a free-text cell
pub fn text_cell(value: &str) -> String {
    match value.chars().next() {
        Some('=' | '+' | '-' | '@') => format!("'{}", value),
        _ => value.to_string(),
    }
}

pub fn optional_cell(value: &Option<String>) -> String {
    value.as_deref().map(text_cell).unwrap_or_default()
}

pub fn amount_cell(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Write `header` followed by `rows` into a CSV document
pub fn write_csv<I>(file_name: impl Into<String>, header: &[&str], rows: I) -> Result<CsvExport, ServiceError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;

    let mut row_count = 0;
    for row in rows {
        writer.write_record(&row)?;
        row_count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ServiceError::Storage(format!("CSV export failed: {}", e)))?;
    let content = String::from_utf8(bytes)
        .map_err(|e| ServiceError::Storage(format!("CSV export is not UTF-8: {}", e)))?;

    Ok(CsvExport {
        file_name: file_name.into(),
        content,
        row_count,
    })
}
