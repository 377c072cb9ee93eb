//! Line encoding: CSV for export, JSONL for bulk submission.

use thiserror::Error;

use crate::flatten::{FIXED_COLUMNS, FlatRecord, dynamic_columns};
use crate::types::MutationUnit;

/// Errors from the line encoder.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying CSV writer or parser failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row was missing a column the rest of the batch carries.
    ///
    /// Flatten output is always rectangular; hitting this means the batch
    /// was assembled by hand and skipped the union-backfill step.
    #[error("ragged batch: row {row} is missing column {column:?}")]
    RaggedBatch { row: usize, column: String },

    /// The encoded output was not valid UTF-8.
    #[error("encoded output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A mutation unit could not be serialized.
    #[error("jsonl serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a rectangular batch as CSV text.
///
/// Comma delimiter, CRLF row terminator, double quotes only where the
/// content requires them, header row first. Column order is the fixed
/// columns followed by the dynamic union in first-seen order. Rows whose
/// cells are all empty are still written - row count mirrors the batch.
///
/// An empty batch produces empty text: with no records there is no column
/// union to name a header row from.
///
/// # Errors
///
/// Returns [`EncodeError::RaggedBatch`] when a row lacks one of the batch
/// columns, or [`EncodeError::Csv`] when the writer fails.
pub fn to_csv(rows: &[FlatRecord]) -> Result<String, EncodeError> {
    if rows.is_empty() {
        return Ok(String::new());
    }

    let columns = column_order(rows);
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(&columns)?;
    for (index, row) in rows.iter().enumerate() {
        let record = columns
            .iter()
            .map(|column| {
                row.get(column)
                    .map(String::as_str)
                    .ok_or_else(|| EncodeError::RaggedBatch {
                        row: index,
                        column: column.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EncodeError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Fixed columns (those present) first, then the dynamic union.
fn column_order(rows: &[FlatRecord]) -> Vec<String> {
    let mut columns: Vec<String> = FIXED_COLUMNS
        .iter()
        .filter(|fixed| rows.iter().any(|row| row.contains_key(**fixed)))
        .map(ToString::to_string)
        .collect();
    columns.extend(dynamic_columns(rows));
    columns
}

/// Parse headered CSV text into rows.
///
/// Thin wrapper over the `csv` reader; a structural failure (ragged line,
/// broken quoting) surfaces verbatim as the parser's own error.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] when the text cannot be parsed.
pub fn parse_csv(text: &str) -> Result<Vec<FlatRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = FlatRecord::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.insert(header.to_string(), value.to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

/// A JSONL payload plus the line count the caller must validate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Jsonl {
    pub body: String,
    pub line_count: usize,
}

impl Jsonl {
    /// True when no mutation units were encoded.
    ///
    /// Callers must treat an empty payload as "no metafields found" and
    /// reject it before submission.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}

/// Encode mutation units as newline-delimited JSON, one unit per line.
///
/// No trailing newline; the line count always equals the number of units.
///
/// # Errors
///
/// Returns [`EncodeError::Json`] when serialization fails.
pub fn to_jsonl(units: &[MutationUnit]) -> Result<Jsonl, EncodeError> {
    let lines = units
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Jsonl {
        body: lines.join("\n"),
        line_count: lines.len(),
    })
}
