//! # CSV Export
//!
//! Serializes a record list into the CSV artifact handed to the user.
//!
//! ## Format
//!
//! - First line: the schema's column headers, comma-joined, unquoted.
//! - One line per record: every field wrapped in double quotes, missing
//!   fields rendered as `""`.
//! - Lines joined with `\n`, no trailing newline.
//! - An embedded `"` is doubled (`"` becomes `""`).
//!
//! Output depends only on the input: the same list always produces the same
//! bytes.

use crate::primitives::{CSV_CONTENT_TYPE, CSV_FILENAME_STEM, DEFAULT_CSV_FILENAME};
use crate::record::headers;
use crate::{Schema, UnitRecord};

/// Schema of a record list: that of its first record, flat when empty.
#[must_use]
pub fn list_schema(records: &[UnitRecord]) -> Schema {
    records.first().map_or(Schema::Flat, UnitRecord::schema)
}

/// Render a record list as CSV, taking the header from the list itself.
#[must_use]
pub fn to_csv(records: &[UnitRecord]) -> String {
    to_csv_for(list_schema(records), records)
}

/// Render a record list as CSV under an explicit header schema.
///
/// Each row is rendered with its own columns; callers keep lists
/// homogeneous (see `ReviewSession`).
#[must_use]
pub fn to_csv_for(schema: Schema, records: &[UnitRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers(schema).join(","));
    lines.extend(records.iter().map(csv_row));
    lines.join("\n")
}

/// Render one record as a CSV line.
#[must_use]
pub fn csv_row(record: &UnitRecord) -> String {
    record
        .columns()
        .into_iter()
        .map(|field| quote(field.unwrap_or("")))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// File name for an export made on the given ISO date (`YYYY-MM-DD`).
#[must_use]
pub fn dated_filename(iso_date: &str) -> String {
    format!("{}_{}.csv", CSV_FILENAME_STEM, iso_date)
}

// =============================================================================
// DOWNLOAD ARTIFACT
// =============================================================================

/// A ready-to-save CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl CsvDownload {
    /// Build the artifact for a record list.
    #[must_use]
    pub fn new(records: &[UnitRecord], filename: Option<&str>) -> Self {
        Self::from_text(to_csv(records), filename)
    }

    /// Wrap already-rendered CSV text.
    #[must_use]
    pub fn from_text(csv: String, filename: Option<&str>) -> Self {
        Self {
            filename: filename.unwrap_or(DEFAULT_CSV_FILENAME).to_string(),
            content_type: CSV_CONTENT_TYPE,
            body: csv.into_bytes(),
        }
    }

    /// `Content-Disposition` value that triggers a file save.
    #[must_use]
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename.replace('"', ""))
    }
}

// =============================================================================
// TESTS
// =============================================================================
