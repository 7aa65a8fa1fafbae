//! # Ingestion
//!
//! Turns the untyped rows produced by the document parser (or read from an
//! uploaded CSV file) into typed unit records.
//!
//! - The list's schema is detected from its column names
//! - Ids are assigned by position (`"1"`, `"2"`, ...), overriding any id
//!   the parser sent
//! - Unknown columns are ignored
//! - Oversized input is rejected

use crate::primitives::{MAX_FIELD_LENGTH, MAX_RECORDS};
use crate::{CondoError, ExpandedUnit, FlatUnit, RecordId, Schema, UnitRecord, headers};
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;

/// One parsed row: column name to optional text.
pub type RawRow = BTreeMap<String, Option<String>>;

/// Column names that only exist in the expanded schema.
const EXPANDED_ONLY: [&str; 2] = ["Tipo", "Perfil"];
const EXPANDED_PREFIXES: [&str; 2] = ["Proprietario_", "Responsavel_"];

fn is_expanded_column(column: &str) -> bool {
    EXPANDED_ONLY.contains(&column) || EXPANDED_PREFIXES.iter().any(|p| column.starts_with(p))
}

/// Schema of a single row, judged by its column names.
#[must_use]
pub fn detect_schema(row: &RawRow) -> Schema {
    if row.keys().any(|k| is_expanded_column(k)) {
        Schema::Expanded
    } else {
        Schema::Flat
    }
}

/// Schema of a row list: expanded if any row has an expanded-only column.
#[must_use]
pub fn detect_list_schema(rows: &[RawRow]) -> Schema {
    if rows.iter().any(|r| detect_schema(r) == Schema::Expanded) {
        Schema::Expanded
    } else {
        Schema::Flat
    }
}

/// Convert parsed rows into unit records.
///
/// # Errors
/// - `CondoError::TooManyRecords` if more than `MAX_RECORDS` rows are given
/// - `CondoError::FieldTooLong` if a value exceeds `MAX_FIELD_LENGTH` bytes
pub fn ingest_rows(rows: &[RawRow]) -> Result<Vec<UnitRecord>, CondoError> {
    if rows.len() > MAX_RECORDS {
        return Err(CondoError::TooManyRecords(rows.len()));
    }

    let schema = detect_list_schema(rows);
    rows.iter()
        .enumerate()
        .map(|(index, row)| ingest_row(schema, RecordId::positional(index), row))
        .collect()
}

/// Apply the ingestion limits to records that arrive already typed.
///
/// # Errors
/// Same as [`ingest_rows`]: `TooManyRecords` or `FieldTooLong`.
pub fn check_limits(records: &[UnitRecord]) -> Result<(), CondoError> {
    if records.len() > MAX_RECORDS {
        return Err(CondoError::TooManyRecords(records.len()));
    }

    for record in records {
        for (column, value) in headers(record.schema()).iter().zip(record.columns()) {
            let len = value.map_or(0, str::len);
            if len > MAX_FIELD_LENGTH {
                return Err(CondoError::FieldTooLong {
                    field: (*column).to_string(),
                    len,
                });
            }
        }
    }
    Ok(())
}

fn ingest_row(schema: Schema, id: RecordId, row: &RawRow) -> Result<UnitRecord, CondoError> {
    let mut record: UnitRecord = match schema {
        Schema::Flat => FlatUnit::new(id).into(),
        Schema::Expanded => ExpandedUnit::new(id).into(),
    };

    for (column, value) in row {
        let Some(value) = value else {
            continue;
        };
        if value.len() > MAX_FIELD_LENGTH {
            return Err(CondoError::FieldTooLong {
                field: column.clone(),
                len: value.len(),
            });
        }
        match record.set_field(column, value.as_str()) {
            Ok(()) | Err(CondoError::UnknownField { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(record)
}

/// Read a CSV document (header row + records) into raw rows.
///
/// Values are trimmed; short rows leave their trailing columns missing.
///
/// # Errors
/// Returns `CondoError::ParseError` if the document is not valid CSV.
pub fn read_csv(text: &str) -> Result<Vec<RawRow>, CondoError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CondoError::ParseError(format!("Failed to read CSV headers: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            CondoError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
        })?;
        if rows.len() >= MAX_RECORDS {
            return Err(CondoError::TooManyRecords(rows.len() + 1));
        }
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), Some(v.to_string())))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

// =============================================================================
// TESTS
// =============================================================================
