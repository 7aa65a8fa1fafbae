//! # Core Type Definitions
//!
//! Identifiers, status values and the error type shared by every module:
//! - Record identity (`RecordId`)
//! - Record shape tag (`Schema`)
//! - Row classification result (`Status`)
//! - Error types (`CondoError`)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIER
// =============================================================================

/// Opaque identifier of a unit record.
///
/// Unique within a record list and stable for the lifetime of the record.
/// It is the only key used for update-in-place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Create a new record id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Id assigned to the row at `index` by the upload workflow (1-based).
    #[must_use]
    pub fn positional(index: usize) -> Self {
        Self((index + 1).to_string())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// =============================================================================
// SCHEMA
// =============================================================================

/// The two record shapes observed in uploaded documents.
///
/// They are never merged: each has its own columns, its own completeness
/// policy and its own CSV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// Single contact set: name, tax id, mobile, landline, email.
    Flat,
    /// Type/profile plus owner and responsible-party contact sets.
    Expanded,
}

impl Schema {
    /// Lowercase name, as used in the `schema` tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Schema::Flat => "flat",
            Schema::Expanded => "expanded",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Completeness status of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// A required identifying field is missing.
    Critical,
    /// Required fields present, contact channels insufficient.
    Incomplete,
    /// Required fields and the minimum contact channels present.
    Complete,
}

impl Status {
    /// Lowercase status name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::Incomplete => "incomplete",
            Status::Complete => "complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the record list.
///
/// Classification and CSV generation never produce these; they come from
/// ingestion, the review session and the submission check.
#[derive(Debug, Error)]
pub enum CondoError {
    /// No record with this id exists in the list.
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// Two records share the same id.
    #[error("Duplicate record id: {0}")]
    DuplicateId(RecordId),

    /// A record of one schema was placed in a list of the other.
    #[error("Schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: Schema, found: Schema },

    /// The column does not exist in this schema.
    #[error("Unknown field '{field}' for {schema} schema")]
    UnknownField { schema: Schema, field: String },

    /// A draft operation was attempted with no edit in progress.
    #[error("No edit in progress")]
    NoEditInProgress,

    /// Submission of an empty record list.
    #[error("No units to register")]
    EmptySubmission,

    /// Submission blocked by rows missing required fields.
    #[error("{0} critical row(s) block submission")]
    CriticalRows(usize),

    /// The row list exceeds the ingestion limit.
    #[error("Too many records: {0}")]
    TooManyRecords(usize),

    /// A single field value exceeds the ingestion limit.
    #[error("Field '{field}' is {len} bytes long")]
    FieldTooLong { field: String, len: usize },

    /// Malformed input document.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_ids_are_one_based() {
        assert_eq!(RecordId::positional(0).as_str(), "1");
        assert_eq!(RecordId::positional(41).as_str(), "42");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Incomplete).expect("serialize");
        assert_eq!(json, "\"incomplete\"");
    }

    #[test]
    fn status_ordering_puts_critical_first() {
        let mut statuses = vec![Status::Complete, Status::Critical, Status::Incomplete];
        statuses.sort();
        assert_eq!(
            statuses,
            vec![Status::Critical, Status::Incomplete, Status::Complete]
        );
    }

    #[test]
    fn record_id_is_transparent_in_json() {
        let json = serde_json::to_string(&RecordId::new("7")).expect("serialize");
        assert_eq!(json, "\"7\"");
    }
}
