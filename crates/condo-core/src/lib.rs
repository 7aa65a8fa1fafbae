//! # condo-core
//!
//! The unit-record rules for condominium registration - THE LOGIC.
//!
//! An uploaded document is parsed elsewhere into rows; this crate turns those
//! rows into typed records, classifies each one, aggregates the results to
//! gate submission, and renders the reviewed list as CSV.
//!
//! ## Record Shapes
//!
//! Two shapes coexist and are never merged:
//! - `FlatUnit`: one contact set (name, tax id, mobile, landline, email)
//! - `ExpandedUnit`: type/profile plus owner and responsible-party contacts
//!
//! `UnitRecord` is the tagged variant over both; classification and export
//! are selected by tag.
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no clock
//! - Classification and export are total: they never fail
//! - Insertion order is preserved everywhere

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod classify;
pub mod export;
pub mod field;
pub mod ingest;
pub mod primitives;
pub mod record;
pub mod sample;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use record::{ExpandedUnit, FlatUnit, UnitRecord, headers};
pub use types::{CondoError, RecordId, Schema, Status};

// =============================================================================
// RE-EXPORTS: Operations
// =============================================================================

pub use aggregate::{StatusCounts, check_submission, count_by_status};
pub use classify::{Classify, classify};
pub use export::{CsvDownload, dated_filename, to_csv, to_csv_for};
pub use field::is_empty_field;
pub use ingest::{RawRow, check_limits, detect_list_schema, detect_schema, ingest_rows, read_csv};
pub use sample::sample_units;
pub use session::{Page, ReviewSession};
