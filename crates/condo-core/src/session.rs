//! # Review Session
//!
//! The record list under review, together with the state the review view
//! needs: the draft of the row being edited and the page size.
//!
//! - Created once per upload, discarded when the review ends
//! - Ids are unique and every record has the same schema
//! - Edits are made on a draft copy and committed by id, in place
//! - Insertion order is preserved for display and export

use crate::aggregate::{StatusCounts, check_submission, count_by_status};
use crate::classify::Classify;
use crate::export::{list_schema, to_csv_for};
use crate::primitives::PAGE_SIZE;
use crate::{CondoError, RecordId, Schema, Status, UnitRecord};
use std::collections::BTreeSet;

/// A record list being reviewed before submission.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    records: Vec<UnitRecord>,
    schema: Schema,
    draft: Option<UnitRecord>,
    page_size: usize,
}

impl ReviewSession {
    /// Start a review with the default page size.
    ///
    /// # Errors
    /// - `CondoError::DuplicateId` if two records share an id
    /// - `CondoError::SchemaMismatch` if the records mix schemas
    pub fn new(records: Vec<UnitRecord>) -> Result<Self, CondoError> {
        Self::with_page_size(records, PAGE_SIZE)
    }

    /// Start a review with a custom page size (0 falls back to the default).
    pub fn with_page_size(records: Vec<UnitRecord>, page_size: usize) -> Result<Self, CondoError> {
        let schema = list_schema(&records);
        let mut seen = BTreeSet::new();
        for record in &records {
            if record.schema() != schema {
                return Err(CondoError::SchemaMismatch {
                    expected: schema,
                    found: record.schema(),
                });
            }
            if !seen.insert(record.id()) {
                return Err(CondoError::DuplicateId(record.id().clone()));
            }
        }

        Ok(Self {
            records,
            schema,
            draft: None,
            page_size: if page_size == 0 { PAGE_SIZE } else { page_size },
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn records(&self) -> &[UnitRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<UnitRecord> {
        self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn schema(&self) -> Schema {
        self.schema
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&UnitRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    // =========================================================================
    // STATUS
    // =========================================================================

    /// Status of the record with this id.
    #[must_use]
    pub fn status_of(&self, id: &RecordId) -> Option<Status> {
        self.get(id).map(Classify::status)
    }

    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        count_by_status(&self.records)
    }

    /// Whether the list may be submitted (no critical rows, not empty).
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.counts().can_submit()
    }

    /// Validate the current list for submission.
    pub fn check_submission(&self) -> Result<usize, CondoError> {
        check_submission(&self.records)
    }

    // =========================================================================
    // EDIT-COMMIT
    // =========================================================================

    /// Begin editing a record. Any previous draft is discarded.
    pub fn start_edit(&mut self, id: &RecordId) -> Result<&UnitRecord, CondoError> {
        let record = self
            .get(id)
            .cloned()
            .ok_or_else(|| CondoError::RecordNotFound(id.clone()))?;
        Ok(self.draft.insert(record))
    }

    /// The draft being edited, if any.
    #[must_use]
    pub fn editing(&self) -> Option<&UnitRecord> {
        self.draft.as_ref()
    }

    /// Change one column of the draft.
    pub fn set_field(&mut self, column: &str, value: impl Into<String>) -> Result<(), CondoError> {
        self.draft
            .as_mut()
            .ok_or(CondoError::NoEditInProgress)?
            .set_field(column, value)
    }

    /// Commit the draft, replacing the record with the same id in place.
    ///
    /// Returns the id of the replaced record.
    pub fn save_edit(&mut self) -> Result<RecordId, CondoError> {
        let draft = self.draft.take().ok_or(CondoError::NoEditInProgress)?;
        let id = draft.id().clone();
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == &id)
            .ok_or_else(|| CondoError::RecordNotFound(id.clone()))?;
        *slot = draft;
        Ok(id)
    }

    /// Discard the draft. Returns `true` if there was one.
    pub fn cancel_edit(&mut self) -> bool {
        self.draft.take().is_some()
    }

    // =========================================================================
    // PAGINATION
    // =========================================================================

    /// Number of pages; zero for an empty list.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.records.len().div_ceil(self.page_size)
    }

    /// One page of records (1-based, clamped into range).
    #[must_use]
    pub fn page(&self, number: usize) -> Page<'_> {
        let total_pages = self.total_pages();
        let number = number.clamp(1, total_pages.max(1));
        let offset = (number - 1).saturating_mul(self.page_size).min(self.records.len());
        let end = offset.saturating_add(self.page_size).min(self.records.len());

        Page {
            number,
            total_pages,
            offset,
            total: self.records.len(),
            rows: &self.records[offset..end],
        }
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Render the current (edited) list as CSV.
    #[must_use]
    pub fn export_csv(&self) -> String {
        to_csv_for(self.schema, &self.records)
    }
}

// =============================================================================
// PAGE
// =============================================================================

/// A window of the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    /// 0-based index of the first row.
    pub offset: usize,
    /// Rows in the whole list.
    pub total: usize,
    pub rows: &'a [UnitRecord],
}

impl<'a> Page<'a> {
    /// 1-based position of the first and last row shown, if any.
    #[must_use]
    pub fn row_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        Some((self.offset + 1, self.offset + self.rows.len()))
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Rows paired with their status.
    pub fn with_status(&self) -> impl Iterator<Item = (&'a UnitRecord, Status)> + use<'a> {
        let rows: &'a [UnitRecord] = self.rows;
        rows.iter().map(|r| (r, r.status()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
