//! # Status Aggregation
//!
//! Tallies classifier results over a record list and decides whether the
//! list may be submitted for registration.
//!
//! Submission is blocked while any row is critical, and for an empty list.

use crate::classify::Classify;
use crate::{CondoError, Status, UnitRecord};
use serde::{Deserialize, Serialize};

/// Number of records per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub complete: usize,
    pub incomplete: usize,
    pub critical: usize,
}

impl StatusCounts {
    /// Add one record of the given status.
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Complete => self.complete = self.complete.saturating_add(1),
            Status::Incomplete => self.incomplete = self.incomplete.saturating_add(1),
            Status::Critical => self.critical = self.critical.saturating_add(1),
        }
    }

    /// Total number of records counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.complete
            .saturating_add(self.incomplete)
            .saturating_add(self.critical)
    }

    /// Whether the "register units" action is allowed.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.critical == 0 && self.total() > 0
    }
}

/// Classify every record and tally the results.
#[must_use]
pub fn count_by_status(records: &[UnitRecord]) -> StatusCounts {
    records.iter().fold(StatusCounts::default(), |mut counts, r| {
        counts.record(r.status());
        counts
    })
}

/// Validate a list for submission.
///
/// Returns the number of records that would be registered.
///
/// # Errors
/// - `CondoError::EmptySubmission` if the list is empty
/// - `CondoError::CriticalRows` if any record is critical
pub fn check_submission(records: &[UnitRecord]) -> Result<usize, CondoError> {
    if records.is_empty() {
        return Err(CondoError::EmptySubmission);
    }

    let counts = count_by_status(records);
    if counts.critical > 0 {
        return Err(CondoError::CriticalRows(counts.critical));
    }

    Ok(records.len())
}

// =============================================================================
// TESTS
// =============================================================================
