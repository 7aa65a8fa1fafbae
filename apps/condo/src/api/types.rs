//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Record lists travel under the `unidades` key, as the web client and the
//! parse service exchange them.

use condo_core::{RecordId, ReviewSession, Schema, Status, StatusCounts, UnitRecord};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// UNIT LIST REQUEST/RESPONSE
// =============================================================================

/// A record list sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsRequest {
    pub unidades: Vec<UnitRecord>,
}

/// A record list returned to the client (processing and sample data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsResponse {
    pub success: bool,
    #[serde(default)]
    pub unidades: Vec<UnitRecord>,
    #[serde(default)]
    pub total: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<StatusCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UnitsResponse {
    /// Create a response carrying records and their counts.
    #[must_use]
    pub fn success(unidades: Vec<UnitRecord>) -> Self {
        let counts = condo_core::count_by_status(&unidades);
        Self {
            success: true,
            total: unidades.len(),
            unidades,
            counts: Some(counts),
            error: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            unidades: Vec::new(),
            total: 0,
            counts: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// CLASSIFY RESPONSE
// =============================================================================

/// Status of one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStatus {
    pub id: RecordId,
    pub status: Status,
}

/// Per-row classification plus the submission verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub success: bool,
    #[serde(default)]
    pub rows: Vec<RowStatus>,
    #[serde(default)]
    pub counts: StatusCounts,
    #[serde(default)]
    pub can_submit: bool,
    /// Rows per page of the review table.
    #[serde(default)]
    pub page_size: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassifyResponse {
    /// Classify the records of a review session.
    #[must_use]
    pub fn from_session(session: &ReviewSession) -> Self {
        let rows = session
            .records()
            .iter()
            .map(|r| RowStatus {
                id: r.id().clone(),
                status: condo_core::classify(r),
            })
            .collect();
        let counts = session.counts();
        Self {
            success: true,
            rows,
            counts,
            can_submit: counts.can_submit(),
            page_size: session.page_size(),
            total_pages: session.total_pages(),
            error: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            rows: Vec::new(),
            counts: StatusCounts::default(),
            can_submit: false,
            page_size: 0,
            total_pages: 0,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// EXPORT REQUEST
// =============================================================================

/// CSV export request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub unidades: Vec<UnitRecord>,
    /// Download name; defaults to `unidades_condominiais.csv`.
    #[serde(default)]
    pub filename: Option<String>,
    /// Header to use when the list is empty.
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Error body for a failed export (success returns the CSV itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// =============================================================================
// REGISTER RESPONSE
// =============================================================================

/// Submission result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub registered: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegisterResponse {
    /// Create a success response for `count` registered units.
    #[must_use]
    pub fn success(count: usize) -> Self {
        Self {
            success: true,
            message: Some(format!("{} unidades cadastradas com sucesso", count)),
            registered: count,
            error: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            registered: 0,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// SAMPLE QUERY
// =============================================================================

/// Query string of the sample endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleQuery {
    #[serde(default)]
    pub schema: Option<Schema>,
}
