//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use condo::api::{
    ClassifyResponse, ExportRequest, HealthResponse, RegisterResponse, UnitsRequest,
    UnitsResponse,
};
use condo_core::{ReviewSession, Schema, Status, sample_units};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.3.1".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.3.1\""));
}

// =============================================================================
// UNITS REQUEST/RESPONSE TESTS
// =============================================================================

#[test]
fn test_units_request_uses_wire_column_names() {
    let json = r#"{"unidades":[{"schema":"flat","id":"1","Unidade":"101","CPF/CNPJ":"n/a"}]}"#;
    let request: UnitsRequest = serde_json::from_str(json).unwrap();

    let unit = &request.unidades[0];
    assert_eq!(unit.get("Unidade"), Some("101"));
    assert_eq!(unit.get("CPF/CNPJ"), Some("n/a"));
    assert_eq!(unit.get("Nome"), None);
}

#[test]
fn test_units_request_requires_schema_tag() {
    let json = r#"{"unidades":[{"id":"1","Unidade":"101"}]}"#;
    assert!(serde_json::from_str::<UnitsRequest>(json).is_err());
}

#[test]
fn test_units_response_success_counts() {
    let response = UnitsResponse::success(sample_units(Schema::Flat));
    assert!(response.success);
    assert_eq!(response.total, 5);
    let counts = response.counts.unwrap();
    assert_eq!(counts.total(), 5);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"unidades\":["));
    assert!(!json.contains("\"error\""));
}

#[test]
fn test_units_response_error() {
    let response = UnitsResponse::error("Nenhum arquivo enviado");
    assert!(!response.success);
    assert!(response.unidades.is_empty());

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"error\":\"Nenhum arquivo enviado\""));
    assert!(!json.contains("\"counts\""));
}

// =============================================================================
// CLASSIFY RESPONSE TESTS
// =============================================================================

#[test]
fn test_classify_response_from_session() {
    let session = ReviewSession::with_page_size(sample_units(Schema::Expanded), 2).unwrap();
    let response = ClassifyResponse::from_session(&session);

    assert_eq!(response.rows.len(), 5);
    assert_eq!(response.page_size, 2);
    assert_eq!(response.total_pages, 3);
    assert!(!response.can_submit);
    assert_eq!(
        response
            .rows
            .iter()
            .filter(|r| r.status == Status::Complete)
            .count(),
        4
    );
}

#[test]
fn test_classify_response_status_wire_names() {
    let session = ReviewSession::new(sample_units(Schema::Flat)).unwrap();
    let json = serde_json::to_string(&ClassifyResponse::from_session(&session)).unwrap();
    assert!(json.contains("\"status\":\"critical\""));
    assert!(json.contains("\"status\":\"incomplete\""));
    assert!(json.contains("\"status\":\"complete\""));
}

// =============================================================================
// EXPORT REQUEST TESTS
// =============================================================================

#[test]
fn test_export_request_optional_fields() {
    let request: ExportRequest = serde_json::from_str(r#"{"unidades":[]}"#).unwrap();
    assert!(request.filename.is_none());
    assert!(request.schema.is_none());

    let request: ExportRequest =
        serde_json::from_str(r#"{"unidades":[],"filename":"x.csv","schema":"expanded"}"#).unwrap();
    assert_eq!(request.filename.as_deref(), Some("x.csv"));
    assert_eq!(request.schema, Some(Schema::Expanded));
}

// =============================================================================
// REGISTER RESPONSE TESTS
// =============================================================================

#[test]
fn test_register_response_success_message() {
    let response = RegisterResponse::success(12);
    assert!(response.success);
    assert_eq!(
        response.message.as_deref(),
        Some("12 unidades cadastradas com sucesso")
    );
    assert!(response.error.is_none());
}

#[test]
fn test_register_response_error_round_trip() {
    let json = serde_json::to_string(&RegisterResponse::error("bloqueado")).unwrap();
    let parsed: RegisterResponse = serde_json::from_str(&json).unwrap();
    assert!(!parsed.success);
    assert_eq!(parsed.error.as_deref(), Some("bloqueado"));
    assert!(parsed.message.is_none());
}
