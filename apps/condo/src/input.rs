//! # Document Input
//!
//! Turns uploaded or local documents into unit records.
//!
//! - CSV: header row + records, read by the core CSV reader
//! - JSON: the parse service response `{"unidades": [...]}` or a bare array;
//!   rows are either raw column maps or already-tagged records
//! - PDF: needs the external extraction service, never read here

use condo_core::{CondoError, RawRow, UnitRecord, check_limits, ingest_rows, read_csv};
use serde_json::Value;
use std::path::Path;

/// Kind of an incoming document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Csv,
    Json,
    Pdf,
}

impl DocumentKind {
    /// Kind from a `Content-Type` header value (parameters ignored).
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match mime.as_str() {
            "text/csv" | "text/plain" | "application/csv" => Some(Self::Csv),
            "application/json" => Some(Self::Json),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Kind from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Parse a document into records with positional ids.
pub fn load_document(kind: DocumentKind, bytes: &[u8]) -> Result<Vec<UnitRecord>, CondoError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| CondoError::ParseError(format!("Document is not valid UTF-8: {}", e)))?;

    match kind {
        DocumentKind::Csv => ingest_rows(&read_csv(text)?),
        DocumentKind::Json => records_from_json(text),
        DocumentKind::Pdf => Err(CondoError::ParseError(
            "PDF documents require the external extraction service".to_string(),
        )),
    }
}

/// Parse a JSON document.
///
/// Tagged records (with a `schema` key) keep their ids; raw rows are
/// ingested like CSV rows. Both are held to the ingestion limits.
pub fn records_from_json(text: &str) -> Result<Vec<UnitRecord>, CondoError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| CondoError::ParseError(e.to_string()))?;

    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("unidades") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(CondoError::ParseError(
                    "Expected an \"unidades\" array".to_string(),
                ));
            }
        },
        _ => {
            return Err(CondoError::ParseError(
                "Expected an array of rows".to_string(),
            ));
        }
    };

    let tagged = !items.is_empty() && items.iter().all(|item| item.get("schema").is_some());
    if tagged {
        let records: Vec<UnitRecord> = serde_json::from_value(Value::Array(items))
            .map_err(|e| CondoError::ParseError(e.to_string()))?;
        check_limits(&records)?;
        return Ok(records);
    }

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| raw_row(i, item))
        .collect::<Result<Vec<RawRow>, CondoError>>()?;
    ingest_rows(&rows)
}

fn raw_row(index: usize, item: Value) -> Result<RawRow, CondoError> {
    let Value::Object(map) = item else {
        return Err(CondoError::ParseError(format!(
            "Row {} is not an object",
            index + 1
        )));
    };

    Ok(map
        .into_iter()
        .map(|(column, value)| {
            let text = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            };
            (column, text)
        })
        .collect())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use condo_core::{Schema, Status, classify};

    #[test]
    fn content_type_detection() {
        assert_eq!(
            DocumentKind::from_content_type("text/csv; charset=utf-8"),
            Some(DocumentKind::Csv)
        );
        assert_eq!(
            DocumentKind::from_content_type("Application/JSON"),
            Some(DocumentKind::Json)
        );
        assert_eq!(
            DocumentKind::from_content_type("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(DocumentKind::from_content_type("image/png"), None);
    }

    #[test]
    fn extension_detection() {
        assert_eq!(
            DocumentKind::from_path(Path::new("lista.CSV")),
            Some(DocumentKind::Csv)
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("dados.json")),
            Some(DocumentKind::Json)
        );
        assert_eq!(DocumentKind::from_path(Path::new("semextensao")), None);
    }

    #[test]
    fn parse_service_response_is_ingested() {
        let body = r#"{
            "unidades": [
                {"Unidade": "101", "Nome": "Ana", "CPF/CNPJ": "1", "Celular": "(11) 9", "Telefone": null, "E-mail": "a@x.com"},
                {"Unidade": 102, "Nome": "Bruno", "CPF/CNPJ": ""}
            ],
            "total": 2
        }"#;
        let records = records_from_json(body).expect("ingest");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id().as_str(), "2");
        assert_eq!(records[1].get("Unidade"), Some("102"));
        assert_eq!(classify(&records[0]), Status::Complete);
        assert_eq!(classify(&records[1]), Status::Critical);
    }

    #[test]
    fn tagged_records_are_kept() {
        let body = r#"[{"schema": "expanded", "id": "u-7", "Unidade": "7"}]"#;
        let records = records_from_json(body).expect("deserialize");
        assert_eq!(records[0].schema(), Schema::Expanded);
        assert_eq!(records[0].id().as_str(), "u-7");
    }

    #[test]
    fn tagged_records_held_to_field_limit() {
        let long = "x".repeat(condo_core::primitives::MAX_FIELD_LENGTH + 1);
        let body = serde_json::json!([
            {"schema": "flat", "id": "1", "Unidade": "101", "E-mail": long}
        ])
        .to_string();
        assert!(matches!(
            records_from_json(&body),
            Err(CondoError::FieldTooLong { field, .. }) if field == "E-mail"
        ));
    }

    #[test]
    fn non_object_row_rejected() {
        let result = records_from_json(r#"[{"Unidade": "1"}, 3]"#);
        assert!(matches!(result, Err(CondoError::ParseError(msg)) if msg.contains("Row 2")));
    }

    #[test]
    fn missing_unidades_rejected() {
        assert!(records_from_json(r#"{"total": 0}"#).is_err());
        assert!(records_from_json("42").is_err());
    }

    #[test]
    fn pdf_is_not_read_locally() {
        assert!(matches!(
            load_document(DocumentKind::Pdf, b"%PDF-1.7"),
            Err(CondoError::ParseError(_))
        ));
    }

    #[test]
    fn csv_document() {
        let records = load_document(DocumentKind::Csv, b"Unidade,Nome,CPF/CNPJ\n101,Ana,1\n")
            .expect("ingest");
        assert_eq!(records.len(), 1);
        assert_eq!(classify(&records[0]), Status::Incomplete);
    }
}
