//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Record lists are validated through a [`ReviewSession`] before anything
//! else happens: ids must be unique and the schemas must agree.

use super::{
    AppState,
    types::{
        ClassifyResponse, ErrorResponse, ExportRequest, HealthResponse, RegisterResponse,
        SampleQuery, UnitsRequest, UnitsResponse,
    },
};
use crate::input::{DocumentKind, load_document};
use axum::{
    Json,
    body::Bytes,
    extract::{
        FromRequest, Multipart, Query, Request, State, multipart::MultipartError,
        rejection::JsonRejection,
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use condo_core::{CondoError, CsvDownload, ReviewSession, Schema, sample_units, to_csv_for};
use std::path::Path;

/// Form field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "arquivo";

/// Message for a missing upload.
pub const NO_FILE_MESSAGE: &str = "Nenhum arquivo enviado";
/// Message for a body that is not a record list.
pub const INVALID_UNITS_MESSAGE: &str = "Dados de unidades inválidos";
/// Message for a submission blocked by critical rows.
pub const CRITICAL_ROWS_MESSAGE: &str =
    "Não é possível cadastrar unidades com dados críticos faltando";
/// Message for an empty submission.
pub const EMPTY_SUBMISSION_MESSAGE: &str = "Nenhuma unidade para cadastrar";

/// HTTP status for a record list error.
fn error_status(e: &CondoError) -> StatusCode {
    match e {
        CondoError::TooManyRecords(_) => StatusCode::PAYLOAD_TOO_LARGE,
        CondoError::IoError(_) | CondoError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PROCESS HANDLER
// =============================================================================

/// An uploaded document before it is read.
struct Upload {
    kind: Option<DocumentKind>,
    media: String,
    body: Bytes,
}

/// Turn an uploaded document into a record list with positional ids.
///
/// The document is either the `arquivo` part of a `multipart/form-data`
/// form or the raw request body typed by its `Content-Type`.
/// CSV is read here. JSON is accepted as relayed from the parse service.
/// PDF needs the external extraction service and is refused with 415.
pub async fn process_handler(request: Request) -> Response {
    let upload = match read_upload(request).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UnitsResponse::error(NO_FILE_MESSAGE)),
            )
                .into_response();
        }
        Err(response) => return response,
    };

    let kind = match upload.kind {
        Some(DocumentKind::Pdf) => {
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(UnitsResponse::error(
                    "Documentos PDF são processados pelo serviço externo de extração",
                )),
            )
                .into_response();
        }
        Some(kind) => kind,
        None => {
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(UnitsResponse::error(format!(
                    "Tipo de arquivo não suportado: {}",
                    upload.media
                ))),
            )
                .into_response();
        }
    };

    let records = match load_document(kind, &upload.body).and_then(ReviewSession::new) {
        Ok(session) => session.into_records(),
        Err(e) => {
            tracing::warn!(error = %e, media = %upload.media, "Document rejected");
            return (
                error_status(&e),
                Json(UnitsResponse::error(format!("Falha ao processar arquivo: {}", e))),
            )
                .into_response();
        }
    };

    tracing::info!(total = records.len(), media = %upload.media, "Document processed");
    (StatusCode::OK, Json(UnitsResponse::success(records))).into_response()
}

/// Extract the upload from a form or a raw body. `None` means no file.
async fn read_upload(request: Request) -> Result<Option<Upload>, Response> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/csv")
        .to_string();

    if is_form_upload(&content_type) {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(IntoResponse::into_response)?;
        return read_form_upload(multipart).await.map_err(|e| {
            tracing::warn!(error = %e, "Upload form rejected");
            (
                e.status(),
                Json(UnitsResponse::error(format!(
                    "Falha ao ler formulário: {}",
                    e.body_text()
                ))),
            )
                .into_response()
        });
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload {
        kind: DocumentKind::from_content_type(&content_type),
        media: content_type,
        body,
    }))
}

fn is_form_upload(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("multipart/form-data"))
}

/// Take the `arquivo` part of an upload form.
///
/// The kind comes from the part's content type, then its file name.
async fn read_form_upload(mut multipart: Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let body = field.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }

        let kind = content_type
            .as_deref()
            .and_then(DocumentKind::from_content_type)
            .or_else(|| {
                file_name
                    .as_deref()
                    .and_then(|name| DocumentKind::from_path(Path::new(name)))
            });
        let media = file_name
            .or(content_type)
            .unwrap_or_else(|| UPLOAD_FIELD.to_string());

        return Ok(Some(Upload { kind, media, body }));
    }
    Ok(None)
}

// =============================================================================
// CLASSIFY HANDLER
// =============================================================================

/// Classify every row of a record list.
pub async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<UnitsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ClassifyResponse::error(INVALID_UNITS_MESSAGE)),
        );
    };

    match ReviewSession::with_page_size(request.unidades, state.settings.review.page_size) {
        Ok(session) => (StatusCode::OK, Json(ClassifyResponse::from_session(&session))),
        Err(e) => (error_status(&e), Json(ClassifyResponse::error(e.to_string()))),
    }
}

// =============================================================================
// EXPORT HANDLER
// =============================================================================

/// Render a record list as a CSV download.
pub async fn export_handler(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(INVALID_UNITS_MESSAGE)),
        )
            .into_response();
    };

    if request
        .filename
        .as_deref()
        .is_some_and(|name| !is_valid_filename(name))
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Nome de arquivo inválido")),
        )
            .into_response();
    }

    let session = match ReviewSession::new(request.unidades) {
        Ok(s) => s,
        Err(e) => {
            return (error_status(&e), Json(ErrorResponse::new(e.to_string()))).into_response();
        }
    };

    let csv = if session.is_empty() {
        to_csv_for(request.schema.unwrap_or(Schema::Flat), &[])
    } else {
        session.export_csv()
    };
    let download = CsvDownload::from_text(csv, request.filename.as_deref());

    tracing::info!(
        rows = session.len(),
        filename = %download.filename,
        "CSV exported"
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_DISPOSITION, download.content_disposition()),
        ],
        download.body,
    )
        .into_response()
}

/// Download names must be printable ASCII so they fit in a header.
fn is_valid_filename(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().all(|c| c.is_ascii_graphic() || c == ' ')
}

// =============================================================================
// REGISTER HANDLER
// =============================================================================

/// Register a reviewed record list.
///
/// Refused while any row is critical or when the list is empty.
pub async fn register_handler(
    payload: Result<Json<UnitsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(request)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::error(INVALID_UNITS_MESSAGE)),
        );
    };

    let session = match ReviewSession::new(request.unidades) {
        Ok(s) => s,
        Err(e) => return (error_status(&e), Json(RegisterResponse::error(e.to_string()))),
    };

    match session.check_submission() {
        Ok(count) => {
            tracing::info!(registered = count, schema = %session.schema(), "Units registered");
            (StatusCode::OK, Json(RegisterResponse::success(count)))
        }
        Err(CondoError::CriticalRows(critical)) => {
            tracing::warn!(critical, "Registration blocked by critical rows");
            (
                StatusCode::BAD_REQUEST,
                Json(RegisterResponse::error(CRITICAL_ROWS_MESSAGE)),
            )
        }
        Err(CondoError::EmptySubmission) => (
            StatusCode::BAD_REQUEST,
            Json(RegisterResponse::error(EMPTY_SUBMISSION_MESSAGE)),
        ),
        Err(e) => (error_status(&e), Json(RegisterResponse::error(e.to_string()))),
    }
}

// =============================================================================
// SAMPLE HANDLER
// =============================================================================

/// Fallback data set used when the parse service is unavailable.
pub async fn sample_handler(Query(query): Query<SampleQuery>) -> impl IntoResponse {
    let schema = query.schema.unwrap_or(Schema::Flat);
    Json(UnitsResponse::success(sample_units(schema)))
}

// =============================================================================
// TESTS
// =============================================================================
