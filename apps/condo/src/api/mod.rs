//! # Condo HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /unidades/processar` - Read an uploaded document into records
//! - `POST /unidades/classificar` - Classify a record list
//! - `POST /unidades/exportar` - Download a record list as CSV
//! - `POST /unidades/cadastrar` - Register a reviewed record list
//! - `GET /unidades/exemplo` - Fallback sample data
//! - `GET /health` - Health check
//!
//! CORS origins, rate limit and API key come from [`Settings`].

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::ApiKey;
pub use handlers::{
    CRITICAL_ROWS_MESSAGE, EMPTY_SUBMISSION_MESSAGE, INVALID_UNITS_MESSAGE, NO_FILE_MESSAGE,
    UPLOAD_FIELD,
};
pub use middleware::create_rate_limiter;
pub use types::{
    ClassifyResponse, ErrorResponse, ExportRequest, HealthResponse, RegisterResponse, RowStatus,
    SampleQuery, UnitsRequest, UnitsResponse,
};

use crate::config::Settings;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use condo_core::CondoError;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from the configured origins.
///
/// - `["*"]`: allows all origins (development only)
/// - empty: localhost only
/// - otherwise: exactly the listed origins
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    if origins.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
        return build_localhost_cors();
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION])
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_DISPOSITION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication (if an API key is configured)
pub fn create_router(state: AppState) -> Router {
    let security = &state.settings.security;
    let cors = build_cors_layer(&security.cors_origins);
    let body_limit = state.settings.server.body_limit_bytes;

    let rate_limiter = create_rate_limiter(security.rate_limit);
    match rate_limiter {
        Some(_) => tracing::info!(
            "Rate limiting enabled: {} requests/second",
            security.rate_limit
        ),
        None => tracing::info!("Rate limiting disabled"),
    }

    let api_key = security.api_key.as_deref().map(ApiKey::new);
    if api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set CONDO_API_KEY or security.api_key to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/unidades/processar", post(handlers::process_handler))
        .route("/unidades/classificar", post(handlers::classify_handler))
        .route("/unidades/exportar", post(handlers::export_handler))
        .route("/unidades/cadastrar", post(handlers::register_handler))
        .route("/unidades/exemplo", get(handlers::sample_handler));

    if let Some(key) = api_key {
        router = router.layer(axum_middleware::from_fn_with_state(
            key,
            auth::api_key_auth_middleware,
        ));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(settings: Settings) -> Result<(), CondoError> {
    let addr = settings.bind_addr();
    let router = create_router(AppState::new(settings));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CondoError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Condo HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| CondoError::IoError(format!("Server error: {}", e)))
}
