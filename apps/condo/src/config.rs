//! # Configuration
//!
//! Service settings, read from an optional TOML file and then overridden by
//! environment variables.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! body_limit_bytes = 2097152
//!
//! [review]
//! page_size = 20
//!
//! [security]
//! cors_origins = ["https://app.condoconta.info"]
//! rate_limit = 100
//! api_key = "secret"
//! ```
//!
//! ## Environment Overrides
//!
//! - `CONDO_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all
//! - `CONDO_RATE_LIMIT`: Requests per second (0 disables)
//! - `CONDO_API_KEY`: If set and non-empty, requires Bearer token authentication

use condo_core::{CondoError, primitives::PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "condo.toml";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// SETTINGS
// =============================================================================

/// All service settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub review: ReviewSettings,
    pub security: SecuritySettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Review table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    pub page_size: usize,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
        }
    }
}

/// CORS, rate limiting and authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Allowed origins; empty means localhost only, `["*"]` means any.
    pub cors_origins: Vec<String>,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Bearer token required on every endpoint but `/health`.
    pub api_key: Option<String>,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            rate_limit: 100,
            api_key: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CondoError> {
        toml::from_str(text).map_err(|e| CondoError::ConfigError(e.to_string()))
    }

    /// Load settings from `path`, or from `condo.toml` if present, or defaults;
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, CondoError> {
        let settings = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        Ok(settings.with_overrides(|key| std::env::var(key).ok()))
    }

    fn from_file(path: &Path) -> Result<Self, CondoError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            CondoError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(CondoError::ConfigError(format!(
                "Config file '{}' is {} bytes, maximum is {}",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            CondoError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Apply `CONDO_*` overrides using the given variable lookup.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(origins) = lookup("CONDO_CORS_ORIGINS") {
            self.security.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(rate) = lookup("CONDO_RATE_LIMIT") {
            match rate.trim().parse() {
                Ok(rps) => self.security.rate_limit = rps,
                Err(_) => tracing::warn!("Ignoring invalid CONDO_RATE_LIMIT '{}'", rate),
            }
        }

        if let Some(key) = lookup("CONDO_API_KEY") {
            self.security.api_key = Some(key).filter(|k| !k.is_empty());
        }

        self.security.api_key = self.security.api_key.filter(|k| !k.is_empty());
        self
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
