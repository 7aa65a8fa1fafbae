//! # Condo - Unit Registration Server
//!
//! The main binary for condominium unit registration.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for reviewing local unit lists
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/condo (THE BINARY)          │
//! │                                               │
//! │   ┌─────────────┐          ┌─────────────┐    │
//! │   │    CLI      │          │  HTTP API   │    │
//! │   │   (clap)    │          │   (axum)    │    │
//! │   └──────┬──────┘          └──────┬──────┘    │
//! │          └──────────┬─────────────┘           │
//! │                     ▼                         │
//! │             ┌───────────────┐                 │
//! │             │  condo-core   │                 │
//! │             │  (THE RULES)  │                 │
//! │             └───────────────┘                 │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! condo serve --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! condo classify -f unidades.csv
//! condo export -f unidades.csv --dated
//! condo submit -f unidades.json
//! ```

use clap::Parser;
use condo::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // CONDO_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("CONDO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "condo=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  CondoConta - Cadastro de Unidades v{}

  Upload • Revisão • Cadastro
"#,
        env!("CARGO_PKG_VERSION")
    );
}
