//! # Condo CLI Module
//!
//! This module implements the CLI interface.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server
//! - `classify` - Classify the rows of a document
//! - `export` - Write a document's rows as CSV
//! - `submit` - Check whether a document may be registered
//! - `sample` - Print the fallback sample data

mod commands;

use crate::config::Settings;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use condo_core::{CondoError, Schema};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Condo - condominium unit registration
///
/// Reads unit lists, flags rows missing required data, and exports or
/// registers the reviewed list.
#[derive(Parser, Debug)]
#[command(name = "condo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML config file (default: ./condo.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Record shape selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaArg {
    Flat,
    Expanded,
}

impl From<SchemaArg> for Schema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Flat => Schema::Flat,
            SchemaArg::Expanded => Schema::Expanded,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Serve {
        /// Host to bind to (overrides the config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Classify every row of a CSV or JSON document
    Classify {
        /// Path to the input file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Page of the review table to show
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Export a document's rows as CSV
    Export {
        /// Path to the input file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file path (default: unidades_condominiais.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name the output unidades_condominiais_<YYYY-MM-DD>.csv
        #[arg(long, conflicts_with = "output")]
        dated: bool,
    },

    /// Check whether a document's rows may be registered
    Submit {
        /// Path to the input file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the fallback sample data set
    Sample {
        /// Record shape
        #[arg(short, long, value_enum, default_value = "flat")]
        schema: SchemaArg,

        /// Print as CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), CondoError> {
    let settings = Settings::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    if cli.verbose {
        print_settings(&settings);
    }

    match cli.command {
        Some(Commands::Serve { host, port }) => cmd_serve(settings, host, port).await,
        Some(Commands::Classify { file, page }) => cmd_classify(&settings, json_mode, &file, page),
        Some(Commands::Export {
            file,
            output,
            dated,
        }) => cmd_export(json_mode, &file, output.as_deref(), dated).map(|_| ()),
        Some(Commands::Submit { file }) => cmd_submit(json_mode, &file).map(|_| ()),
        Some(Commands::Sample { schema, csv }) => cmd_sample(schema.into(), csv),
        None => Cli::command()
            .print_help()
            .map_err(|e| CondoError::IoError(e.to_string())),
    }
}

/// Print the effective settings (the API key itself is never shown).
fn print_settings(settings: &Settings) {
    println!("Configuration:");
    println!("  Bind:       {}", settings.bind_addr());
    println!("  Body limit: {} bytes", settings.server.body_limit_bytes);
    println!("  Page size:  {}", settings.review.page_size);
    println!("  Rate limit: {} req/s", settings.security.rate_limit);
    println!(
        "  Auth:       {}",
        if settings.security.api_key.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!();
}
