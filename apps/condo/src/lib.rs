//! # Condo - Unit Registration Service
//!
//! HTTP API, CLI and configuration around the `condo-core` rule engine.
//!
//! - [`api`]: axum router and server
//! - [`cli`]: clap commands over local documents
//! - [`config`]: TOML settings with environment overrides
//! - [`input`]: CSV/JSON document reading

pub mod api;
pub mod cli;
pub mod config;
pub mod input;
