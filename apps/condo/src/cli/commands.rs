//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::Settings;
use crate::input::{DocumentKind, load_document};
use condo_core::{
    CondoError, ReviewSession, Schema, Status, UnitRecord, dated_filename,
    primitives::DEFAULT_CSV_FILENAME, sample_units, to_csv,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Maximum input document size (20 MB).
const MAX_DOCUMENT_SIZE: u64 = 20 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CondoError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CondoError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CondoError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CondoError> {
    let canonical = path.canonicalize().map_err(|e| {
        CondoError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CondoError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path against its canonical parent directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, CondoError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        CondoError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(CondoError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| CondoError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// DOCUMENT LOADING
// =============================================================================

/// Read a local `.csv` or `.json` document into records.
pub fn load_records(file: &Path) -> Result<Vec<UnitRecord>, CondoError> {
    let kind = DocumentKind::from_path(file).ok_or_else(|| {
        CondoError::ParseError(format!(
            "Unsupported file type '{}': expected .csv or .json",
            file.display()
        ))
    })?;

    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_DOCUMENT_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| CondoError::IoError(format!("Read file: {}", e)))?;

    let records = load_document(kind, &contents)?;
    tracing::info!("Loaded {} units from {:?}", records.len(), file);
    Ok(records)
}

fn load_session(file: &Path, page_size: usize) -> Result<ReviewSession, CondoError> {
    ReviewSession::with_page_size(load_records(file)?, page_size)
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_serve(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), CondoError> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    println!("Condo Registration Server Starting...");
    println!();
    println!("Listening: {}", settings.bind_addr());
    println!();
    println!("Endpoints:");
    println!("  POST /unidades/processar   - Read an uploaded document");
    println!("  POST /unidades/classificar - Classify a unit list");
    println!("  POST /unidades/exportar    - Download a unit list as CSV");
    println!("  POST /unidades/cadastrar   - Register a reviewed unit list");
    println!("  GET  /unidades/exemplo     - Sample data");
    println!("  GET  /health               - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(settings).await
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

/// Classify every row of a document and show one page of the review table.
///
/// Classification only reports; blocked lists are not an error here.
pub fn cmd_classify(
    settings: &Settings,
    json_mode: bool,
    file: &Path,
    page: usize,
) -> Result<(), CondoError> {
    let session = load_session(file, settings.review.page_size)?;
    let counts = session.counts();
    let page = session.page(page);

    if json_mode {
        let rows: Vec<serde_json::Value> = page
            .with_status()
            .map(|(record, status)| {
                serde_json::json!({
                    "id": record.id(),
                    "status": status,
                    "unidade": record.get("Unidade"),
                })
            })
            .collect();
        let output = serde_json::json!({
            "file": file.to_string_lossy(),
            "schema": session.schema(),
            "counts": counts,
            "can_submit": counts.can_submit(),
            "page": page.number,
            "total_pages": page.total_pages,
            "rows": rows,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Unit Review: {}", file.display());
    println!("============");
    println!("Schema: {}", session.schema());
    println!();

    for (record, status) in page.with_status() {
        println!(
            "  {:>5}  {:<10}  {}",
            record.id(),
            status_label(status),
            describe(record)
        );
    }

    match page.row_range() {
        Some((first, last)) => println!(
            "\nShowing {} to {} of {} units (page {} of {})",
            first, last, page.total, page.number, page.total_pages
        ),
        None => println!("No units found"),
    }

    println!();
    println!("Complete:   {}", counts.complete);
    println!("Incomplete: {}", counts.incomplete);
    println!("Critical:   {}", counts.critical);
    println!();
    if counts.can_submit() {
        println!("Submission: allowed");
    } else if counts.critical > 0 {
        println!(
            "Submission: blocked ({} units with critical data missing)",
            counts.critical
        );
    } else {
        println!("Submission: blocked (no units)");
    }

    Ok(())
}

fn status_label(status: Status) -> &'static str {
    match status {
        Status::Complete => "Completo",
        Status::Incomplete => "Incompleto",
        Status::Critical => "Crítico",
    }
}

/// Short row description: unit, block and the main name column.
fn describe(record: &UnitRecord) -> String {
    let name_column = match record.schema() {
        Schema::Flat => "Nome",
        Schema::Expanded => "Proprietario_Nome",
    };
    let cell = |column: &str| record.get(column).unwrap_or("-").to_string();
    format!(
        "{} / {}  {}",
        cell("Unidade"),
        cell("Bloco"),
        cell(name_column)
    )
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Write a document's rows as CSV.
pub fn cmd_export(
    json_mode: bool,
    file: &Path,
    output: Option<&Path>,
    dated: bool,
) -> Result<PathBuf, CondoError> {
    let session = load_session(file, 0)?;

    let target = match output {
        Some(path) => path.to_path_buf(),
        None if dated => {
            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            PathBuf::from(dated_filename(&today))
        }
        None => PathBuf::from(DEFAULT_CSV_FILENAME),
    };
    let validated_output = validate_output_path(&target)?;

    std::fs::write(&validated_output, session.export_csv())
        .map_err(|e| CondoError::IoError(format!("Write file: {}", e)))?;

    tracing::info!("Exported {} units to {:?}", session.len(), validated_output);

    if json_mode {
        let summary = serde_json::json!({
            "output": validated_output.to_string_lossy(),
            "units": session.len(),
            "schema": session.schema(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).unwrap_or_default()
        );
    } else {
        println!(
            "Exported {} units to {}",
            session.len(),
            validated_output.display()
        );
    }

    Ok(validated_output)
}

// =============================================================================
// SUBMIT COMMAND
// =============================================================================

/// Check a document for submission. Fails while any row is critical.
pub fn cmd_submit(json_mode: bool, file: &Path) -> Result<usize, CondoError> {
    let session = load_session(file, 0)?;
    let result = session.check_submission();

    if json_mode {
        let output = match &result {
            Ok(count) => serde_json::json!({
                "success": true,
                "message": format!("{} unidades prontas para cadastro", count),
                "registered": count,
            }),
            Err(e) => serde_json::json!({
                "success": false,
                "error": e.to_string(),
                "counts": session.counts(),
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else if let Ok(count) = &result {
        println!("{} unidades prontas para cadastro", count);
    }

    result
}

// =============================================================================
// SAMPLE COMMAND
// =============================================================================

/// Print the fallback sample data set.
pub fn cmd_sample(schema: Schema, csv: bool) -> Result<(), CondoError> {
    let units = sample_units(schema);

    if csv {
        println!("{}", to_csv(&units));
        return Ok(());
    }

    let output = serde_json::json!({
        "unidades": units,
        "total": units.len(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).unwrap_or_default()
    );
    Ok(())
}
