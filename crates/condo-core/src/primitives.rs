//! # Primitives
//!
//! Fixed constants for the registration core: column layouts, export
//! artifact naming and ingestion limits.

// =============================================================================
// COLUMN LAYOUTS
// =============================================================================

/// Flat schema columns, in display and export order.
pub const FLAT_HEADERS: [&str; 7] = [
    "Unidade",
    "Bloco",
    "Nome",
    "CPF/CNPJ",
    "Celular",
    "Telefone",
    "E-mail",
];

/// Expanded schema columns, in display and export order.
pub const EXPANDED_HEADERS: [&str; 14] = [
    "Unidade",
    "Bloco",
    "Tipo",
    "Perfil",
    "Proprietario_Nome",
    "Proprietario_CPF_CNPJ",
    "Proprietario_Celular",
    "Proprietario_Telefone_fixo",
    "Proprietario_Email",
    "Responsavel_Nome",
    "Responsavel_CPF_CNPJ",
    "Responsavel_Celular",
    "Responsavel_Telefone_fixo",
    "Responsavel_Email",
];

/// The literal treated as "no value" by the emptiness predicate (case-insensitive).
pub const NOT_AVAILABLE: &str = "n/a";

// =============================================================================
// EXPORT ARTIFACT
// =============================================================================

/// Stem of the exported file name.
pub const CSV_FILENAME_STEM: &str = "unidades_condominiais";

/// Default export file name.
pub const DEFAULT_CSV_FILENAME: &str = "unidades_condominiais.csv";

/// Content type of the exported file.
pub const CSV_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";

// =============================================================================
// REVIEW
// =============================================================================

/// Rows shown per review page.
pub const PAGE_SIZE: usize = 20;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of rows accepted from a single document.
pub const MAX_RECORDS: usize = 10_000;

/// Maximum length of a single field value in bytes.
pub const MAX_FIELD_LENGTH: usize = 1024;
