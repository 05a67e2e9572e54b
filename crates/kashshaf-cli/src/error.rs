//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis run failed
    #[error("{0}")]
    Analyzer(#[from] kashshaf_extractor::AnalyzerError),

    /// Document could not be opened
    #[error("{0}")]
    Document(#[from] kashshaf_extractor::DocumentError),

    /// Prompt template error
    #[error("{0}")]
    Template(#[from] kashshaf_extractor::TemplateError),

    /// Spreadsheet export failed
    #[error("{0}")]
    Export(#[from] kashshaf_export::ExportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// No document opened in the session
    #[error("No document open. Use 'open <file>' first.")]
    NoDocument,

    /// No API key from flag, environment, profile or session
    #[error("No API key. Pass --api-key, set KASHSHAF_API_KEY, or use 'key <credential>'.")]
    MissingApiKey,

    /// Save requested with no export buffer
    #[error("Nothing to save. Run 'analyze' first.")]
    NothingToSave,
}
