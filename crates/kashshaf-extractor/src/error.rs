//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur while reading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a valid .docx (zip) package
    #[error("Not a .docx package: {0}")]
    InvalidPackage(String),

    /// Package has no main document part
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// Main document part is not well-formed XML
    #[error("Malformed document XML: {0}")]
    Xml(String),
}

/// Errors that can occur while loading a prompt template
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML could not be parsed
    #[error("Failed to parse template: {0}")]
    Parse(String),

    /// Template could not be serialized
    #[error("Failed to serialize template: {0}")]
    Serialize(String),

    /// Template parsed but is unusable
    #[error("Invalid template: {0}")]
    Invalid(String),
}

/// Errors that can occur during an analysis run
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Completion provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Document could not be read
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Document contains no text
    #[error("Document contains no text")]
    EmptyDocument,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Completion call timeout
    #[error("Completion timeout after {0} seconds")]
    Timeout(u64),

    /// Prompt template error
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
