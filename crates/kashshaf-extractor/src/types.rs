//! Request and response types for analysis runs

use kashshaf_domain::{AnnotationRecord, ModelId};

/// Request to analyze one document's text
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    /// Full document text
    pub text: String,

    /// Source identifier (usually the file name)
    pub source_id: String,

    /// Completion model to use
    pub model: ModelId,
}

/// Result of one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Records in reply order
    pub records: Vec<AnnotationRecord>,

    /// Non-blank reply lines that did not yield a record
    pub skipped_lines: usize,

    /// The model's reply, for review
    pub raw_reply: String,

    /// Metadata about the run
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// True if the reply yielded no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Metadata about an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// Source identifier
    pub source_id: String,

    /// Model used for the completion call
    pub model: ModelId,

    /// Unix timestamp (seconds) when the run finished
    pub timestamp: u64,

    /// Length of the extracted text in characters
    pub text_chars: usize,

    /// Length of the built prompt in characters
    pub prompt_chars: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
