//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::AnnotationRecord;
use std::future::Future;

/// Everything the completion service receives for one run
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier sent to the service (e.g. "gpt-4")
    pub model: String,

    /// Fixed system instruction
    pub system_instruction: String,

    /// The built user prompt, source text included
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,
}

/// Trait for completion provider operations
///
/// Implemented by the infrastructure layer (kashshaf-llm)
pub trait CompletionProvider {
    /// Error type for completion operations
    type Error;

    /// Send one completion request and return the reply text
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for reading the full text of a document
///
/// Implemented by the application layer (kashshaf-extractor)
pub trait TextSource {
    /// Error type for read operations
    type Error;

    /// Non-empty paragraphs joined with `\n`, in document order
    fn read_text(&self) -> Result<String, Self::Error>;
}

/// Trait for serializing records into a downloadable byte stream
///
/// Implemented by the export layer (kashshaf-export)
pub trait RecordSink {
    /// Error type for export operations
    type Error;

    /// Serialize a header row plus one row per record
    fn export(&self, records: &[AnnotationRecord]) -> Result<Vec<u8>, Self::Error>;
}
