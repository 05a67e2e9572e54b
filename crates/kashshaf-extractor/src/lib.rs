//! Kashshaf Extractor
//!
//! Turns the text of one document into scholarly-index annotation records
//! with a single completion call.
//!
//! # Overview
//!
//! A run reads the body text of a `.docx` (or plain text) file, wraps it in
//! the instructional prompt, sends it to the completion service and parses
//! the pipe-delimited reply into [`AnnotationRecord`]s.
//!
//! # Architecture
//!
//! ```text
//! TextSource → PromptBuilder → CompletionProvider → parse_response → records
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use kashshaf_extractor::{Analyzer, AnalysisRequest};
//! use kashshaf_domain::ModelId;
//! use kashshaf_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new("مقدمة | تفسير الآيات | آية الكرسي | ذكر تفسيرها");
//! let analyzer = Analyzer::with_defaults(llm);
//!
//! let result = analyzer
//!     .analyze(AnalysisRequest {
//!         text: "قال شيخ الإسلام ...".to_string(),
//!         source_id: "majmu.docx".to_string(),
//!         model: ModelId::Gpt4,
//!     })
//!     .await?;
//!
//! println!("Records: {}", result.records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod document;
mod error;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TEMPERATURE};
pub use document::{open_source, DocxSource, PlainTextSource, DOCUMENT_PART};
pub use error::{AnalyzerError, DocumentError, TemplateError};
pub use parser::{parse_records, parse_response, ParsedResponse, FIELD_DELIMITER, LINE_BREAKS};
pub use prompt::{PromptBuilder, PromptTemplate};
pub use types::{AnalysisMetadata, AnalysisRequest, AnalysisResult};

pub use kashshaf_domain::AnnotationRecord;
