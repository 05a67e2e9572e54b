//! Kashshaf Domain Layer
//!
//! Core types and trait seams for the document-annotation pipeline.
//! This crate has no external dependencies; the infrastructure crates
//! (`kashshaf-llm`, `kashshaf-extractor`, `kashshaf-export`) implement the
//! traits declared here.
//!
//! ## Key Concepts
//!
//! - **Annotation Record**: one row extracted from the model's reply
//!   (locator, category, title, rationale)
//! - **Field Labels**: the four column names shown to the model and written
//!   as the spreadsheet header
//! - **Model Id**: the fixed set of completion models a run may select
//! - **Completion Request**: everything the completion service receives for
//!   one run
//!
//! ## Architecture
//!
//! ```text
//! TextSource → prompt → CompletionProvider → parser → RecordSink
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod model;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use model::ModelId;
pub use record::{AnnotationRecord, FieldLabels, FIELD_COUNT};
pub use traits::{CompletionProvider, CompletionRequest, RecordSink, TextSource};
