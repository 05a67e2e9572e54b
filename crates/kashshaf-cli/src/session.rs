//! Interactive session state.
//!
//! One [`Session`] lives for the duration of a REPL and is owned by its
//! loop. It remembers the open document, the selected model, the API key
//! and the most recent run. Each run replaces the previous one, but a run
//! with no records leaves the previous spreadsheet in place.

use crate::error::{CliError, Result};
use kashshaf_domain::ModelId;
use kashshaf_extractor::AnalysisResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one analysis run
#[derive(Debug, Clone)]
pub struct Run {
    /// Records, reply and metadata
    pub result: AnalysisResult,

    /// Serialized spreadsheet; `None` when no run has produced records
    pub export: Option<Vec<u8>>,
}

/// Session-scoped context for the interactive shell
#[derive(Debug, Default)]
pub struct Session {
    document: Option<PathBuf>,
    model: ModelId,
    api_key: Option<String>,
    last_run: Option<Run>,
}

impl Session {
    /// Create a session with an initial model and optional key.
    pub fn new(model: ModelId, api_key: Option<String>) -> Self {
        Self {
            document: None,
            model,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            last_run: None,
        }
    }

    /// Select the document for the next run.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<&Path> {
        let path = path.into();
        if !path.is_file() {
            return Err(CliError::InvalidInput(format!(
                "No such file: {}",
                path.display()
            )));
        }
        Ok(self.document.insert(path).as_path())
    }

    /// The open document, if any.
    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    /// The open document, or an error.
    pub fn require_document(&self) -> Result<&Path> {
        self.document().ok_or(CliError::NoDocument)
    }

    /// Selected model.
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Select a model.
    pub fn set_model(&mut self, model: ModelId) {
        self.model = model;
    }

    /// Set the API key for subsequent runs.
    pub fn set_api_key(&mut self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(CliError::InvalidInput("API key must not be empty".to_string()));
        }
        self.api_key = Some(key);
        Ok(())
    }

    /// The API key, or an error.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(CliError::MissingApiKey)
    }

    /// True if an API key is set.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Replace the previous run.
    ///
    /// A run with no records inherits the previous export buffer, which
    /// stays available to `save` until a run with records overwrites it.
    pub fn replace_run(&mut self, mut run: Run) {
        if run.result.records.is_empty() {
            run.export = self.last_run.take().and_then(|prev| prev.export);
        }
        self.last_run = Some(run);
    }

    /// The most recent run, if any.
    pub fn last_run(&self) -> Option<&Run> {
        self.last_run.as_ref()
    }

    /// Serialized spreadsheet of the most recent run, if any.
    pub fn export_buffer(&self) -> Option<&[u8]> {
        self.last_run.as_ref()?.export.as_deref()
    }

    /// Write the retained spreadsheet to a file.
    pub fn save(&self, path: &Path) -> Result<usize> {
        let bytes = self.export_buffer().ok_or(CliError::NothingToSave)?;
        fs::write(path, bytes)?;
        Ok(bytes.len())
    }
}
