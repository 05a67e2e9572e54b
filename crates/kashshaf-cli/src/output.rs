//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use kashshaf_domain::{AnnotationRecord, FieldLabels, ModelId};
use kashshaf_extractor::AnalysisResult;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Warning shown when a run yields no records
pub const NO_RECORDS_WARNING: &str = "No annotations found, check the prompt or the reply format";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The output format in use.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format records output.
    pub fn format_records(&self, records: &[AnnotationRecord], labels: &FieldLabels) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_records_json(records),
            OutputFormat::Table => self.format_records_table(records, labels),
            OutputFormat::Quiet => self.format_records_quiet(records),
        }
    }

    /// Format records as JSON.
    fn format_records_json(&self, records: &[AnnotationRecord]) -> Result<String> {
        let json_records: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                serde_json::json!({
                    "locator": r.locator,
                    "category": r.category,
                    "title": r.title,
                    "rationale": r.rationale,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json_records)?)
    }

    /// Format records as a table.
    fn format_records_table(&self, records: &[AnnotationRecord], labels: &FieldLabels) -> Result<String> {
        if records.is_empty() {
            return Ok(self.colorize("No records.", "yellow"));
        }

        let mut builder = Builder::default();
        builder.push_record(labels.as_array());

        for record in records {
            builder.push_record(record.fields());
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(table.to_string())
    }

    /// Format records in quiet mode (one delimited line each).
    fn format_records_quiet(&self, records: &[AnnotationRecord]) -> Result<String> {
        let lines: Vec<String> = records.iter().map(|r| r.fields().join(" | ")).collect();
        Ok(lines.join("\n"))
    }

    /// One-line summary of a finished run.
    pub fn run_summary(&self, result: &AnalysisResult) -> String {
        let meta = &result.metadata;
        self.info(&format!(
            "{}: {} record(s) from {} chars with {} in {:.1}s",
            meta.source_id,
            result.records.len(),
            meta.text_chars,
            meta.model,
            meta.processing_time_ms as f64 / 1000.0
        ))
    }

    /// Warning for reply lines that did not yield a record.
    pub fn skipped_warning(&self, skipped: usize) -> Option<String> {
        (skipped > 0).then(|| {
            self.warning(&format!(
                "{} reply line(s) had fewer than 4 fields and were skipped",
                skipped
            ))
        })
    }

    /// Model list with the active one marked.
    pub fn format_models(&self, active: ModelId) -> String {
        ModelId::ALL
            .iter()
            .map(|model| {
                if *model == active {
                    format!("* {}", self.colorize(model.as_str(), "green"))
                } else {
                    format!("  {}", model)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
