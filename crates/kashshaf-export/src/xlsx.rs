//! Spreadsheet writer for annotation records

use crate::ExportError;
use kashshaf_domain::{AnnotationRecord, FieldLabels, RecordSink, FIELD_COUNT};
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

/// Suggested file name for a downloaded workbook
pub const DEFAULT_FILE_NAME: &str = "kashafaat.xlsx";

/// Excel limit on worksheet name length
pub const MAX_SHEET_NAME_LEN: usize = 31;

const ILLEGAL_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Layout options for the exported sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Header row labels
    pub labels: FieldLabels,

    /// Worksheet name
    pub sheet_name: String,

    /// Display the sheet right-to-left (Arabic content)
    pub right_to_left: bool,

    /// Keep the header row visible while scrolling
    pub freeze_header: bool,

    /// Column widths in character units, in record field order
    pub column_widths: [f64; FIELD_COUNT],
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            labels: FieldLabels::default(),
            sheet_name: "Kashshaf".to_string(),
            right_to_left: true,
            freeze_header: true,
            column_widths: [30.0, 22.0, 40.0, 60.0],
        }
    }
}

impl ExportOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<(), ExportError> {
        let name = self.sheet_name.as_str();
        if name.trim().is_empty() {
            return Err(ExportError::InvalidOptions("sheet name is empty".to_string()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(ExportError::InvalidOptions(format!(
                "sheet name longer than {} characters",
                MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| ILLEGAL_SHEET_CHARS.contains(c)) {
            return Err(ExportError::InvalidOptions(format!(
                "sheet name contains '{}'",
                c
            )));
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(ExportError::InvalidOptions(
                "sheet name must not start or end with an apostrophe".to_string(),
            ));
        }
        if self.column_widths.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ExportError::InvalidOptions(
                "column widths must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Writes records to a one-sheet workbook
#[derive(Debug, Clone, Default)]
pub struct XlsxExporter {
    options: ExportOptions,
}

impl XlsxExporter {
    /// Create an exporter with the given options
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Create an exporter with default layout and custom header labels
    pub fn with_labels(labels: FieldLabels) -> Self {
        Self::new(ExportOptions {
            labels,
            ..ExportOptions::default()
        })
    }

    /// The options in use
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Serialize the records into workbook bytes
    pub fn to_bytes(&self, records: &[AnnotationRecord]) -> Result<Vec<u8>, ExportError> {
        self.options.validate()?;

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let sheet = workbook.add_worksheet();
        sheet.set_name(self.options.sheet_name.as_str())?;
        sheet.set_right_to_left(self.options.right_to_left);

        for (col, (label, width)) in self
            .options
            .labels
            .as_array()
            .iter()
            .zip(self.options.column_widths)
            .enumerate()
        {
            let col = col as u16;
            sheet.write_string_with_format(0, col, *label, &header_format)?;
            sheet.set_column_width(col, width)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, value) in record.fields().iter().enumerate() {
                sheet.write_string(row, col as u16, *value)?;
            }
        }

        if self.options.freeze_header {
            sheet.set_freeze_panes(1, 0)?;
        }

        let bytes = workbook.save_to_buffer()?;
        debug!("Exported {} record(s), {} bytes", records.len(), bytes.len());
        Ok(bytes)
    }
}

impl RecordSink for XlsxExporter {
    type Error = ExportError;

    fn export(&self, records: &[AnnotationRecord]) -> Result<Vec<u8>, Self::Error> {
        self.to_bytes(records)
    }
}
