//! Kashshaf Export
//!
//! Serializes annotation records into a single-sheet `.xlsx` workbook.
//! The first row holds the column labels; each record follows on its own
//! row in the order it was parsed.

#![warn(missing_docs)]

mod xlsx;

pub use xlsx::{ExportOptions, XlsxExporter, DEFAULT_FILE_NAME, MAX_SHEET_NAME_LEN};

use thiserror::Error;

/// Errors that can occur while exporting records
#[derive(Error, Debug)]
pub enum ExportError {
    /// Workbook could not be built or serialized
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Export options are unusable
    #[error("Invalid export options: {0}")]
    InvalidOptions(String),
}
