//! Document text extraction
//!
//! A `.docx` file is a zip package; the body text lives in
//! `word/document.xml` as WordprocessingML:
//!
//! ```text
//! w:document
//!   └── w:body
//!         ├── w:p            (body paragraph)
//!         │     └── w:r      (run)
//!         │           └── w:t  (text)
//!         └── w:tbl          (table; its paragraphs are not body paragraphs)
//! ```

use crate::error::DocumentError;
use kashshaf_domain::TextSource;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

/// Package part holding the main document body
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Text source backed by a `.docx` package
#[derive(Debug, Clone)]
pub struct DocxSource {
    bytes: Vec<u8>,
}

impl DocxSource {
    /// Read a `.docx` file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let bytes = fs::read(path)?;
        Ok(Self { bytes })
    }

    /// Wrap an in-memory `.docx` package
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    fn document_xml(&self) -> Result<String, DocumentError> {
        let mut archive = ZipArchive::new(Cursor::new(self.bytes.as_slice()))
            .map_err(package_error)?;
        let mut part = archive.by_name(DOCUMENT_PART).map_err(package_error)?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(xml)
    }
}

impl TextSource for DocxSource {
    type Error = DocumentError;

    fn read_text(&self) -> Result<String, Self::Error> {
        let xml = self.document_xml()?;
        let paragraphs = body_paragraphs(&xml)?;
        debug!("Extracted {} non-empty paragraphs", paragraphs.len());
        Ok(paragraphs.join("\n"))
    }
}

/// Text source for plain UTF-8 text, one paragraph per line
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    text: String,
}

impl PlainTextSource {
    /// Wrap text already in memory
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a text file from disk
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        Ok(Self::new(fs::read_to_string(path)?))
    }
}

impl TextSource for PlainTextSource {
    type Error = DocumentError;

    fn read_text(&self) -> Result<String, Self::Error> {
        Ok(self
            .text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Open a text source, choosing the reader by file extension
///
/// `.docx` files are read as packages; anything else as plain text.
pub fn open_source(
    path: impl AsRef<Path>,
) -> Result<Box<dyn TextSource<Error = DocumentError>>, DocumentError> {
    let path = path.as_ref();
    let is_docx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));

    if is_docx {
        Ok(Box::new(DocxSource::open(path)?))
    } else {
        Ok(Box::new(PlainTextSource::open(path)?))
    }
}

fn package_error(e: ZipError) -> DocumentError {
    match e {
        ZipError::FileNotFound => DocumentError::MissingPart(DOCUMENT_PART.to_string()),
        ZipError::Io(io) => DocumentError::Io(io),
        other => DocumentError::InvalidPackage(other.to_string()),
    }
}

fn xml_error(e: quick_xml::Error) -> DocumentError {
    DocumentError::Xml(e.to_string())
}

/// Collect the non-blank text of every top-level body paragraph
fn body_paragraphs(xml: &str) -> Result<Vec<String>, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    let mut paragraph_depth = 0usize;
    let mut table_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        // Only the outermost paragraph outside any table contributes text
        let collecting = paragraph_depth == 1 && table_depth == 0;

        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = collecting,
                _ => {}
            },
            Event::Empty(e) if collecting && run_depth > 0 => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                current.push_str(&t.unescape().map_err(xml_error)?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:p" => {
                    if collecting && !current.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
