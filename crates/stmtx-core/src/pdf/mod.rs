//! PDF text-layer extraction.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextSource};

use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Outcome of reading a document's text layer.
#[derive(Debug)]
pub enum TextExtraction {
    /// The text layer contained text (pages joined with newlines).
    Text(String),
    /// The document opened but its text layer is blank.
    Empty,
    /// The document could not be read or parsed.
    Failed(PdfError),
}

impl TextExtraction {
    /// Classify joined page text.
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            TextExtraction::Empty
        } else {
            TextExtraction::Text(text)
        }
    }

    /// The extracted text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            TextExtraction::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Number of characters left after trimming surrounding whitespace.
    pub fn trimmed_len(&self) -> usize {
        self.text().map(|t| t.trim().chars().count()).unwrap_or(0)
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            TextExtraction::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A source of direct (non-OCR) document text.
pub trait TextSource {
    /// Read the text layer of the document at `path`. Never panics.
    fn extract_text(&self, path: &Path) -> TextExtraction;
}
