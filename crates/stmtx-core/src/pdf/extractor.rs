//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::{Result, TextExtraction, TextSource};
use crate::error::PdfError;

/// PDF content extractor using lopdf for loading and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Statements are often "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Load a PDF from a file on disk.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path)?;
        self.load(&data)
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract the text of every page, in page order.
    ///
    /// Pages without a text layer yield an empty string. pdf-extract can
    /// panic on malformed font programs, so the call is isolated and a panic
    /// is reported as [`PdfError::TextExtraction`].
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("no document loaded".to_string()));
        }

        let data = &self.raw_data;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(PdfError::TextExtraction(e.to_string())),
            Err(_) => Err(PdfError::TextExtraction(
                "text extraction panicked".to_string(),
            )),
        }
    }

    /// Extract text from the entire PDF, pages joined with a newline.
    pub fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.join("\n"))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// [`TextSource`] reading the text layer of PDF files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }

    fn read(path: &Path) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load_file(path)?;
        extractor.extract_text()
    }
}

impl TextSource for PdfTextSource {
    fn extract_text(&self, path: &Path) -> TextExtraction {
        match Self::read(path) {
            Ok(text) => {
                let outcome = TextExtraction::from_text(text);
                debug!(
                    "Text layer of {}: {} chars",
                    path.display(),
                    outcome.trimmed_len()
                );
                outcome
            }
            Err(e) => {
                warn!("Text extraction failed for {}: {}", path.display(), e);
                TextExtraction::Failed(e)
            }
        }
    }
}
