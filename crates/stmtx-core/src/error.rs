//! Error types for the stmtx-core library.

use thiserror::Error;

/// Main error type for the stmtx library.
#[derive(Error, Debug)]
pub enum StmtxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading the PDF text layer.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The file could not be read from disk.
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the OCR fallback.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Rendering pages to images failed.
    #[error("failed to render pages: {0}")]
    Render(String),

    /// The renderer produced no page images.
    #[error("no pages were rendered")]
    NoPages,

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The requested engine is not available in this build.
    #[error("unsupported OCR engine: {0}")]
    Unsupported(String),
}

/// Result type for the stmtx library.
pub type Result<T> = std::result::Result<T, StmtxError>;
