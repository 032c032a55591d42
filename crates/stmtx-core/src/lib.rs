//! Core library for credit-card statement extraction.
//!
//! This crate provides:
//! - PDF text-layer extraction with typed outcomes
//! - OCR fallback (page rendering plus a pluggable recognition backend)
//! - Statement field extraction (card suffix, billing cycle, due date, total due, variant)
//! - The per-file pipeline tying the two extraction tiers to the field parser

pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod statement;

pub use error::{OcrError, PdfError, Result, StmtxError};
pub use models::config::{OcrConfig, OcrEngineKind, PdfConfig, StmtxConfig};
pub use models::record::{Field, FieldRecord, StatementTable, NOT_FOUND};
pub use ocr::{
    OcrBackend, OcrExtractor, OcrSource, PageRenderer, PdftoppmRenderer, TesseractBackend,
};
#[cfg(feature = "onnx")]
pub use ocr::OnnxOcrBackend;
pub use pdf::{PdfExtractor, PdfTextSource, TextExtraction, TextSource};
pub use pipeline::{ProcessedStatement, StatementPipeline, TextOrigin};
pub use statement::{PatternSet, StatementParser};
