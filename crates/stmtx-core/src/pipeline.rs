//! Per-document extraction: text layer, quality gate, OCR fallback, fields.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::models::config::StmtxConfig;
use crate::models::record::FieldRecord;
use crate::ocr::{OcrExtractor, OcrSource};
use crate::pdf::{PdfTextSource, TextExtraction, TextSource};
use crate::statement::StatementParser;

/// Where the text used for field extraction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    /// The PDF text layer passed the quality gate.
    Direct,
    /// The OCR fallback was used.
    Ocr,
}

/// Result of processing one document.
#[derive(Debug, Clone)]
pub struct ProcessedStatement {
    pub record: FieldRecord,
    pub origin: TextOrigin,
    /// Characters of text handed to the field extractor.
    pub text_len: usize,
}

/// Runs the two extraction tiers and the field parser for one file at a time.
pub struct StatementPipeline {
    text_source: Box<dyn TextSource>,
    ocr_source: Box<dyn OcrSource>,
    parser: StatementParser,
    min_text_length: usize,
}

impl StatementPipeline {
    pub fn new(
        text_source: Box<dyn TextSource>,
        ocr_source: Box<dyn OcrSource>,
        parser: StatementParser,
        min_text_length: usize,
    ) -> Self {
        Self {
            text_source,
            ocr_source,
            parser,
            min_text_length,
        }
    }

    /// Build the default pipeline (pdf-extract text layer, configured OCR engine).
    pub fn from_config(config: &StmtxConfig) -> Result<Self, OcrError> {
        let ocr = OcrExtractor::from_config(&config.ocr, config.pdf.render_dpi)?;
        Ok(Self::new(
            Box::new(PdfTextSource::new()),
            Box::new(ocr),
            StatementParser::new(),
            config.pdf.min_text_length,
        ))
    }

    /// Whether direct text is good enough to skip OCR.
    pub fn passes_quality_gate(&self, extraction: &TextExtraction) -> bool {
        extraction.text().is_some() && extraction.trimmed_len() >= self.min_text_length
    }

    /// Process the document at `path`. Extraction failures are logged and
    /// surface as absent fields; this never fails.
    pub fn process(&self, path: &Path) -> ProcessedStatement {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let direct = self.text_source.extract_text(path);
        let (text, origin) = if self.passes_quality_gate(&direct) {
            (direct.into_text().unwrap_or_default(), TextOrigin::Direct)
        } else {
            debug!(
                "{}: text layer has {} chars (< {}), falling back to OCR",
                file,
                direct.trimmed_len(),
                self.min_text_length
            );
            let text = match self.ocr_source.ocr_text(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("OCR failed for {}: {}", path.display(), e);
                    String::new()
                }
            };
            (text, TextOrigin::Ocr)
        };

        let record = self.parser.parse(&text).with_file(file);
        info!(
            "{}: {} fields via {:?} text",
            record.file,
            record.found_count(),
            origin
        );

        ProcessedStatement {
            record,
            origin,
            text_len: text.chars().count(),
        }
    }
}
