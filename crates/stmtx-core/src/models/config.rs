//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::StmtxError;

/// Main configuration for the stmtx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StmtxConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR fallback configuration.
    pub ocr: OcrConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// DPI for rendering PDF pages to images before OCR.
    pub render_dpi: u32,

    /// Minimum trimmed text length (in characters) to accept the text layer.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_dpi: 200,
            min_text_length: 50,
        }
    }
}

/// OCR engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngineKind {
    /// The `tesseract` command-line tool.
    #[default]
    Tesseract,
    /// PaddleOCR ONNX models through `pure-onnx-ocr`.
    Onnx,
}

impl std::fmt::Display for OcrEngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrEngineKind::Tesseract => write!(f, "tesseract"),
            OcrEngineKind::Onnx => write!(f, "onnx"),
        }
    }
}

/// OCR fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition engine.
    pub engine: OcrEngineKind,

    /// Path to the tesseract binary (relies on PATH by default).
    pub tesseract_path: String,

    /// Path to the pdftoppm binary used to rasterize pages.
    pub pdftoppm_path: String,

    /// OCR language. `None` keeps the engine's default.
    pub language: Option<String>,

    /// Directory with `det.onnx`, `latin_rec.onnx` and `latin_dict.txt`.
    pub model_dir: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: OcrEngineKind::Tesseract,
            tesseract_path: "tesseract".to_string(),
            pdftoppm_path: "pdftoppm".to_string(),
            language: None,
            model_dir: PathBuf::from("models"),
        }
    }
}

impl StmtxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, StmtxError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from JSON text. Missing keys take their defaults.
    pub fn from_json(content: &str) -> Result<Self, StmtxError> {
        serde_json::from_str(content).map_err(|e| StmtxError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pipeline_constants() {
        let config = StmtxConfig::default();
        assert_eq!(config.pdf.render_dpi, 200);
        assert_eq!(config.pdf.min_text_length, 50);
        assert_eq!(config.ocr.engine, OcrEngineKind::Tesseract);
        assert!(config.ocr.language.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = StmtxConfig::from_json(r#"{"ocr": {"engine": "onnx", "language": "eng"}}"#)
            .unwrap();
        assert_eq!(config.ocr.engine, OcrEngineKind::Onnx);
        assert_eq!(config.ocr.language.as_deref(), Some("eng"));
        assert_eq!(config.ocr.tesseract_path, "tesseract");
        assert_eq!(config.pdf.render_dpi, 200);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = StmtxConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, StmtxError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = StmtxConfig::default();
        config.pdf.min_text_length = 80;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = StmtxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.pdf.min_text_length, 80);
    }
}
