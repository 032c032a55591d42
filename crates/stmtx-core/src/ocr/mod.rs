//! OCR fallback: page rasterization plus a pluggable recognition backend.

mod render;
mod tesseract;
#[cfg(feature = "onnx")]
mod pure_engine;

pub use render::{PdftoppmRenderer, RenderedPages};
pub use tesseract::TesseractBackend;
#[cfg(feature = "onnx")]
pub use pure_engine::OnnxOcrBackend;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::OcrError;
use crate::models::config::{OcrConfig, OcrEngineKind};

/// Renders the pages of a PDF to image files.
pub trait PageRenderer {
    /// Render every page of `pdf` at `dpi`, returning image paths in page order.
    fn render(&self, pdf: &Path, dpi: u32) -> Result<RenderedPages, OcrError>;
}

/// Recognizes text in a single page image.
pub trait OcrBackend {
    /// Short engine name for logging.
    fn name(&self) -> &'static str;

    /// Run recognition on the image at `image`.
    fn recognize(&self, image: &Path) -> Result<String, OcrError>;
}

/// A source of OCR text for a whole document.
pub trait OcrSource {
    fn ocr_text(&self, pdf: &Path) -> Result<String, OcrError>;
}

/// Rasterizes a PDF and runs every page through an OCR backend.
pub struct OcrExtractor {
    renderer: Box<dyn PageRenderer>,
    backend: Box<dyn OcrBackend>,
    dpi: u32,
}

impl OcrExtractor {
    /// Create an extractor from explicit parts.
    pub fn new(renderer: Box<dyn PageRenderer>, backend: Box<dyn OcrBackend>, dpi: u32) -> Self {
        Self {
            renderer,
            backend,
            dpi,
        }
    }

    /// Build the renderer and backend selected by `config`.
    pub fn from_config(config: &OcrConfig, dpi: u32) -> Result<Self, OcrError> {
        let renderer = Box::new(PdftoppmRenderer::new(&config.pdftoppm_path));
        let backend: Box<dyn OcrBackend> = match config.engine {
            OcrEngineKind::Tesseract => {
                let backend = TesseractBackend::new(&config.tesseract_path)
                    .with_language(config.language.clone());
                if !backend.is_available() {
                    warn!(
                        "tesseract not found at '{}'; scanned statements will have no fields",
                        config.tesseract_path
                    );
                }
                Box::new(backend)
            }
            #[cfg(feature = "onnx")]
            OcrEngineKind::Onnx => Box::new(OnnxOcrBackend::from_dir(&config.model_dir)?),
            #[cfg(not(feature = "onnx"))]
            OcrEngineKind::Onnx => {
                return Err(OcrError::Unsupported(
                    "onnx (rebuild with the `onnx` feature)".to_string(),
                ));
            }
        };

        info!("OCR fallback: {} at {} DPI", backend.name(), dpi);
        Ok(Self::new(renderer, backend, dpi))
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

impl OcrSource for OcrExtractor {
    /// Page texts are concatenated with no separator.
    fn ocr_text(&self, pdf: &Path) -> Result<String, OcrError> {
        let rendered = self.renderer.render(pdf, self.dpi)?;
        if rendered.is_empty() {
            return Err(OcrError::NoPages);
        }

        let mut text = String::new();
        for (i, page) in rendered.pages().iter().enumerate() {
            let page_text = self.backend.recognize(page)?;
            debug!("OCR page {}: {} chars", i + 1, page_text.len());
            text.push_str(&page_text);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    struct FixedRenderer {
        pages: usize,
    }

    impl PageRenderer for FixedRenderer {
        fn render(&self, _pdf: &Path, dpi: u32) -> Result<RenderedPages, OcrError> {
            assert_eq!(dpi, 200);
            let dir = tempfile::tempdir().map_err(|e| OcrError::Render(e.to_string()))?;
            let pages = (1..=self.pages)
                .map(|n| dir.path().join(format!("page-{}.png", n)))
                .collect();
            Ok(RenderedPages::new(dir, pages))
        }
    }

    struct EchoBackend {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl OcrBackend for EchoBackend {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn recognize(&self, image: &Path) -> Result<String, OcrError> {
            self.seen.borrow_mut().push(image.to_path_buf());
            let stem = image.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            Ok(format!("[{}]", stem))
        }
    }

    struct FailingBackend;

    impl OcrBackend for FailingBackend {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn recognize(&self, _image: &Path) -> Result<String, OcrError> {
            Err(OcrError::Recognition("engine crashed".to_string()))
        }
    }

    #[test]
    fn test_pages_concatenated_without_separator() {
        let extractor = OcrExtractor::new(
            Box::new(FixedRenderer { pages: 3 }),
            Box::new(EchoBackend {
                seen: RefCell::new(Vec::new()),
            }),
            200,
        );

        let text = extractor.ocr_text(Path::new("statement.pdf")).unwrap();
        assert_eq!(text, "[page-1][page-2][page-3]");
    }

    #[test]
    fn test_zero_pages_is_error() {
        let extractor = OcrExtractor::new(
            Box::new(FixedRenderer { pages: 0 }),
            Box::new(FailingBackend),
            200,
        );
        assert!(matches!(
            extractor.ocr_text(Path::new("statement.pdf")),
            Err(OcrError::NoPages)
        ));
    }

    #[test]
    fn test_backend_failure_propagates() {
        let extractor = OcrExtractor::new(
            Box::new(FixedRenderer { pages: 1 }),
            Box::new(FailingBackend),
            200,
        );
        assert!(matches!(
            extractor.ocr_text(Path::new("statement.pdf")),
            Err(OcrError::Recognition(_))
        ));
    }

    #[test]
    fn test_from_config_uses_tesseract_by_default() {
        let extractor = OcrExtractor::from_config(&OcrConfig::default(), 200).unwrap();
        assert_eq!(extractor.backend_name(), "tesseract");
        assert_eq!(extractor.dpi(), 200);
    }

    #[cfg(not(feature = "onnx"))]
    #[test]
    fn test_onnx_requires_feature() {
        let config = OcrConfig {
            engine: OcrEngineKind::Onnx,
            ..OcrConfig::default()
        };
        assert!(matches!(
            OcrExtractor::from_config(&config, 200),
            Err(OcrError::Unsupported(_))
        ));
    }
}
