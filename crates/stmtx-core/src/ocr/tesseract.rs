//! Recognition through the `tesseract` command-line tool.

use std::path::Path;
use std::process::Command;

use super::OcrBackend;
use crate::error::OcrError;

/// OCR backend running `tesseract <image> stdout`.
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    binary: String,
    language: Option<String>,
}

impl TesseractBackend {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: None,
        }
    }

    /// Set the recognition language. `None` keeps tesseract's default.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Check whether the binary can be executed.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let mut command = Command::new(&self.binary);
        command.arg(image.as_os_str()).arg("stdout");
        if let Some(language) = &self.language {
            command.arg("-l").arg(language);
        }

        let output = command.output().map_err(|e| {
            OcrError::Recognition(format!(
                "failed to run tesseract (is it installed? path='{}'): {}",
                self.binary, e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary() {
        let backend = TesseractBackend::new("/nonexistent/tesseract");
        assert!(!backend.is_available());

        let err = backend.recognize(Path::new("page-1.png")).unwrap_err();
        assert!(matches!(err, OcrError::Recognition(_)));
        assert!(err.to_string().contains("/nonexistent/tesseract"));
    }

    #[test]
    fn test_language_defaults_to_engine_default() {
        let backend = TesseractBackend::default();
        assert!(backend.language.is_none());
        assert_eq!(backend.name(), "tesseract");

        let backend = backend.with_language(Some("eng".to_string()));
        assert_eq!(backend.language.as_deref(), Some("eng"));
    }
}
