//! Page rasterization with poppler's `pdftoppm`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use super::PageRenderer;
use crate::error::OcrError;

/// Prefix of the image files written by the renderer.
const PAGE_PREFIX: &str = "page";

/// Page images of one document. The files are deleted when this is dropped.
#[derive(Debug)]
pub struct RenderedPages {
    _dir: TempDir,
    pages: Vec<PathBuf>,
}

impl RenderedPages {
    pub fn new(dir: TempDir, pages: Vec<PathBuf>) -> Self {
        Self { _dir: dir, pages }
    }

    /// Image paths in page order.
    pub fn pages(&self) -> &[PathBuf] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Renders pages by invoking `pdftoppm -r <dpi> -png`.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    binary: String,
}

impl PdftoppmRenderer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PdftoppmRenderer {
    fn default() -> Self {
        Self::new("pdftoppm")
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render(&self, pdf: &Path, dpi: u32) -> Result<RenderedPages, OcrError> {
        let dir = tempfile::tempdir()
            .map_err(|e| OcrError::Render(format!("failed to create temp dir: {}", e)))?;
        let prefix = dir.path().join(PAGE_PREFIX);

        let output = Command::new(&self.binary)
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg(pdf.as_os_str())
            .arg(prefix.as_os_str())
            .output()
            .map_err(|e| {
                OcrError::Render(format!(
                    "failed to run {} (is poppler installed?): {}",
                    self.binary, e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Render(format!(
                "{} exited with code {}: {}",
                self.binary,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let pages = collect_pages(dir.path())?;
        debug!("Rendered {} pages of {} at {} DPI", pages.len(), pdf.display(), dpi);

        Ok(RenderedPages::new(dir, pages))
    }
}

/// Collect `page-N.png` files sorted by page number.
///
/// pdftoppm zero-pads the page number to the width of the page count, so the
/// number is parsed rather than relying on lexical order.
fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| OcrError::Render(format!("failed to list rendered pages: {}", e)))?;

    let mut pages: Vec<(u32, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();

    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let number = stem.strip_prefix(PAGE_PREFIX)?.strip_prefix('-')?;
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("/tmp/x/page-012.png")), Some(12));
        assert_eq!(page_number(Path::new("/tmp/x/page-1.ppm")), None);
        assert_eq!(page_number(Path::new("/tmp/x/other-1.png")), None);
    }

    #[test]
    fn test_collect_pages_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-02.png", "page-1.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let pages = collect_pages(dir.path()).unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-02.png", "page-10.png"]);
    }

    #[test]
    fn test_missing_binary_is_render_error() {
        let renderer = PdftoppmRenderer::new("/nonexistent/pdftoppm");
        let err = renderer.render(Path::new("statement.pdf"), 200).unwrap_err();
        assert!(matches!(err, OcrError::Render(_)));
    }
}
