//! Pure Rust OCR backend using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use super::OcrBackend;
use crate::error::OcrError;

/// Vertical distance (pixels) within which boxes count as one line.
const ROW_HEIGHT: f32 = 20.0;

/// OCR backend backed by `pure-onnx-ocr` PaddleOCR models.
pub struct OnnxOcrBackend {
    engine: pure_onnx_ocr::engine::OcrEngine,
}

impl OnnxOcrBackend {
    /// Create a backend from model files in a directory.
    pub fn from_dir(model_dir: &Path) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("latin_rec.onnx");
        let dict_path = model_dir.join("latin_dict.txt");

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "missing model file {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine })
    }
}

impl OcrBackend for OnnxOcrBackend {
    fn name(&self) -> &'static str {
        "onnx"
    }

    fn recognize(&self, page: &Path) -> Result<String, OcrError> {
        let start = Instant::now();
        let image = image::open(page)
            .map_err(|e| OcrError::Recognition(format!("failed to load page image: {}", e)))?;

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut lines: Vec<((f32, f32), String)> = results
            .iter()
            .map(|r| (top_left(&r.bounding_box), r.text.replace("[UNK]", " ")))
            .collect();

        // Reading order: rows top to bottom, then left to right
        lines.sort_by(|((ax, ay), _), ((bx, by), _)| {
            let row_a = (ay / ROW_HEIGHT) as i32;
            let row_b = (by / ROW_HEIGHT) as i32;
            row_a
                .cmp(&row_b)
                .then(ax.partial_cmp(bx).unwrap_or(std::cmp::Ordering::Equal))
        });

        let text = lines
            .into_iter()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join("\n");

        debug!("OCR page complete in {}ms", start.elapsed().as_millis());
        Ok(text)
    }
}

/// Smallest x and y over the first four exterior points of a region polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .take(4)
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_models_is_model_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OnnxOcrBackend::from_dir(dir.path()).err().unwrap();
        assert!(matches!(err, OcrError::ModelLoad(_)));
    }
}
