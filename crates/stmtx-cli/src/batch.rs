//! Batch processing of a folder of statement PDFs.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use stmtx_core::{StatementPipeline, StatementTable, StmtxConfig, TextOrigin};

use crate::output::write_csv_file;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Process every PDF in `input` and write the results to `output`.
pub fn run(input: &Path, output: &Path, config: &StmtxConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let files = discover_pdfs(input)?;
    info!("Found {} PDF files in {}", files.len(), input.display());

    let pipeline = StatementPipeline::from_config(config)
        .context("failed to set up the OCR fallback")?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)?
            .progress_chars("=>-"),
    );

    let mut table = StatementTable::new();
    let mut ocr_count = 0usize;

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);

        let processed = pipeline.process(path);
        if processed.origin == TextOrigin::Ocr {
            ocr_count += 1;
        }
        table.push(processed.record);

        pb.inc(1);
    }

    pb.finish_and_clear();

    if table.is_empty() {
        warn!("No PDF files found in {}", input.display());
    }

    write_csv_file(output, &table)?;
    debug!("Wrote {} rows to {}", table.len(), output.display());

    println!(
        "\n{} Done. Results saved to: {}",
        style("✓").green(),
        output.display()
    );
    println!(
        "   {} files processed ({} via OCR) in {:?}",
        style(table.len()).green(),
        style(ocr_count).yellow(),
        start.elapsed()
    );

    Ok(())
}

/// List folder entries whose name ends in `.pdf` (any case), in listing order.
pub fn discover_pdfs(folder: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("failed to read input folder {}", folder.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", folder.display()))?;
        if is_pdf_name(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    Ok(files)
}

fn is_pdf_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_name() {
        assert!(is_pdf_name("statement.pdf"));
        assert!(is_pdf_name("STATEMENT.PDF"));
        assert!(is_pdf_name("jan.Pdf"));
        assert!(!is_pdf_name("statement.pdf.txt"));
        assert!(!is_pdf_name("pdf"));
        assert!(!is_pdf_name("notes.txt"));
    }

    #[test]
    fn test_discover_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.pdf", "b.PDF", "c.txt", "d.pdfx"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let mut names: Vec<String> = discover_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn test_discover_missing_folder_fails() {
        let err = discover_pdfs(Path::new("/nonexistent/statements")).unwrap_err();
        assert!(err.to_string().contains("failed to read input folder"));
    }
}
