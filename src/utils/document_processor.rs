use crate::config::ParserConfig;
use crate::core::parser::parse_path;
use crate::core::writer::Writer;
use anyhow::{Context, Result};
use log::{debug, error, info};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_EXTENSIONS: &[&str] = &["di", "xml"];

/// Outcome of a directory conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written to the output directory.
    pub converted: Vec<PathBuf>,
    /// Inputs that could not be converted, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts directories of documents with one configured writer.
pub struct DocumentProcessor {
    config: ParserConfig,
}

impl DocumentProcessor {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Convert every document in `input_dir` and write the results into `output_dir`.
    ///
    /// One bad file never stops the others; it is logged and listed in the report.
    pub fn process_directory<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchReport> {
        let input_path = input_dir.as_ref();
        let output_path = output_dir.as_ref();

        info!("Starting to process documents from: {}", input_path.display());

        // Create output directory if it doesn't exist
        fs::create_dir_all(output_path)
            .with_context(|| format!("Failed to create output directory {}", output_path.display()))?;

        let entries = fs::read_dir(input_path)
            .with_context(|| format!("Failed to read input directory {}", input_path.display()))?;

        // Collect document files only; subdirectories are not descended into
        let mut files = Vec::new();
        for entry in entries {
            let file_path = entry.context("Failed to read directory entry")?.path();
            if file_path.is_file() && is_document(&file_path) {
                files.push(file_path);
            } else {
                debug!("Skipping entry: {:?}", file_path.file_name());
            }
        }
        files.sort();

        // Convert in parallel, then report in sorted input order
        let writer = self.config.writer();
        let results: Vec<_> = files
            .into_par_iter()
            .map(|file_path| {
                let result = self.convert_file(&file_path, output_path, &*writer);
                (file_path, result)
            })
            .collect();

        let mut report = BatchReport::default();
        for (file_path, result) in results {
            match result {
                Ok(written) => {
                    info!("Converted {} -> {}", file_path.display(), written.display());
                    report.converted.push(written);
                }
                Err(e) => {
                    error!("Failed to convert {}: {:#}", file_path.display(), e);
                    report.failed.push((file_path, format!("{e:#}")));
                }
            }
        }

        info!(
            "Completed processing: {} converted, {} failed",
            report.converted.len(),
            report.failed.len()
        );
        Ok(report)
    }

    /// Convert one file and return the path written.
    pub fn convert_file(&self, file_path: &Path, output_dir: &Path, writer: &dyn Writer) -> Result<PathBuf> {
        let document = parse_path(file_path)
            .with_context(|| format!("Failed to parse document {}", file_path.display()))?;
        let rendered = writer.render(&document)?;

        let stem = file_path.file_stem().unwrap_or_default().to_string_lossy();
        let output_file = output_dir.join(format!("{}.{}", stem, writer.extension()));
        fs::write(&output_file, rendered)
            .with_context(|| format!("Failed to write {}", output_file.display()))?;

        Ok(output_file)
    }
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::writer::OutputFormat;
    use tempfile::TempDir;

    const MEMO: &str = r#"<簽><主旨><文字>簽請核示</文字></主旨><段落 段名="說明："><文字>內容</文字></段落></簽>"#;

    #[test]
    fn test_is_document() {
        assert!(is_document(Path::new("a/b.di")));
        assert!(is_document(Path::new("b.XML")));
        assert!(!is_document(Path::new("b.txt")));
        assert!(!is_document(Path::new("di")));
    }

    #[test]
    fn test_process_directory_collects_failures() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(input.path().join("good.di"), MEMO).unwrap();
        fs::write(input.path().join("bad.xml"), "<公告/>").unwrap();
        fs::write(input.path().join("notes.txt"), "skip me").unwrap();

        let config = ParserConfig {
            format: OutputFormat::Text,
            ..ParserConfig::default()
        };
        let report = DocumentProcessor::new(config)
            .process_directory(input.path(), output.path().join("out"))
            .unwrap();

        assert_eq!(report.converted, vec![output.path().join("out").join("good.txt")]);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].1.contains("not supported"));
        assert!(!report.is_success());

        let written = fs::read_to_string(&report.converted[0]).unwrap();
        assert_eq!(written, "簽 | n/a | n/a\n簽請核示\n內容");
    }

    #[test]
    fn test_missing_input_directory() {
        let output = TempDir::new().unwrap();
        let result = DocumentProcessor::new(ParserConfig::default())
            .process_directory(output.path().join("missing"), output.path());
        assert!(result.is_err());
    }
}
