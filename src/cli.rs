//! Command-line surface of `di-parser`.
//!
//! Parsing and rendering live in [`crate::core`]; this module only wires arguments,
//! configuration and output destinations together.

use crate::config::{load_config, ParserConfig};
use crate::core::parser::{document_from_xml, Source};
use crate::core::writer::OutputFormat;
use crate::utils::document_processor::DocumentProcessor;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "di-parser",
    version,
    about = "Convert 函 / 簽 exchange documents into readable structured text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a single document
    Convert {
        /// Path to a .di file, inline markup, or `-` to read standard input
        input: String,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Strip stock phrases from the subject line
        #[arg(long)]
        concise: bool,
        /// Write to this file instead of standard output
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Convert every .di / .xml file in a directory
    Batch {
        input_dir: PathBuf,
        output_dir: PathBuf,
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn resolve_config(path: Option<&Path>, format: Option<OutputFormat>, concise: bool) -> Result<ParserConfig> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ParserConfig::default(),
    };
    if let Some(format) = format {
        config.format = format;
    }
    if concise {
        config.strip_redundant_words = true;
    }
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            format,
            config,
            concise,
            output,
        } => {
            let config = resolve_config(config.as_deref(), format, concise)?;
            let source = if input == "-" {
                Source::reader(std::io::stdin().lock())
            } else {
                Source::detect(&input)
            };
            let document = document_from_xml(source).context("Failed to parse document")?;
            let rendered = config.writer().render(&document)?;

            match output {
                Some(path) => {
                    fs::write(&path, &rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Wrote {}", path.display());
                }
                None => println!("{}", rendered.trim_end_matches('\n')),
            }
            Ok(())
        }
        Commands::Batch {
            input_dir,
            output_dir,
            format,
            config,
        } => {
            let config = resolve_config(config.as_deref(), format, false)?;
            let report = DocumentProcessor::new(config).process_directory(&input_dir, &output_dir)?;

            println!(
                "{} converted, {} failed",
                report.converted.len(),
                report.failed.len()
            );
            for (path, reason) in &report.failed {
                eprintln!("{}: {}", path.display(), reason);
            }
            if !report.is_success() {
                anyhow::bail!("{} document(s) failed to convert", report.failed.len());
            }
            Ok(())
        }
    }
}
