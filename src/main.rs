// src/main.rs
mod config;
mod extractors;
mod pdf;
mod pipeline;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::Parser;
use config::ExtractorConfig;
use extractors::StrategyKind;
use pdf::models::PageSelection;
use pipeline::{FieldExtractor, RunOptions};
use storage::ResultWriter;
use utils::AppError;

/// Extract party names (Apelante, Apelado, Embargante, ...) from judgment PDFs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PDF file, or a directory whose .pdf files are processed in name order
    input: PathBuf,

    /// Extraction strategy (overrides the config file)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Read only this 0-based page index instead of the full document (1 = second page)
    #[arg(short, long, conflicts_with = "full_text")]
    page: Option<usize>,

    /// Read every page even if the config file selects a single one
    #[arg(long)]
    full_text: bool,

    /// Match boundary keywords (VOTO, Ementa, ...) case-sensitively
    #[arg(long)]
    case_sensitive: bool,

    /// JSON file overriding the built-in keyword and label tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for result files (default: next to each PDF)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Debug mode - save raw and annotated page text for each document
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ExtractorConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => ExtractorConfig::from_json_file(path)?,
            None => ExtractorConfig::default(),
        };

        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(index) = self.page {
            config.pages = PageSelection::Single(index);
        } else if self.full_text {
            config.pages = PageSelection::Full;
        }
        if self.case_sensitive {
            config.case_sensitive_boundaries = true;
        }

        Ok(config)
    }

    fn debug_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join("debug"),
            None if self.input.is_dir() => self.input.join("debug"),
            None => self.input.parent().map(|p| p.join("debug")).unwrap_or_else(|| PathBuf::from("debug")),
        }
    }
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(args.debug);
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Build config, extractor and writer; problems here abort the whole run
    let config = args.resolve_config()?;
    let extractor = FieldExtractor::new(&config)?;
    let writer = ResultWriter::new(args.output_dir.as_ref(), &config.output_suffix)?;
    let options = RunOptions {
        pages: config.pages,
        debug_dir: args.debug.then(|| args.debug_dir()),
    };
    tracing::info!("Using '{}' strategy with page selection {:?}", extractor.strategy_name(), config.pages);

    // 4. Find the documents
    let documents = pdf::reader::collect_pdf_paths(&args.input)?;
    tracing::info!("Found {} PDF document(s)", documents.len());

    if documents.is_empty() {
        return Err(AppError::Config(format!("No PDF files found in {}", args.input.display())));
    }

    // 5. Process each document; one document's failure never stops the batch
    let summary = pipeline::run_batch(&documents, &extractor, &writer, &options);

    if summary.all_failed() {
        return Err(AppError::Processing(format!("Failed to process any of {} document(s)", summary.failed)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from(["party_extractor", "acordaos", "--strategy", "named-fields", "--page", "1", "--case-sensitive"]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.strategy, StrategyKind::NamedFields);
        assert_eq!(config.pages, PageSelection::Single(1));
        assert!(config.case_sensitive_boundaries);
    }

    #[test]
    fn test_defaults_without_flags() {
        let args = Args::parse_from(["party_extractor", "doc.pdf"]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.strategy, StrategyKind::LineScan);
        assert_eq!(config.pages, PageSelection::Full);
        assert_eq!(args.debug_dir(), PathBuf::from("debug"));
    }

    #[test]
    fn test_page_and_full_text_conflict() {
        let parsed = Args::try_parse_from(["party_extractor", "doc.pdf", "--page", "1", "--full-text"]);
        assert!(parsed.is_err());
    }
}
