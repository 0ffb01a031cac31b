// src/pipeline.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExtractorConfig;
use crate::extractors::{
    build_strategy, BoundaryLocator, BoundaryMatch, ExtractionResult, FieldExtractionStrategy, TextScope,
};
use crate::pdf::models::PageSelection;
use crate::pdf::reader;
use crate::storage::{AggregateOutcome, ResultWriter};
use crate::utils::error::{AppError, ExtractError};
use crate::utils::text_debug::{self, DebugLiteral};

/// What the extractor found in one document's text.
#[derive(Debug, Clone)]
pub struct FieldReport {
    pub boundary: Option<BoundaryMatch>, // None when no keyword occurred or the strategy reads the full text
    pub result: ExtractionResult,
}

/// Boundary locator plus the configured strategy. Built once and reused for every document;
/// it holds no per-document state.
pub struct FieldExtractor {
    locator: BoundaryLocator,
    strategy: Box<dyn FieldExtractionStrategy>,
}

impl FieldExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        Ok(Self {
            locator: BoundaryLocator::new(&config.boundary_keywords, config.case_sensitive_boundaries)?,
            strategy: build_strategy(config)?,
        })
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn extract(&self, text: &str) -> FieldReport {
        match self.strategy.scope() {
            TextScope::Header => {
                let header = self.locator.locate(text);
                if !header.found() {
                    tracing::warn!("No boundary keyword found; scanning the whole text");
                }
                FieldReport { result: self.strategy.extract(header.text), boundary: header.boundary }
            }
            TextScope::FullText => FieldReport { boundary: None, result: self.strategy.extract(text) },
        }
    }

    /// Literals worth highlighting in a debug dump, matched the way extraction matches them.
    /// Term hits are always case-insensitive so near-misses of case-sensitive prefixes still show up.
    fn debug_literals(&self) -> Vec<DebugLiteral<'_>> {
        let case_sensitive = self.locator.is_case_sensitive();
        let boundaries = self
            .locator
            .keywords()
            .iter()
            .map(move |k| DebugLiteral { literal: k.as_str(), kind: "boundary", case_sensitive });
        let terms = self
            .strategy
            .terms()
            .into_iter()
            .map(|t| DebugLiteral { literal: t, kind: "term", case_sensitive: false });
        boundaries.chain(terms).collect()
    }
}

/// Per-run settings that aren't about extraction itself.
pub struct RunOptions {
    pub pages: PageSelection,
    pub debug_dir: Option<PathBuf>,
}

/// Reads one PDF, extracts its fields and persists them.
/// Any failure is confined to this document; the caller decides whether to continue.
pub fn process_document(
    path: &Path,
    extractor: &FieldExtractor,
    writer: &ResultWriter,
    options: &RunOptions,
) -> Result<AggregateOutcome, AppError> {
    let document = reader::extract_document_text(path, options.pages)?;
    tracing::debug!("Extracted {} chars from {} page(s)", document.text.len(), document.page_count);

    if let Some(debug_dir) = &options.debug_dir {
        if let Err(e) = save_debug_artifacts(debug_dir, path, &document.text, extractor) {
            tracing::warn!("Failed to save debug artifacts for {}: {}", path.display(), e);
        }
    }

    let report = extractor.extract(&document.text);
    if let Some(boundary) = &report.boundary {
        tracing::debug!("Header cut at '{}' (offset {})", boundary.keyword, boundary.offset);
    }
    tracing::info!("Found {} field(s) in {}", report.result.len(), path.display());
    for (term, field) in report.result.iter() {
        tracing::debug!("  {} ({}): {}", term, field.code, field.value);
    }

    Ok(writer.aggregate(path, &report.result)?)
}

/// Tally of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub empty: usize,
    pub failed: usize,
}

impl BatchSummary {
    /// True when documents were attempted and none of them got through.
    pub fn all_failed(&self) -> bool {
        self.saved + self.empty == 0 && self.failed > 0
    }
}

/// Processes every document in order. One document's failure never stops the batch.
pub fn run_batch(
    documents: &[PathBuf],
    extractor: &FieldExtractor,
    writer: &ResultWriter,
    options: &RunOptions,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in documents {
        tracing::info!("Processing document: {}", path.display());

        match process_document(path, extractor, writer, options) {
            Ok(AggregateOutcome::Persisted(_)) => summary.saved += 1,
            Ok(AggregateOutcome::Skipped) => summary.empty += 1,
            Err(AppError::Pdf(e)) if e.is_not_found() => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                summary.failed += 1;
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        "Processing finished. Saved: {}, No matches: {}, Failures: {}",
        summary.saved, summary.empty, summary.failed
    );
    summary
}

fn save_debug_artifacts(debug_dir: &Path, source: &Path, text: &str, extractor: &FieldExtractor) -> Result<(), AppError> {
    fs::create_dir_all(debug_dir)?;
    let stem = source.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();

    let raw_path = debug_dir.join(format!("{}_raw.txt", stem));
    fs::write(&raw_path, text)?;
    tracing::info!("Saved raw text to: {}", raw_path.display());

    let annotated_path = debug_dir.join(format!("{}_annotated.txt", stem));
    text_debug::create_debug_text(text, &annotated_path, &extractor.debug_literals())
}
