// src/extractors/strategy.rs
use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::extractors::labels::LabelScanner;
use crate::extractors::named::NamedFieldExtractor;
use crate::extractors::result::ExtractionResult;
use crate::extractors::uppercase::UppercaseRunExtractor;
use crate::utils::error::ExtractError;

/// Which part of the document a strategy reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextScope {
    /// Text before the first boundary keyword.
    Header,
    /// The whole extracted text.
    FullText,
}

/// One policy for turning document text into labelled party names.
pub trait FieldExtractionStrategy {
    fn name(&self) -> &'static str;

    fn scope(&self) -> TextScope;

    /// The literal strings this strategy looks for, used for debug annotation.
    fn terms(&self) -> Vec<&str>;

    /// Never fails: text that doesn't match simply contributes nothing.
    fn extract(&self, text: &str) -> ExtractionResult;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// `LABEL: value` lines matched against the label vocabulary
    #[default]
    LineScan,
    /// Fixed literal prefixes ("Parte Ativa: ", ...) searched over the whole header
    NamedFields,
    /// Uppercase names following each search term anywhere in the document
    UppercaseRun,
}

/// Builds the strategy selected in `config` from its term tables.
pub fn build_strategy(config: &ExtractorConfig) -> Result<Box<dyn FieldExtractionStrategy>, ExtractError> {
    let strategy: Box<dyn FieldExtractionStrategy> = match config.strategy {
        StrategyKind::LineScan => Box::new(LabelScanner::new(&config.vocabulary)?),
        StrategyKind::NamedFields => Box::new(NamedFieldExtractor::new(&config.named_fields)?),
        StrategyKind::UppercaseRun => Box::new(UppercaseRunExtractor::new(&config.uppercase_terms)?),
    };
    tracing::debug!("Using '{}' extraction strategy", strategy.name());
    Ok(strategy)
}
