// src/extractors/labels.rs

// --- Imports ---
use crate::extractors::result::{ExtractionResult, SearchTerm};
use crate::extractors::strategy::{FieldExtractionStrategy, TextScope};
use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

// PDF text mixes Unix and old Mac line endings depending on the producer.
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\n|\r").expect("Failed to compile LINE_BREAK_RE")
});

/// Splits on any line break, keeping empty lines in place.
pub fn split_lines(text: &str) -> Vec<&str> {
    LINE_BREAK_RE.split(text).collect()
}

/// Scans header lines for `LABEL: value`, one label at a time.
#[derive(Debug, Clone)]
pub struct LabelScanner {
    labels: Vec<(SearchTerm, Regex)>,
}

impl LabelScanner {
    pub fn new(vocabulary: &[SearchTerm]) -> Result<Self, ExtractError> {
        let mut labels = Vec::with_capacity(vocabulary.len());

        for entry in vocabulary {
            if entry.term.is_empty() {
                return Err(ExtractError::EmptyTerm("label vocabulary"));
            }
            // Label at line start, then exactly ": " and at least one character of value.
            let pattern = format!(r"^{}: (.+)$", regex::escape(&entry.term));
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ExtractError::InvalidPattern {
                    term: entry.term.clone(),
                    message: e.to_string(),
                })?;
            labels.push((entry.clone(), re));
        }

        Ok(Self { labels })
    }

    /// Records, for each label, the value from the first line carrying it.
    /// Labels with no matching line are left out of the result.
    pub fn scan_labels(&self, header: &str) -> ExtractionResult {
        let lines = split_lines(header);
        let mut result = ExtractionResult::new();

        for (entry, re) in &self.labels {
            let value = lines
                .iter()
                .find_map(|line| re.captures(line).and_then(|caps| caps.get(1)));

            if let Some(value) = value {
                tracing::trace!("Label '{}' matched value '{}'", entry.term, value.as_str());
                result.insert(entry, value.as_str());
            }
        }

        result
    }
}

impl FieldExtractionStrategy for LabelScanner {
    fn name(&self) -> &'static str {
        "line-scan"
    }

    fn scope(&self) -> TextScope {
        TextScope::Header
    }

    fn terms(&self) -> Vec<&str> {
        self.labels.iter().map(|(entry, _)| entry.term.as_str()).collect()
    }

    fn extract(&self, text: &str) -> ExtractionResult {
        self.scan_labels(text)
    }
}
