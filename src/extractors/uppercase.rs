// src/extractors/uppercase.rs
use crate::extractors::result::{ExtractionResult, SearchTerm};
use crate::extractors::strategy::{FieldExtractionStrategy, TextScope};
use crate::utils::error::ExtractError;
use regex::{Regex, RegexBuilder};

/// Lazily yields the uppercase run following each occurrence of a term.
///
/// Each call to [`UppercaseRunExtractor::runs`] starts a new search from the top of the text.
#[derive(Debug, Clone)]
pub struct UppercaseRuns<'t> {
    term_re: Regex,
    text: &'t str,
    pos: usize,
}

impl<'t> UppercaseRuns<'t> {
    fn new(term_re: Regex, text: &'t str) -> Self {
        Self { term_re, text, pos: 0 }
    }
}

impl<'t> Iterator for UppercaseRuns<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        let text = self.text;
        while self.pos <= text.len() {
            let mat = self.term_re.find_at(text, self.pos)?;

            match find_run(text, mat.end()) {
                Some((start, end)) => {
                    self.pos = end;
                    return Some(text[start..end].trim());
                }
                None => self.pos = next_char_boundary(text, mat.start()),
            }
        }
        None
    }
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}

/// Looks between `from` and the next '.' for the leftmost run that starts with an uppercase
/// letter, continues over uppercase letters and whitespace for at least two characters, and
/// is directly followed by a lowercase letter, a '.', or the end of the text.
fn find_run(text: &str, from: usize) -> Option<(usize, usize)> {
    let window_end = text[from..].find('.').map_or(text.len(), |i| from + i);
    let window = &text[from..window_end];
    let mut chars = window.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !c.is_uppercase() {
            continue;
        }

        let start = from + idx;
        let mut end = start + c.len_utf8();
        let mut len = 1;
        while let Some(&(j, d)) = chars.peek() {
            if !(d.is_uppercase() || d.is_whitespace()) {
                break;
            }
            end = from + j + d.len_utf8();
            len += 1;
            chars.next();
        }

        // Later starts inside the same run share its follower, so one check covers them all.
        let follower_ok = match text[end..].chars().next() {
            None => true,
            Some(f) => f == '.' || f.is_lowercase(),
        };
        if len >= 2 && follower_ok {
            return Some((start, end));
        }
    }

    None
}

/// Captures capitalised party names that follow a term anywhere in the document,
/// e.g. "apelante" in "... figurando como apelante JOÃO DA SILVA e outros."
#[derive(Debug, Clone)]
pub struct UppercaseRunExtractor {
    terms: Vec<(SearchTerm, Regex)>,
}

impl UppercaseRunExtractor {
    pub fn new(terms: &[SearchTerm]) -> Result<Self, ExtractError> {
        let mut compiled = Vec::with_capacity(terms.len());
        for term in terms {
            if term.term.is_empty() {
                return Err(ExtractError::EmptyTerm("uppercase-run terms"));
            }
            compiled.push((term.clone(), build_term_regex(&term.term)?));
        }
        Ok(Self { terms: compiled })
    }

    /// Every run captured after `term` in `text`, in document order.
    pub fn runs<'t>(&self, text: &'t str, term: &str) -> Result<UppercaseRuns<'t>, ExtractError> {
        let term_re = match self.terms.iter().find(|(t, _)| t.term == term) {
            Some((_, re)) => re.clone(),
            None => build_term_regex(term)?,
        };
        Ok(UppercaseRuns::new(term_re, text))
    }
}

fn build_term_regex(term: &str) -> Result<Regex, ExtractError> {
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .map_err(|e| ExtractError::InvalidPattern { term: term.to_string(), message: e.to_string() })
}

impl FieldExtractionStrategy for UppercaseRunExtractor {
    fn name(&self) -> &'static str {
        "uppercase-run"
    }

    fn scope(&self) -> TextScope {
        TextScope::FullText
    }

    fn terms(&self) -> Vec<&str> {
        self.terms.iter().map(|(t, _)| t.term.as_str()).collect()
    }

    fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();
        for (term, _) in &self.terms {
            // Compiled terms are found in the table, so this never rebuilds a regex.
            match self.runs(text, &term.term).map(|mut runs| runs.next()) {
                Ok(Some(first)) => {
                    result.insert(term, first);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping term '{}': {}", term.term, e),
            }
        }
        result
    }
}
