// src/extractors/boundary.rs

// --- Imports ---
use crate::utils::error::ExtractError;
use regex::{Regex, RegexBuilder};

// --- Data Structures ---

/// Where the header region was cut, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMatch {
    pub keyword: String, // the text as it appears in the document, e.g. "Voto"
    pub offset: usize,   // byte offset of the keyword in the source text
}

/// The text believed to hold the party listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header<'a> {
    pub text: &'a str,
    pub boundary: Option<BoundaryMatch>,
}

impl Header<'_> {
    pub fn found(&self) -> bool {
        self.boundary.is_some()
    }
}

// --- Locator ---

/// Cuts a document at the earliest section-boundary keyword ("VOTO", "Ementa", ...).
#[derive(Debug, Clone)]
pub struct BoundaryLocator {
    keywords: Vec<String>,
    case_sensitive: bool,
    // Single alternation; leftmost-first search yields the minimum occurrence index directly.
    matcher: Option<Regex>,
}

impl BoundaryLocator {
    pub fn new(keywords: &[String], case_sensitive: bool) -> Result<Self, ExtractError> {
        let keywords: Vec<String> = keywords.iter().filter(|k| !k.is_empty()).cloned().collect();

        let matcher = if keywords.is_empty() {
            None
        } else {
            let alternation = keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let re = RegexBuilder::new(&alternation)
                .case_insensitive(!case_sensitive)
                .build()
                .map_err(|e| ExtractError::InvalidPattern {
                    term: keywords.join(", "),
                    message: e.to_string(),
                })?;
            Some(re)
        };

        Ok(Self { keywords, case_sensitive, matcher })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns the trimmed text before the first boundary keyword.
    /// With no keyword present the whole (trimmed) text is the header.
    pub fn locate<'a>(&self, text: &'a str) -> Header<'a> {
        let found = self.matcher.as_ref().and_then(|re| re.find(text));

        match found {
            Some(mat) => {
                tracing::debug!("Boundary keyword '{}' found at offset {}", mat.as_str(), mat.start());
                Header {
                    text: text[..mat.start()].trim(),
                    boundary: Some(BoundaryMatch {
                        keyword: mat.as_str().to_string(),
                        offset: mat.start(),
                    }),
                }
            }
            None => {
                tracing::debug!("No boundary keyword found; using the whole text as header");
                Header { text: text.trim(), boundary: None }
            }
        }
    }
}
