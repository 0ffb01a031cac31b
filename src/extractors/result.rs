// src/extractors/result.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A string to look for in the text, plus the short key its value is saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSearchTerm")]
pub struct SearchTerm {
    pub term: String,
    pub code: String,
}

// Config files may list bare labels ("APELANTE") or explicit {term, code} pairs.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSearchTerm {
    Bare(String),
    Coded { term: String, code: String },
}

impl From<RawSearchTerm> for SearchTerm {
    fn from(raw: RawSearchTerm) -> Self {
        match raw {
            RawSearchTerm::Bare(term) => SearchTerm::from_label(&term),
            RawSearchTerm::Coded { term, code } => SearchTerm { term, code },
        }
    }
}

impl SearchTerm {
    pub fn new(term: &str, code: &str) -> Self {
        Self { term: term.to_string(), code: code.to_string() }
    }

    /// Uses the label itself as the search term and derives the code from it:
    /// "MINISTÉRIO PÚBLICO" -> "ministério_público", "Parte Ativa: " -> "parte_ativa".
    pub fn from_label(label: &str) -> Self {
        Self { term: label.to_string(), code: derive_code(label) }
    }
}

fn derive_code(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField {
    pub code: String,
    pub value: String,
}

/// Values found in one document, keyed by search term in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    fields: IndexMap<String, ExtractedField>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value unless the term already has one. Returns whether it was stored.
    pub fn insert(&mut self, term: &SearchTerm, value: &str) -> bool {
        if self.fields.contains_key(&term.term) {
            return false;
        }
        self.fields.insert(
            term.term.clone(),
            ExtractedField { code: term.code.clone(), value: value.to_string() },
        );
        true
    }

    #[cfg(test)]
    pub fn get(&self, term: &str) -> Option<&str> {
        self.fields.get(term).map(|f| f.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtractedField)> {
        self.fields.iter().map(|(term, field)| (term.as_str(), field))
    }

    /// Re-keys the values by short code. When several terms share a code the first one found wins.
    pub fn by_code(&self) -> IndexMap<String, String> {
        let mut out = IndexMap::new();
        for field in self.fields.values() {
            out.entry(field.code.clone()).or_insert_with(|| field.value.clone());
        }
        out
    }
}
