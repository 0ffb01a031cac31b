// src/extractors/named.rs
use crate::extractors::result::{ExtractionResult, SearchTerm};
use crate::extractors::strategy::{FieldExtractionStrategy, TextScope};
use crate::utils::error::ExtractError;
use regex::Regex;

/// Fixed set of named captures, each anchored to a literal prefix such as "Parte Ativa: ".
/// Every prefix is searched once over the whole header rather than line by line.
#[derive(Debug, Clone)]
pub struct NamedFieldExtractor {
    fields: Vec<(SearchTerm, Regex)>,
}

impl NamedFieldExtractor {
    pub fn new(fields: &[SearchTerm]) -> Result<Self, ExtractError> {
        let fields = fields
            .iter()
            .map(|field| {
                if field.term.is_empty() {
                    return Err(ExtractError::EmptyTerm("named fields"));
                }
                // Value runs to the end of the line, whatever the line-ending convention.
                Regex::new(&format!(r"{}([^\r\n]+)", regex::escape(&field.term)))
                    .map(|re| (field.clone(), re))
                    .map_err(|e| ExtractError::InvalidPattern {
                        term: field.term.clone(),
                        message: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { fields })
    }
}

impl FieldExtractionStrategy for NamedFieldExtractor {
    fn name(&self) -> &'static str {
        "named-fields"
    }

    fn scope(&self) -> TextScope {
        TextScope::Header
    }

    fn terms(&self) -> Vec<&str> {
        self.fields.iter().map(|(field, _)| field.term.as_str()).collect()
    }

    fn extract(&self, text: &str) -> ExtractionResult {
        let mut result = ExtractionResult::new();
        for (field, re) in &self.fields {
            if let Some(value) = re.captures(text).and_then(|caps| caps.get(1)) {
                result.insert(field, value.as_str());
            }
        }
        result
    }
}
