// src/config.rs
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extractors::{SearchTerm, StrategyKind};
use crate::pdf::models::PageSelection;
use crate::utils::AppError;

// --- Built-in tables ---

/// Markers that end the party listing of a judgment.
pub const DEFAULT_BOUNDARY_KEYWORDS: &[&str] = &["VOTO", "Ementa", "Falência"];

/// Role labels for `LABEL: value` lines. Synonyms are scanned independently.
pub const DEFAULT_LABELS: &[&str] = &[
    "APELANTE", "APELANTES", "APELADO", "APELADA", "APELADOS", "APELADAS",
    "EMBARGANTE", "EMBARGANTES", "EMBARGADO", "EMBARGADA", "EMBARGADOS",
    "AGRAVANTE", "AGRAVANTES", "AGRAVADO", "AGRAVADA", "AGRAVADOS",
    "REQUERENTE", "REQUERENTES", "REQUERIDO", "REQUERIDA", "REQUERIDOS",
    "RECORRENTE", "RECORRENTES", "RECORRIDO", "RECORRIDA", "RECORRIDOS",
    "IMPETRANTE", "IMPETRANTES", "IMPETRADO", "IMPETRADA",
    "AUTOR", "AUTORA", "AUTORES", "RÉU", "RÉ", "RÉUS",
    "EXEQUENTE", "EXECUTADO", "EXECUTADA",
    "RECLAMANTE", "RECLAMADO", "RECLAMADA",
    "PACIENTE", "INTERESSADO", "INTERESSADA", "LITISCONSORTE", "ASSISTENTE",
    "PARTE ATIVA", "PARTE PASSIVA",
    "MINISTÉRIO PÚBLICO", "PROCURADOR", "PROCURADORA",
    "ADVOGADO", "ADVOGADA", "ADVOGADOS",
    "RELATOR", "RELATORA", "ORIGEM",
];

/// (prefix, code) pairs for the named-field strategy.
pub const DEFAULT_NAMED_FIELDS: &[(&str, &str)] = &[
    ("Parte Ativa: ", "parte_ativa"),
    ("Parte Passiva: ", "parte_passiva"),
    ("Apelante: ", "apelante"),
    ("Apelada: ", "apelada"),
];

/// Terms whose following uppercase run is captured in uppercase-run mode.
pub const DEFAULT_UPPERCASE_TERMS: &[&str] = &[
    "apelante", "apelado", "apelada",
    "embargante", "embargado", "embargada",
    "agravante", "agravado", "agravada",
];

pub const DEFAULT_OUTPUT_SUFFIX: &str = "_results.json";

// --- Config ---

/// Everything that drives one extraction run. Any field missing from a JSON config file
/// falls back to the built-in table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub strategy: StrategyKind,
    pub pages: PageSelection,
    pub boundary_keywords: Vec<String>,
    pub case_sensitive_boundaries: bool,
    pub vocabulary: Vec<SearchTerm>,
    pub named_fields: Vec<SearchTerm>,
    pub uppercase_terms: Vec<SearchTerm>,
    pub output_suffix: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            pages: PageSelection::default(),
            boundary_keywords: DEFAULT_BOUNDARY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            case_sensitive_boundaries: false,
            vocabulary: DEFAULT_LABELS.iter().map(|l| SearchTerm::from_label(l)).collect(),
            named_fields: DEFAULT_NAMED_FIELDS
                .iter()
                .map(|(prefix, code)| SearchTerm::new(prefix, code))
                .collect(),
            uppercase_terms: DEFAULT_UPPERCASE_TERMS.iter().map(|t| SearchTerm::from_label(t)).collect(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
        }
    }
}

impl ExtractorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Cannot read config file {}: {}", path.display(), e)))?;
        tracing::info!("Loaded extractor config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.output_suffix.is_empty() || self.output_suffix.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "output_suffix must be a non-empty file name suffix, got '{}'",
                self.output_suffix
            )));
        }
        Ok(())
    }
}
