// src/storage/mod.rs
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::extractors::ExtractionResult;
use crate::utils::error::StorageError;

/// What the aggregator did with one document's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateOutcome {
    Persisted(PathBuf),
    Skipped,
}

pub struct ResultWriter {
    output_dir: Option<PathBuf>, // None: write next to each source PDF
    suffix: String,
}

impl ResultWriter {
    /// Creates a writer; `output_dir` is created if it doesn't exist yet.
    pub fn new<P: AsRef<Path>>(output_dir: Option<P>, suffix: &str) -> Result<Self, StorageError> {
        let output_dir = output_dir.map(|dir| dir.as_ref().to_path_buf());

        if let Some(dir) = &output_dir {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(StorageError::IoError)?;
            }
        }

        Ok(Self { output_dir, suffix: suffix.to_string() })
    }

    /// `<dir>/<stem><suffix>`, e.g. `doc_168639972.pdf` -> `doc_168639972_results.json`.
    pub fn artifact_path(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        let dir = match &self.output_dir {
            Some(dir) => dir.as_path(),
            None => source.parent().unwrap_or_else(|| Path::new("")),
        };
        dir.join(format!("{}{}", stem, self.suffix))
    }

    /// Writes the results keyed by short code, or skips when nothing was found.
    pub fn aggregate(&self, source: &Path, result: &ExtractionResult) -> Result<AggregateOutcome, StorageError> {
        if result.is_empty() {
            tracing::info!("No matches found to save");
            return Ok(AggregateOutcome::Skipped);
        }

        let path = self.artifact_path(source);
        write_json(&path, &result.by_code())?;
        tracing::info!("Saved results to: {}", path.display());

        Ok(AggregateOutcome::Persisted(path))
    }
}

/// Pretty JSON with 4-space indent and raw UTF-8. The file handle is dropped on every
/// path out of this function, after an explicit flush on the success path.
fn write_json(path: &Path, values: &IndexMap<String, String>) -> Result<(), StorageError> {
    let file = fs::File::create(path).map_err(StorageError::IoError)?;
    let mut writer = BufWriter::new(file);

    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    values
        .serialize(&mut serializer)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    writer.flush().map_err(StorageError::IoError)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::SearchTerm;

    fn sample_result() -> ExtractionResult {
        let mut result = ExtractionResult::new();
        result.insert(&SearchTerm::new("APELANTE", "apelante"), "João Silva");
        result.insert(&SearchTerm::new("APELADO", "apelado"), "Maria");
        result
    }

    #[test]
    fn test_artifact_path_next_to_source() {
        let writer = ResultWriter::new(None::<&Path>, "_results.json").unwrap();
        assert_eq!(
            writer.artifact_path(Path::new("/tmp/acordaos/doc_168639972.pdf")),
            PathBuf::from("/tmp/acordaos/doc_168639972_results.json")
        );
    }

    #[test]
    fn test_output_dir_is_created_and_used() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("saida");
        let writer = ResultWriter::new(Some(&out), "_results.json").unwrap();

        assert!(out.is_dir());
        assert_eq!(writer.artifact_path(Path::new("x/doc.pdf")), out.join("doc_results.json"));
    }

    #[test]
    fn test_persists_pretty_utf8_json_keyed_by_code() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.pdf");
        let writer = ResultWriter::new(None::<&Path>, "_results.json").unwrap();

        let outcome = writer.aggregate(&source, &sample_result()).unwrap();
        let path = dir.path().join("doc_results.json");
        assert_eq!(outcome, AggregateOutcome::Persisted(path.clone()));

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"apelante\": \"João Silva\",\n    \"apelado\": \"Maria\"\n}");
    }

    #[test]
    fn test_empty_result_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("vazio.pdf");
        let writer = ResultWriter::new(None::<&Path>, "_results.json").unwrap();

        let outcome = writer.aggregate(&source, &ExtractionResult::new()).unwrap();
        assert_eq!(outcome, AggregateOutcome::Skipped);
        assert!(!dir.path().join("vazio_results.json").exists());
    }

    #[test]
    fn test_rewrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.pdf");
        let writer = ResultWriter::new(None::<&Path>, "_results.json").unwrap();

        writer.aggregate(&source, &sample_result()).unwrap();
        let first = fs::read(dir.path().join("doc_results.json")).unwrap();
        writer.aggregate(&source, &sample_result()).unwrap();
        let second = fs::read(dir.path().join("doc_results.json")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(Some(dir.path().join("missing").join("nested")), "_results.json").unwrap();
        fs::remove_dir(dir.path().join("missing").join("nested")).unwrap();

        let err = writer.aggregate(Path::new("doc.pdf"), &sample_result()).unwrap_err();
        assert!(matches!(err, StorageError::IoError(_)));
    }
}
