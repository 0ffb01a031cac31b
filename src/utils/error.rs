// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while turning a PDF into page text. The Display strings keep the
// "Error..." prefixes so log lines stay recognisable as failures.
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Error: PDF file not found. ({})", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error processing PDF: {0}")]
    Load(String),

    #[error("Error processing PDF: page {page}: {message}")]
    PageText { page: u32, message: String },

    #[error("Error processing PDF: page index {requested} requested but document has {available} page(s)")]
    InsufficientPages { requested: usize, available: usize },
}

impl PdfError {
    /// True for the "file could not be opened" kind, false for every extraction failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PdfError::FileNotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid pattern for '{term}': {message}")]
    InvalidPattern { term: String, message: String },

    #[error("Empty search term in {0}")]
    EmptyTerm(&'static str),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("PDF reading failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_prefixes_survive_display() {
        let missing = PdfError::FileNotFound(PathBuf::from("nope.pdf"));
        assert!(missing.to_string().starts_with("Error: PDF file not found."));
        assert!(missing.is_not_found());

        let short = PdfError::InsufficientPages { requested: 1, available: 1 };
        assert!(short.to_string().starts_with("Error processing PDF:"));
        assert!(!short.is_not_found());
    }

    #[test]
    fn test_app_error_wraps_pdf_error() {
        let err: AppError = PdfError::Load("trailer missing".to_string()).into();
        assert_eq!(err.to_string(), "PDF reading failed: Error processing PDF: trailer missing");
    }
}
