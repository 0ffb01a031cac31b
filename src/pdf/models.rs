// src/pdf/models.rs
use serde::{Deserialize, Serialize};

/// Which pages feed the extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSelection {
    /// Every page, joined with '\n'.
    #[default]
    Full,
    /// One page by 0-based index. Judgments usually list the parties on the second page (index 1).
    Single(usize),
}

/// Text pulled out of one PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentText {
    pub page_count: usize, // pages in the document, not pages read
    pub text: String,
}
