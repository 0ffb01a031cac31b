// src/utils/text_debug.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use regex::RegexBuilder;

use crate::utils::error::AppError;

/// Marks every highlight span inline as `[[kind>>...<<kind]]`.
/// Spans that overlap an earlier one are dropped so the output stays balanced.
pub fn annotate_text(text: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| (h.0, std::cmp::Reverse(h.1)));

    let mut annotated = String::with_capacity(text.len() + highlights.len() * 16);
    let mut last_pos = 0;

    for (start, end, kind) in sorted_highlights {
        if start < last_pos || end > text.len() || start >= end {
            continue;
        }
        annotated.push_str(&text[last_pos..start]);
        annotated.push_str(&format!("[[{}>>", kind));
        annotated.push_str(&text[start..end]);
        annotated.push_str(&format!("<<{}]]", kind));
        last_pos = end;
    }

    annotated.push_str(&text[last_pos..]);
    annotated
}

/// Saves text with the given spans marked, for inspecting why a label was or wasn't picked up.
pub fn save_debug_text(text: &str, path: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(annotate_text(text, highlights).as_bytes())?;
    writer.flush()?;

    tracing::info!("Saved debug text to {}", path.display());
    Ok(())
}

/// A literal to highlight, the marker kind it gets, and whether letter case must match.
pub struct DebugLiteral<'a> {
    pub literal: &'a str,
    pub kind: &'a str,
    pub case_sensitive: bool,
}

/// Finds every occurrence of each literal and writes an annotated copy of `text`.
pub fn create_debug_text(text: &str, path: &Path, literals: &[DebugLiteral<'_>]) -> Result<(), AppError> {
    let mut highlights = Vec::new();

    for DebugLiteral { literal, kind, case_sensitive } in literals {
        if literal.is_empty() {
            continue;
        }
        let re = RegexBuilder::new(&regex::escape(literal))
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| AppError::Config(format!("Invalid debug literal '{}': {}", literal, e)))?;

        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), *kind));
        }
    }

    save_debug_text(text, path, &highlights)
}
