// src/extractors/mod.rs
pub mod boundary;
pub mod labels;
pub mod named;
pub mod result;
pub mod strategy;
pub mod uppercase;

// Re-export key extraction types for convenience
#[allow(unused_imports)]
pub use boundary::{BoundaryLocator, BoundaryMatch, Header};
#[allow(unused_imports)]
pub use result::{ExtractedField, ExtractionResult, SearchTerm};
#[allow(unused_imports)]
pub use strategy::{build_strategy, FieldExtractionStrategy, StrategyKind, TextScope};
