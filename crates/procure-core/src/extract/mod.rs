//! Structured field extraction from document text.

pub mod pipeline;
pub mod rules;

pub use pipeline::{DocumentProcessor, FieldExtractionPipeline};
pub use rules::extract_with_rules;
