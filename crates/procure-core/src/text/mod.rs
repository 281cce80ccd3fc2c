//! Text extraction adapter: file + declared format -> best-effort plain text.
//!
//! Extraction never fails the caller: every per-format extractor is
//! fallible internally, and [`extract_text`] degrades any failure to empty
//! text, logged at the boundary.

mod pdf;
mod word;

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::TextError;

/// Result type for per-format extractors.
pub type Result<T> = std::result::Result<T, TextError>;

/// Declared file format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// Word-processor document (`.doc` / `.docx`).
    Word,
    PlainText,
    /// Unrecognized format; yields empty text, not an error.
    Other,
}

impl DocumentFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => DocumentFormat::Pdf,
            "doc" | "docx" => DocumentFormat::Word,
            "txt" => DocumentFormat::PlainText,
            _ => DocumentFormat::Other,
        }
    }
}

/// Extract plain text from a document, dispatching on the declared format.
///
/// A corrupt or partially unreadable document degrades to empty text
/// rather than aborting the caller.
pub fn extract_text(path: &Path, format: DocumentFormat) -> String {
    let result = match format {
        DocumentFormat::Pdf => pdf::extract(path),
        DocumentFormat::Word => word::extract(path),
        DocumentFormat::PlainText => extract_plain(path),
        DocumentFormat::Other => Ok(String::new()),
    };

    match result {
        Ok(text) => {
            debug!(
                "Extracted {} chars from {} ({:?})",
                text.len(),
                path.display(),
                format
            );
            text
        }
        Err(e) => {
            warn!("Text extraction failed for {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Plain text files are read as UTF-8.
fn extract_plain(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| TextError::Read(e.to_string()))
}
