//! PDF text extraction using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::TextError;

/// Extract text from a PDF file.
///
/// The document is loaded with lopdf first to reject corrupt or pageless
/// files up front (and to decrypt empty-password PDFs, which some vendors
/// emit), then handed to pdf-extract for per-page text. pdf-extract joins
/// page text with newlines and skips pages that yield none.
pub fn extract(path: &Path) -> Result<String> {
    let data = fs::read(path).map_err(|e| TextError::Read(e.to_string()))?;

    let mut doc = Document::load_mem(&data).map_err(|e| TextError::Parse(e.to_string()))?;

    let data = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(TextError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| TextError::Parse(e.to_string()))?;
        decrypted
    } else {
        data
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(TextError::NoPages);
    }
    debug!("Loaded PDF with {} pages", page_count);

    pdf_extract::extract_text_from_mem(&data).map_err(|e| TextError::Parse(e.to_string()))
}
