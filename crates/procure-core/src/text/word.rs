//! Word-document text extraction.
//!
//! A `.docx` file is a zip archive; the body text lives in
//! `word/document.xml`. Text runs (`w:t`) are collected per paragraph
//! (`w:p`) and paragraphs joined with newlines, skipping paragraphs that
//! yield no text. Legacy binary `.doc` files fail the zip open and degrade
//! to empty text at the adapter boundary.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::Result;
use crate::error::TextError;

pub fn extract(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| TextError::Read(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| TextError::Parse(e.to_string()))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|_| TextError::Parse("no word/document.xml entry".to_string()))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| TextError::Read(e.to_string()))?;

    let paragraphs = collect_paragraphs(&xml)?;
    debug!("Extracted {} paragraphs from {}", paragraphs.len(), path.display());

    Ok(paragraphs.join("\n"))
}

fn collect_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => {
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| TextError::Parse(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(TextError::Parse(e.to_string())),
        }
    }

    Ok(paragraphs)
}
