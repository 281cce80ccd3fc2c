//! Layered field extraction: assisted strategy first, rules as fallback.

use std::path::Path;
use std::sync::Arc;

use procure_assist::{AssistBackend, AssistError};
use tracing::{debug, info, warn};

use super::rules;
use crate::models::config::ExtractionConfig;
use crate::models::{DocumentKind, ExtractedFields};
use crate::text::{self, DocumentFormat};

/// Strategy-ordered field extraction pipeline.
///
/// Assisted extraction runs only when a backend was injected at
/// construction; any assisted failure (transport, timeout, malformed,
/// empty, or error-marked response) falls through to the rule-based
/// extractors, so the pipeline itself never fails the caller.
pub struct FieldExtractionPipeline {
    assist: Option<Arc<dyn AssistBackend>>,
    config: ExtractionConfig,
}

impl FieldExtractionPipeline {
    /// Create a pipeline. `assist` is the injected capability: `None`
    /// means rule-based extraction only.
    pub fn new(assist: Option<Arc<dyn AssistBackend>>) -> Self {
        Self {
            assist,
            config: ExtractionConfig::default(),
        }
    }

    /// Override extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Extract structured fields from raw document text.
    pub fn extract_fields(&self, text: &str, kind: DocumentKind) -> ExtractedFields {
        if let Some(backend) = &self.assist {
            match self.assisted(backend.as_ref(), text, kind) {
                Ok(fields) if fields.has_error() => {
                    warn!(
                        "Assisted extraction returned an error marker, falling back to rules: {:?}",
                        fields.error
                    );
                }
                // An empty map counts as absent output, not a result.
                Ok(fields) if fields == ExtractedFields::default() => {
                    warn!("Assisted extraction returned no fields, falling back to rules");
                }
                Ok(fields) => {
                    debug!("Assisted extraction succeeded via {}", backend.name());
                    return fields;
                }
                Err(e) => {
                    warn!("Assisted extraction failed, falling back to rules: {}", e);
                }
            }
        }

        rules::extract_with_rules(text, kind)
    }

    fn assisted(
        &self,
        backend: &dyn AssistBackend,
        text: &str,
        kind: DocumentKind,
    ) -> procure_assist::Result<ExtractedFields> {
        let cap = match kind {
            DocumentKind::Proforma => self.config.proforma_excerpt_chars,
            DocumentKind::Receipt => self.config.receipt_excerpt_chars,
        };
        let excerpt: String = text.chars().take(cap).collect();

        let prompt = build_prompt(&excerpt, kind);
        let completion = backend.complete(system_role(kind), &prompt)?;

        serde_json::from_str(&completion)
            .map_err(|e| AssistError::MalformedResponse(e.to_string()))
    }
}

fn system_role(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Proforma => {
            "You are a procurement data extraction assistant. \
             Extract structured data from proforma invoices."
        }
        DocumentKind::Receipt => {
            "You are a receipt data extraction assistant. \
             Extract structured data from receipts."
        }
    }
}

/// Build the per-kind prompt: a bounded excerpt plus the fixed required
/// field schema.
fn build_prompt(excerpt: &str, kind: DocumentKind) -> String {
    match kind {
        DocumentKind::Proforma => format!(
            "Extract the following information from this proforma invoice text:\n\n\
             {excerpt}\n\n\
             Return as JSON with these fields:\n\
             - vendor_name: string\n\
             - vendor_contact: string (email or phone)\n\
             - vendor_address: string\n\
             - total_amount: number\n\
             - items: array of objects with description, quantity, unit_price\n\
             - payment_terms: string\n\
             - delivery_terms: string\n\n\
             If any field cannot be found, use null."
        ),
        DocumentKind::Receipt => format!(
            "Extract receipt information from this text:\n\n\
             {excerpt}\n\n\
             Return as JSON with these fields:\n\
             - vendor_name: string\n\
             - total_amount: number\n\
             - receipt_date: string (if found)\n\
             - items: array of objects with description, quantity, unit_price, total_price\n\n\
             If any field cannot be found, use null."
        ),
    }
}

/// Facade composing the text adapter and the extraction pipeline.
pub struct DocumentProcessor {
    pipeline: FieldExtractionPipeline,
}

impl DocumentProcessor {
    pub fn new(pipeline: FieldExtractionPipeline) -> Self {
        Self { pipeline }
    }

    /// Process a document file, inferring its format from the extension.
    pub fn process(&self, path: &Path, kind: DocumentKind) -> ExtractedFields {
        self.process_declared(path, DocumentFormat::from_path(path), kind)
    }

    /// Process a document file with a caller-declared format.
    ///
    /// A document that yields no text degrades to an error-marked result;
    /// the caller is never aborted by a corrupt upload.
    pub fn process_declared(
        &self,
        path: &Path,
        format: DocumentFormat,
        kind: DocumentKind,
    ) -> ExtractedFields {
        let text = text::extract_text(path, format);
        if text.trim().is_empty() {
            return ExtractedFields::from_error("Could not extract text from document");
        }

        info!(
            "Extracting {} fields from {} ({} chars)",
            kind.as_str(),
            path.display(),
            text.len()
        );
        self.pipeline.extract_fields(&text, kind)
    }
}
