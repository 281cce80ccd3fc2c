//! Configuration structures for the procurement pipeline.

use std::sync::Arc;

use procure_assist::{AssistBackend, OpenAiBackend, OpenAiConfig};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Main configuration for procure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcureConfig {
    /// Assisted-extraction service configuration. An empty API key leaves
    /// assisted extraction disabled.
    pub assist: OpenAiConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Excerpt cap (chars) for proforma documents sent to the assist
    /// service.
    pub proforma_excerpt_chars: usize,

    /// Excerpt cap (chars) for receipts sent to the assist service.
    pub receipt_excerpt_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            proforma_excerpt_chars: 4000,
            receipt_excerpt_chars: 3000,
        }
    }
}

impl ProcureConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Build the assisted-extraction backend, if one is configured.
    ///
    /// Returns `None` when no API key is set or the backend cannot be
    /// constructed; the pipeline then runs rule-based extraction only.
    pub fn assist_backend(&self) -> Option<Arc<dyn AssistBackend>> {
        if self.assist.api_key.is_empty() {
            return None;
        }

        match OpenAiBackend::new(self.assist.clone()) {
            Ok(backend) => Some(Arc::new(backend)),
            Err(e) => {
                warn!("Assisted extraction disabled: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProcureConfig::default();
        assert_eq!(config.extraction.proforma_excerpt_chars, 4000);
        assert_eq!(config.extraction.receipt_excerpt_chars, 3000);
        assert!(config.assist.api_key.is_empty());
        assert!(config.assist_backend().is_none());
    }

    #[test]
    fn test_partial_json_round_trip() {
        let config: ProcureConfig =
            serde_json::from_str(r#"{"extraction": {"receipt_excerpt_chars": 2000}}"#).unwrap();
        assert_eq!(config.extraction.receipt_excerpt_chars, 2000);
        assert_eq!(config.extraction.proforma_excerpt_chars, 4000);
    }
}
