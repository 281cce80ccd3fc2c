//! Structured field maps produced by the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of vendor document being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Preliminary vendor invoice attached to a purchase request.
    Proforma,
    /// Receipt submitted after purchase.
    Receipt,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Proforma => "proforma",
            DocumentKind::Receipt => "receipt",
        }
    }
}

/// A single line item captured from a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedItem {
    pub description: String,

    pub quantity: Decimal,

    pub unit_price: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Decimal>,
}

impl Default for ExtractedItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            total_price: None,
        }
    }
}

/// Structured fields extracted from a document.
///
/// Fields that no extractor matched stay `None` and are omitted from the
/// serialized map, so downstream merge logic can tell "unknown" from
/// "explicitly empty". A present `error` means the whole result carries no
/// usable structured data, regardless of any partial fields alongside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_contact: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_date: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ExtractedItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_terms: Option<String>,

    /// Extraction failure marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractedFields {
    /// A result carrying only an error marker.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Whether the result is flagged as unusable.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_fields_are_omitted_from_json() {
        let fields = ExtractedFields {
            vendor_name: Some("Acme Corp".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();

        assert_eq!(json["vendor_name"], "Acme Corp");
        assert!(json.get("total_amount").is_none());
        assert!(json.get("items").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_assisted_response_with_nulls_parses() {
        let json = r#"{
            "vendor_name": "Acme Corp",
            "vendor_contact": null,
            "total_amount": 1234.56,
            "items": [{"description": "Widget", "quantity": 2, "unit_price": 10.5}],
            "payment_terms": null
        }"#;

        let fields: ExtractedFields = serde_json::from_str(json).unwrap();
        assert_eq!(fields.vendor_name.as_deref(), Some("Acme Corp"));
        assert_eq!(fields.vendor_contact, None);
        assert_eq!(fields.total_amount, Some(Decimal::new(123456, 2)));
        assert_eq!(fields.items.len(), 1);
        assert_eq!(fields.items[0].quantity, Decimal::TWO);
        assert!(!fields.has_error());
    }

    #[test]
    fn test_error_marker() {
        let fields = ExtractedFields::from_error("no text");
        assert!(fields.has_error());
        assert_eq!(fields.error.as_deref(), Some("no text"));
    }
}
