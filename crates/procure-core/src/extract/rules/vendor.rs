//! Vendor name and contact extraction.

use regex::Regex;

use super::patterns::{
    EMAIL, PHONE, VENDOR_LABELED_PROFORMA, VENDOR_LABELED_RECEIPT, VENDOR_POSITIONAL_PROFORMA,
    VENDOR_POSITIONAL_RECEIPT,
};
use crate::models::DocumentKind;

/// Extract the vendor name: labeled patterns first, then the positional
/// heuristic (line immediately preceding a marker line).
pub fn extract_vendor_name(text: &str, kind: DocumentKind) -> Option<String> {
    let chain: [&Regex; 2] = match kind {
        DocumentKind::Proforma => [&VENDOR_LABELED_PROFORMA, &VENDOR_POSITIONAL_PROFORMA],
        DocumentKind::Receipt => [&VENDOR_LABELED_RECEIPT, &VENDOR_POSITIONAL_RECEIPT],
    };

    for pattern in chain {
        if let Some(caps) = pattern.captures(text) {
            let name = caps[1].trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }

    None
}

/// Extract a contact: email wins over phone; first match of each.
pub fn extract_contact(text: &str) -> Option<String> {
    if let Some(m) = EMAIL.find(text) {
        return Some(m.as_str().to_string());
    }

    PHONE.find(text).map(|m| m.as_str().to_string())
}
