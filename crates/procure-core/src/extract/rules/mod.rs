//! Rule-based field extractors: the deterministic fallback strategy.

pub mod amounts;
pub mod items;
pub mod patterns;
pub mod terms;
pub mod vendor;

pub use amounts::{extract_total, parse_amount};
pub use items::extract_items;
pub use terms::extract_payment_terms;
pub use vendor::{extract_contact, extract_vendor_name};

use crate::models::{DocumentKind, ExtractedFields};

/// Run the full rule chain over raw text. Fields no extractor matched are
/// left unset.
pub fn extract_with_rules(text: &str, kind: DocumentKind) -> ExtractedFields {
    let mut fields = ExtractedFields {
        vendor_name: extract_vendor_name(text, kind),
        vendor_contact: extract_contact(text),
        total_amount: extract_total(text, kind),
        items: extract_items(text, kind),
        ..Default::default()
    };

    if kind == DocumentKind::Proforma {
        fields.payment_terms = extract_payment_terms(text);
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_proforma_rule_chain() {
        let text = "\
Vendor: Acme Corp
Contact: sales@acme.example
Office Chair 4 120.50
Grand Total: $1,234.56
Payment Terms: Net 30 days
";
        let fields = extract_with_rules(text, DocumentKind::Proforma);

        assert_eq!(fields.vendor_name.as_deref(), Some("Acme Corp"));
        assert_eq!(fields.vendor_contact.as_deref(), Some("sales@acme.example"));
        assert_eq!(fields.total_amount, Some(Decimal::new(123456, 2)));
        assert_eq!(fields.items.len(), 1);
        assert_eq!(fields.payment_terms.as_deref(), Some("Net 30 days"));
        assert!(!fields.has_error());
    }

    #[test]
    fn test_receipt_chain_has_no_payment_terms() {
        let text = "Store: Corner Shop\nCoffee beans $12.99\nTotal: $12.99\nNet 30 days\n";
        let fields = extract_with_rules(text, DocumentKind::Receipt);

        assert_eq!(fields.vendor_name.as_deref(), Some("Corner Shop"));
        assert_eq!(fields.payment_terms, None);
    }

    #[test]
    fn test_empty_text_yields_empty_fields() {
        let fields = extract_with_rules("", DocumentKind::Proforma);
        assert_eq!(fields, ExtractedFields::default());
    }
}
