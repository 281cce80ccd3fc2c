//! Payment terms extraction (proforma documents only).

use super::patterns::{TERMS_LABELED, TERMS_NET_DAYS, TERMS_ON_DELIVERY};

/// Extract payment terms: labeled value, else a "Net N days" phrase, else
/// a delivery phrase.
pub fn extract_payment_terms(text: &str) -> Option<String> {
    for pattern in [&*TERMS_LABELED, &*TERMS_NET_DAYS, &*TERMS_ON_DELIVERY] {
        if let Some(caps) = pattern.captures(text) {
            return Some(caps[1].trim().to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labeled_terms_win() {
        let text = "Payment Terms: 50% upfront\nNet 30 days\n";
        assert_eq!(
            extract_payment_terms(text),
            Some("50% upfront".to_string())
        );
    }

    #[test]
    fn test_net_days_phrase() {
        assert_eq!(
            extract_payment_terms("Payable Net 45 days after invoice"),
            Some("Net 45 days".to_string())
        );
    }

    #[test]
    fn test_delivery_phrase() {
        assert_eq!(
            extract_payment_terms("Payment upon delivery of goods"),
            Some("upon delivery".to_string())
        );
    }

    #[test]
    fn test_no_terms() {
        assert_eq!(extract_payment_terms("no terms mentioned"), None);
    }
}
