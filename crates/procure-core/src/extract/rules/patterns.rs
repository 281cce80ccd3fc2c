//! Regex patterns for rule-based field extraction.
//!
//! Patterns are evaluated as explicit ordered chains with first-match-wins
//! semantics; the ordering (labeled pattern before positional heuristic,
//! email before phone, labeled total before keyword-adjacent amount) is a
//! behavioral contract, so the chains are never merged into combined
//! patterns.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Vendor name: labeled patterns per document kind
    pub static ref VENDOR_LABELED_PROFORMA: Regex = Regex::new(
        r"(?i)(?:From|Vendor|Supplier):?[ \t]*([A-Za-z0-9 &.,]+)"
    ).unwrap();

    pub static ref VENDOR_LABELED_RECEIPT: Regex = Regex::new(
        r"(?i)(?:From|Vendor|Store|Merchant):?[ \t]*([A-Za-z0-9 &.,]+)"
    ).unwrap();

    // Vendor name: positional heuristic (line preceding a marker line)
    pub static ref VENDOR_POSITIONAL_PROFORMA: Regex = Regex::new(
        r"(?im)^([A-Za-z0-9 &.,]+)\n(?:Address|Contact)"
    ).unwrap();

    pub static ref VENDOR_POSITIONAL_RECEIPT: Regex = Regex::new(
        r"(?im)^([A-Za-z0-9 &.,]+)\n(?:Receipt|Invoice|Bill)"
    ).unwrap();

    // Contact: email takes precedence over phone
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+?\d{1,3}[-.]?)?\(?\d{3}\)?[-.]?\d{3}[-.]?\d{4}"
    ).unwrap();

    // Total amount: labeled pattern per document kind
    pub static ref TOTAL_LABELED_PROFORMA: Regex = Regex::new(
        r"(?i)(?:Total|Amount|Grand Total).*?\$?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    pub static ref TOTAL_LABELED_RECEIPT: Regex = Regex::new(
        r"(?i)(?:Total|Amount Due|Grand Total).*?\$?\s*([0-9,]+\.?[0-9]*)"
    ).unwrap();

    // Total amount: bare amount followed by a totals keyword. The keyword
    // is consumed rather than asserted; only the amount group is captured,
    // so the match text beyond it does not matter.
    pub static ref TOTAL_KEYWORD_PROFORMA: Regex = Regex::new(
        r"(?i)\$?\s*([0-9,]+\.?[0-9]*)\s*(?:USD|EUR|GBP)?\s*(?:Total|Amount|Balance)"
    ).unwrap();

    pub static ref TOTAL_KEYWORD_RECEIPT: Regex = Regex::new(
        r"(?i)\$?\s*([0-9,]+\.?[0-9]*)\s*(?:USD|EUR|GBP)?\s*(?:Total|Amount|Balance|Due)"
    ).unwrap();

    // Line items, matched one line at a time. Proforma lines carry an
    // explicit quantity; receipt lines carry just a price. Prices with
    // thousands separators do not match these shapes.
    pub static ref ITEM_PROFORMA: Regex = Regex::new(
        r"([A-Za-z ]+)\s+(\d+)\s+\$?(\d+\.?\d*)"
    ).unwrap();

    pub static ref ITEM_RECEIPT: Regex = Regex::new(
        r"([A-Za-z ]+)\s+\$?(\d+\.?\d*)"
    ).unwrap();

    // Payment terms (proforma only)
    pub static ref TERMS_LABELED: Regex = Regex::new(
        r"(?i)(?:Payment Terms|Terms):\s*([^\n]+)"
    ).unwrap();

    pub static ref TERMS_NET_DAYS: Regex = Regex::new(
        r"(?i)(Net \d+ days)"
    ).unwrap();

    pub static ref TERMS_ON_DELIVERY: Regex = Regex::new(
        r"(?i)(Upon delivery|On receipt)"
    ).unwrap();
}
