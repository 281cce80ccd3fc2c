//! Date-scoped purchase order numbering (`PO-YYYYMMDD-NNNN`).

use chrono::NaiveDate;

/// Render a purchase order number for a date and sequence value.
pub fn format_po_number(date: NaiveDate, seq: u32) -> String {
    format!("PO-{}-{:04}", date.format("%Y%m%d"), seq)
}

/// Parse the sequence value out of a PO number, if it belongs to the
/// given date. Numbers from other dates or in other shapes yield `None`.
pub fn parse_sequence(po_number: &str, date: NaiveDate) -> Option<u32> {
    let prefix = format!("PO-{}-", date.format("%Y%m%d"));
    po_number
        .strip_prefix(&prefix)
        .and_then(|seq| seq.parse().ok())
}

/// Compute the next number in sequence for `date` given every PO number
/// already on file. Starts at 1 on a date with no existing orders; the
/// sequence never reuses a value, even if earlier orders were removed.
pub fn next_in_sequence<'a>(
    existing: impl Iterator<Item = &'a str>,
    date: NaiveDate,
) -> String {
    let highest = existing
        .filter_map(|number| parse_sequence(number, date))
        .max()
        .unwrap_or(0);
    format_po_number(date, highest + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_pads_to_four_digits() {
        assert_eq!(format_po_number(date(2025, 1, 5), 3), "PO-20250105-0003");
        assert_eq!(format_po_number(date(2025, 1, 5), 12345), "PO-20250105-12345");
    }

    #[test]
    fn test_parse_rejects_other_dates() {
        assert_eq!(parse_sequence("PO-20250105-0003", date(2025, 1, 5)), Some(3));
        assert_eq!(parse_sequence("PO-20250106-0003", date(2025, 1, 5)), None);
        assert_eq!(parse_sequence("INV-20250105-0003", date(2025, 1, 5)), None);
        assert_eq!(parse_sequence("PO-20250105-abcd", date(2025, 1, 5)), None);
    }

    #[test]
    fn test_next_starts_at_one() {
        assert_eq!(
            next_in_sequence(std::iter::empty(), date(2025, 1, 5)),
            "PO-20250105-0001"
        );
    }

    #[test]
    fn test_next_skips_past_highest() {
        let existing = ["PO-20250105-0001", "PO-20250105-0007", "PO-20250104-0042"];
        assert_eq!(
            next_in_sequence(existing.iter().copied(), date(2025, 1, 5)),
            "PO-20250105-0008"
        );
    }

    #[test]
    fn test_sequences_are_independent_per_date() {
        let existing = ["PO-20250105-0009"];
        assert_eq!(
            next_in_sequence(existing.iter().copied(), date(2025, 1, 6)),
            "PO-20250106-0001"
        );
    }
}
