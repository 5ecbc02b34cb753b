//! Row classification for lines that sit inside the table region but are not
//! quote data: report titles, print stamps, subtotal and total lines.

/// Text that marks a row as report furniture wherever it appears.
const FURNITURE_MARKERS: &[&str] = &[
    "DAILY QUOTE REVIEW",
    "Total After Discount",
    "Printed:",
    "Quote Type:",
];

/// Prefixes of the `Quote #` cell that mark a subtotal or total row.
const FURNITURE_PREFIXES: &[&str] = &["CRM", "Total"];

/// Only the first cell position is checked for prefixes: a continuation row
/// has an empty `Quote #` and may well describe a "Total care kit".
pub fn is_report_furniture(cells: &[&str]) -> bool {
    if cells
        .iter()
        .any(|c| FURNITURE_MARKERS.iter().any(|m| c.contains(m)))
    {
        return true;
    }

    cells
        .first()
        .is_some_and(|first| FURNITURE_PREFIXES.iter().any(|p| first.starts_with(p)))
}

/// Quote numbers in the report are plain digit strings, six or more long.
pub fn is_quote_number(s: &str) -> bool {
    s.len() >= 6 && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furniture_rows() {
        assert!(is_report_furniture(&["", "DAILY QUOTE REVIEW", ""]));
        assert!(is_report_furniture(&["", "", "Printed: 10/17/2026 08:14"]));
        assert!(is_report_furniture(&["Quote Type: Standard"]));
        assert!(is_report_furniture(&["CRM Total", "", "12,400.00"]));
        assert!(is_report_furniture(&["", "Total After Discount", "9,100.00"]));
        assert!(is_report_furniture(&["Total", "", "", "3"]));
    }

    #[test]
    fn test_data_rows_are_not_furniture() {
        assert!(!is_report_furniture(&["100234", "PX-22", "Total care kit"]));
        assert!(!is_report_furniture(&["", "", ""]));
    }

    #[test]
    fn test_continuation_rows_are_not_furniture() {
        assert!(!is_report_furniture(&["", "CRM connector license"]));
        assert!(!is_report_furniture(&["", "Total care kit"]));
        assert!(is_report_furniture(&["", "Printed: 10/17/2026"]));
    }

    #[test]
    fn test_quote_number() {
        assert!(is_quote_number("100234"));
        assert!(is_quote_number("10023456"));
        assert!(!is_quote_number("10023"));
        assert!(!is_quote_number("Q10023"));
        assert!(!is_quote_number(""));
    }
}
