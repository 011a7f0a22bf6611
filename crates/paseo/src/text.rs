//! Pure text transforms shared by the page objects and assertions.
//!
//! These are the only algorithms in the repository that do not touch a
//! browser, which makes them the only ones that can be verified
//! deterministically; they carry the bulk of the unit coverage.

use crate::result::{PaseoError, PaseoResult};

/// Collapse runs of whitespace and trim.
#[must_use]
pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a header caption for matching: collapse whitespace, trim,
/// case-fold.
#[must_use]
pub fn normalize_header(s: &str) -> String {
    normalize_text(s).to_lowercase()
}

/// Resolve a human-readable column caption to a positional header index.
///
/// Returns the first index whose normalized text contains the normalized
/// requested name as a substring.
///
/// # Errors
///
/// Returns [`PaseoError::ColumnNotFound`] when no header matches.
pub fn resolve_column_index(headers: &[String], name: &str) -> PaseoResult<usize> {
    let needle = normalize_header(name);
    headers
        .iter()
        .position(|h| normalize_header(h).contains(&needle))
        .ok_or_else(|| PaseoError::ColumnNotFound {
            column: name.to_string(),
        })
}

/// Strip every character except ASCII digits, `.` and `-`.
#[must_use]
pub fn strip_non_numeric(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Numeric cell extraction: strip currency symbols, separators and other
/// noise, then parse as `f64`. Returns `0.0` when nothing parseable remains.
#[must_use]
pub fn extract_numeric(s: &str) -> f64 {
    strip_non_numeric(s).parse::<f64>().unwrap_or(0.0)
}

/// Whether a cell text has stabilized into a parseable numeric form.
///
/// Live-updating cells render transient states (empty, a bare `-`, a
/// spinner glyph) before settling; this is the stabilization predicate.
#[must_use]
pub fn is_parseable_numeric(s: &str) -> bool {
    let cleaned = strip_non_numeric(s);
    !cleaned.is_empty() && cleaned.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod normalize_tests {
        use super::*;

        #[test]
        fn test_collapses_inner_whitespace() {
            assert_eq!(normalize_text("Total \n  Value"), "Total Value");
        }

        #[test]
        fn test_trims_edges() {
            assert_eq!(normalize_text("  P&L  "), "P&L");
        }

        #[test]
        fn test_header_case_folds() {
            assert_eq!(normalize_header("  Total \t VALUE "), "total value");
        }
    }

    mod column_index_tests {
        use super::*;

        fn headers() -> Vec<String> {
            ["Ticker", "Name", "P&L", "Total Value", "Last"]
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        }

        #[test]
        fn test_exact_caption() {
            assert_eq!(resolve_column_index(&headers(), "Ticker").unwrap(), 0);
            assert_eq!(resolve_column_index(&headers(), "Total Value").unwrap(), 3);
        }

        #[test]
        fn test_case_insensitive_substring() {
            assert_eq!(resolve_column_index(&headers(), "p&l").unwrap(), 2);
            assert_eq!(resolve_column_index(&headers(), "total").unwrap(), 3);
        }

        #[test]
        fn test_first_match_wins() {
            let headers: Vec<String> = ["Value", "Total Value"]
                .iter()
                .map(|s| (*s).to_string())
                .collect();
            assert_eq!(resolve_column_index(&headers, "Value").unwrap(), 0);
        }

        #[test]
        fn test_absent_column_is_an_error() {
            let err = resolve_column_index(&headers(), "Dividend").unwrap_err();
            match err {
                PaseoError::ColumnNotFound { column } => assert_eq!(column, "Dividend"),
                other => panic!("expected ColumnNotFound, got {other:?}"),
            }
        }

        #[test]
        fn test_repeated_calls_are_stable() {
            let headers = headers();
            let first = resolve_column_index(&headers, "P&L").unwrap();
            for _ in 0..10 {
                assert_eq!(resolve_column_index(&headers, "P&L").unwrap(), first);
            }
        }

        #[test]
        fn test_messy_header_whitespace() {
            let headers: Vec<String> = vec!["  Total \n Value ".to_string()];
            assert_eq!(resolve_column_index(&headers, "total value").unwrap(), 0);
        }
    }

    mod numeric_tests {
        use super::*;

        #[test]
        fn test_currency_and_separators_are_stripped() {
            assert!((extract_numeric("$1,234.56") - 1234.56).abs() < f64::EPSILON);
            assert!((extract_numeric("£ -2,000") - -2000.0).abs() < f64::EPSILON);
        }

        #[test]
        fn test_percent_suffix() {
            assert!((extract_numeric("12.5%") - 12.5).abs() < f64::EPSILON);
        }

        #[test]
        fn test_plain_text_defaults_to_zero() {
            assert!(extract_numeric("AAPL").abs() < f64::EPSILON);
            assert!(extract_numeric("").abs() < f64::EPSILON);
        }

        #[test]
        fn test_unparseable_residue_defaults_to_zero() {
            assert!(extract_numeric("-").abs() < f64::EPSILON);
            assert!(extract_numeric("..").abs() < f64::EPSILON);
        }

        #[test]
        fn test_stabilization_predicate() {
            assert!(is_parseable_numeric("$1,234.56"));
            assert!(is_parseable_numeric("-3"));
            assert!(!is_parseable_numeric(""));
            assert!(!is_parseable_numeric("-"));
            assert!(!is_parseable_numeric("loading"));
        }

        #[test]
        fn test_extraction_is_idempotent_on_its_own_output() {
            let v = extract_numeric("$1,234.56");
            assert!((extract_numeric(&v.to_string()) - v).abs() < f64::EPSILON);
        }
    }

    proptest! {
        /// Any number wrapped in non-numeric noise comes back out unchanged.
        #[test]
        fn prop_embedded_number_is_extracted(
            prefix in "[^0-9.\\-]*",
            value in -1.0e6f64..1.0e6f64,
            suffix in "[^0-9.\\-]*",
        ) {
            let text = format!("{prefix}{value}{suffix}");
            // `Display` for f64 prints the shortest round-tripping decimal,
            // so the parse is exact.
            prop_assert_eq!(extract_numeric(&text), value);
        }

        /// Text with no numeric characters always extracts to zero.
        #[test]
        fn prop_no_digits_means_zero(text in "[^0-9.\\-]*") {
            prop_assert_eq!(extract_numeric(&text), 0.0);
        }

        /// The stripped form only ever contains digits, dots and minus.
        #[test]
        fn prop_strip_alphabet(text in ".*") {
            let stripped = strip_non_numeric(&text);
            prop_assert!(stripped.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-'));
        }
    }
}
