//! Line grammars: explicit per-store rules for turning receipt lines into
//! line items.
//!
//! Each grammar is a (pattern, exclusion set, cleanup) triple so the parsing
//! behavior for a store can be audited in one place instead of being spread
//! across ad hoc pattern strings.

pub mod patterns;

use std::str::FromStr;

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::receipt::{LineItem, Store};
use self::patterns::{ITEM_LINE, UPC_CODE, WEIGHT_FRAGMENT};

/// Keywords that mark a line as a total/tax/payment line rather than an
/// item, tested case-insensitively against the captured name.
pub const EXCLUSION_KEYWORDS: &[&str] = &["total", "tax", "subtotal", "change", "debit", "cash"];

/// A store-specific line grammar.
pub struct LineGrammar {
    /// Anchored item-line pattern (name, price, optional tax code).
    line: &'static Regex,

    /// Exclusion keywords applied to the raw captured name.
    exclusions: &'static [&'static str],

    /// Strip embedded UPC codes and weight fragments from the name.
    strip_codes: bool,
}

lazy_static::lazy_static! {
    static ref WALMART_GRAMMAR: LineGrammar = LineGrammar {
        line: &ITEM_LINE,
        exclusions: EXCLUSION_KEYWORDS,
        strip_codes: true,
    };

    static ref TRADER_JOES_GRAMMAR: LineGrammar = LineGrammar {
        line: &ITEM_LINE,
        exclusions: EXCLUSION_KEYWORDS,
        strip_codes: false,
    };

    static ref GENERIC_GRAMMAR: LineGrammar = LineGrammar {
        line: &ITEM_LINE,
        exclusions: EXCLUSION_KEYWORDS,
        strip_codes: false,
    };
}

impl LineGrammar {
    /// The grammar used for a given store. Unknown stores get the generic
    /// grammar.
    pub fn for_store(store: Store) -> &'static LineGrammar {
        match store {
            Store::Walmart => &WALMART_GRAMMAR,
            Store::TraderJoes => &TRADER_JOES_GRAMMAR,
            Store::Unknown => &GENERIC_GRAMMAR,
        }
    }

    /// Classify one line as item or non-item.
    ///
    /// Returns `Some` only when the whole trimmed line matches the item
    /// pattern and the captured name contains no exclusion keyword. A line
    /// mentioning both an item and a total keyword is rejected entirely
    /// (the false negative is a known limitation). Non-matching lines are
    /// not an error; they are simply not items.
    pub fn parse_line(&self, line: &str) -> Option<LineItem> {
        let line = line.trim();
        let caps = self.line.captures(line)?;

        let raw_name = caps[1].trim();
        let lowered = raw_name.to_lowercase();
        if self.exclusions.iter().any(|kw| lowered.contains(kw)) {
            return None;
        }

        let price = Decimal::from_str(&caps[2]).ok()?;

        let name = if self.strip_codes {
            strip_embedded_codes(raw_name)
        } else {
            raw_name.to_string()
        };
        if name.is_empty() {
            return None;
        }

        Some(LineItem::new(name, price))
    }
}

/// Remove UPC-like codes and weight/unit-price fragments from a captured
/// item name, collapsing the remaining tokens with single spaces.
fn strip_embedded_codes(name: &str) -> String {
    name.split_whitespace()
        .filter(|token| !UPC_CODE.is_match(token) && !WEIGHT_FRAGMENT.is_match(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_walmart_weighed_item() {
        let grammar = LineGrammar::for_store(Store::Walmart);
        let item = grammar
            .parse_line("BANANAS 000000004011KF 0.41lb 1lb/0.49 0.20N")
            .unwrap();
        assert_eq!(item.name, "BANANAS");
        assert_eq!(item.price, dec("0.20"));
    }

    #[test]
    fn test_simple_item_with_tax_code() {
        let grammar = LineGrammar::for_store(Store::Walmart);
        let item = grammar.parse_line("GV WHOLE MILK 3.50 X").unwrap();
        assert_eq!(item.name, "GV WHOLE MILK");
        assert_eq!(item.price, dec("3.50"));
    }

    #[test]
    fn test_trader_joes_keeps_digits_in_name() {
        let grammar = LineGrammar::for_store(Store::TraderJoes);
        let item = grammar.parse_line("ORGANIC MILK 2% 4.99").unwrap();
        assert_eq!(item.name, "ORGANIC MILK 2%");
        assert_eq!(item.price, dec("4.99"));
    }

    #[test]
    fn test_total_line_is_excluded() {
        let grammar = LineGrammar::for_store(Store::Walmart);
        assert_eq!(grammar.parse_line("TOTAL 23.47"), None);
        assert_eq!(grammar.parse_line("SUBTOTAL 21.09"), None);
        assert_eq!(grammar.parse_line("TAX 1 2.38"), None);
    }

    #[test]
    fn test_payment_lines_are_excluded() {
        let grammar = LineGrammar::for_store(Store::TraderJoes);
        assert_eq!(grammar.parse_line("CASH TEND 25.00"), None);
        assert_eq!(grammar.parse_line("CHANGE DUE 1.53"), None);
        assert_eq!(grammar.parse_line("DEBIT PAYMENT 23.47"), None);
    }

    #[test]
    fn test_exclusion_is_case_insensitive() {
        let grammar = LineGrammar::for_store(Store::TraderJoes);
        assert_eq!(grammar.parse_line("Total 23.47"), None);
        assert_eq!(grammar.parse_line("ToTaL 23.47"), None);
    }

    #[test]
    fn test_item_mentioning_total_is_rejected() {
        // A line containing both an item phrase and a total keyword is
        // dropped entirely.
        let grammar = LineGrammar::for_store(Store::Walmart);
        assert_eq!(grammar.parse_line("MILK TOTAL 3.50"), None);
    }

    #[test]
    fn test_non_matching_lines_are_ignored() {
        let grammar = LineGrammar::for_store(Store::Walmart);
        assert_eq!(grammar.parse_line("THANK YOU FOR SHOPPING"), None);
        assert_eq!(grammar.parse_line(""), None);
        assert_eq!(grammar.parse_line("   "), None);
    }

    #[test]
    fn test_leading_whitespace_is_stripped() {
        let grammar = LineGrammar::for_store(Store::TraderJoes);
        let item = grammar.parse_line("  BREAD 2.10  ").unwrap();
        assert_eq!(item.name, "BREAD");
        assert_eq!(item.price, dec("2.10"));
    }

    #[test]
    fn test_name_reduced_to_nothing_is_dropped() {
        // A bare code-and-price line has no item name left after cleanup.
        let grammar = LineGrammar::for_store(Store::Walmart);
        assert_eq!(grammar.parse_line("000000004011KF 0.20N"), None);
    }

    #[test]
    fn test_strip_embedded_codes() {
        assert_eq!(
            strip_embedded_codes("BANANAS 000000004011KF 0.41lb 1lb/0.49"),
            "BANANAS"
        );
        assert_eq!(strip_embedded_codes("GV WHOLE MILK"), "GV WHOLE MILK");
    }
}
