//! Regex patterns for receipt line grammars.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Item line: name segment, whitespace, price with two decimal places,
    // optional single uppercase tax-code letter. Anchored to the whole line
    // so each line is classified exactly once.
    pub static ref ITEM_LINE: Regex = Regex::new(
        r"^([A-Za-z0-9][A-Za-z0-9 .,%&'/*+\-]*?)\s+(\d+\.\d{2})\s*([A-Z])?$"
    ).unwrap();

    // UPC-like code embedded in a Walmart item name, e.g. "000000004011KF".
    pub static ref UPC_CODE: Regex = Regex::new(
        r"^\d{8,}[A-Z]*$"
    ).unwrap();

    // Weight and unit-price fragments, e.g. "0.41lb" or "1lb/0.49".
    pub static ref WEIGHT_FRAGMENT: Regex = Regex::new(
        r"(?i)^\d+(?:\.\d+)?lb(?:/\d+(?:\.\d+)?)?$"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_line_matches() {
        assert!(ITEM_LINE.is_match("ORGANIC MILK 4.99"));
        assert!(ITEM_LINE.is_match("BANANAS 0.20N"));
        assert!(ITEM_LINE.is_match("PASTA SAUCE 2.49 F"));
    }

    #[test]
    fn test_item_line_rejects() {
        // No price token with exactly two decimal places at the end.
        assert!(!ITEM_LINE.is_match("THANK YOU FOR SHOPPING"));
        assert!(!ITEM_LINE.is_match("MILK 4.9"));
        assert!(!ITEM_LINE.is_match("4.99 MILK"));
        // Trailing tax code is at most one letter.
        assert!(!ITEM_LINE.is_match("MILK 4.99 AB"));
    }

    #[test]
    fn test_upc_code() {
        assert!(UPC_CODE.is_match("000000004011KF"));
        assert!(UPC_CODE.is_match("012345678901"));
        assert!(!UPC_CODE.is_match("4011"));
        assert!(!UPC_CODE.is_match("BANANAS"));
    }

    #[test]
    fn test_weight_fragment() {
        assert!(WEIGHT_FRAGMENT.is_match("0.41lb"));
        assert!(WEIGHT_FRAGMENT.is_match("1lb/0.49"));
        assert!(!WEIGHT_FRAGMENT.is_match("BANANAS"));
        assert!(!WEIGHT_FRAGMENT.is_match("2.00"));
    }
}
