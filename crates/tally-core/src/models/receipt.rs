//! Receipt data models.

use std::fmt;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Known store identifiers.
///
/// A closed set: classification either hits one of the known signatures or
/// falls back to [`Store::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Store {
    /// Trader Joe's.
    TraderJoes,
    /// Walmart (also matches the older "WAL*MART" header).
    Walmart,
    /// No known signature found in the receipt text.
    Unknown,
}

impl Store {
    /// Human-readable store name, as printed in summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Store::TraderJoes => "Trader Joe's",
            Store::Walmart => "Walmart",
            Store::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A parsed (name, price) pair extracted from one receipt line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Cleaned item name.
    pub name: String,

    /// Item price with two decimal places.
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// All line items attributed to one store from one image.
///
/// Immutable after parsing; the pipeline produces one per processed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Store the receipt was attributed to.
    pub store: Store,

    /// Image the receipt was extracted from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Parsed line items, in the order they appeared on the receipt.
    pub items: Vec<LineItem>,
}

impl Receipt {
    pub fn new(store: Store, items: Vec<LineItem>) -> Self {
        Self {
            store,
            source: None,
            items,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sum of all item prices on this receipt.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|i| i.price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_store_display_names() {
        assert_eq!(Store::TraderJoes.to_string(), "Trader Joe's");
        assert_eq!(Store::Walmart.to_string(), "Walmart");
        assert_eq!(Store::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_receipt_total() {
        let receipt = Receipt::new(
            Store::Walmart,
            vec![
                LineItem::new("MILK", Decimal::from_str("3.50").unwrap()),
                LineItem::new("BREAD", Decimal::from_str("2.10").unwrap()),
            ],
        );
        assert_eq!(receipt.total(), Decimal::from_str("5.60").unwrap());
    }

    #[test]
    fn test_empty_receipt_total_is_zero() {
        let receipt = Receipt::new(Store::Unknown, vec![]);
        assert_eq!(receipt.total(), Decimal::ZERO);
    }
}
