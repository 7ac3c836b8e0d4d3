//! Receipt parser: raw OCR text to a [`Receipt`].

use tracing::debug;

use crate::models::receipt::{LineItem, Receipt, Store};

use super::rules::LineGrammar;
use super::store::StoreClassifier;

/// Parses raw receipt text into a classified [`Receipt`].
pub struct ReceiptParser {
    classifier: StoreClassifier,
    /// Whether unknown stores are parsed with the generic grammar.
    /// When false they yield an empty item list.
    parse_unknown: bool,
}

impl ReceiptParser {
    /// Create a parser with the default policy: unknown stores are parsed
    /// with the generic grammar.
    pub fn new() -> Self {
        Self {
            classifier: StoreClassifier::new(),
            parse_unknown: true,
        }
    }

    /// Set the unknown-store policy.
    pub fn with_unknown_policy(mut self, parse_unknown: bool) -> Self {
        self.parse_unknown = parse_unknown;
        self
    }

    /// Classify the store and extract line items from raw text.
    ///
    /// Each line is independently classified as item or non-item by the
    /// store's grammar; order of items follows line order in the text.
    pub fn parse(&self, text: &str) -> Receipt {
        let store = self.classifier.classify(text);

        if store == Store::Unknown && !self.parse_unknown {
            return Receipt::new(store, Vec::new());
        }

        let grammar = LineGrammar::for_store(store);
        let items: Vec<LineItem> = text
            .lines()
            .filter_map(|line| grammar.parse_line(line))
            .collect();

        debug!("Parsed {} items for {}", items.len(), store);

        Receipt::new(store, items)
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
