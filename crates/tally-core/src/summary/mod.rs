//! Per-store aggregation of parsed receipts.

mod csv;

pub use self::csv::{format_price, write_summary, write_summary_file};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::receipt::{LineItem, Receipt, Store};

/// Mapping from store to its accumulated line items.
///
/// Stores appear in insertion order of first occurrence; items from
/// multiple receipts of the same store are concatenated in processing
/// order, with no deduplication. Totals are always recomputed from the
/// item prices, never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    entries: Vec<(Store, Vec<LineItem>)>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of receipts into a summary.
    pub fn from_receipts<'a, I>(receipts: I) -> Self
    where
        I: IntoIterator<Item = &'a Receipt>,
    {
        let mut summary = Self::new();
        for receipt in receipts {
            summary.add_receipt(receipt);
        }
        summary
    }

    /// Append one receipt's items to its store's entry.
    ///
    /// A receipt with zero items still registers its store, so the summary
    /// output carries a $0.00 total row for it.
    pub fn add_receipt(&mut self, receipt: &Receipt) {
        match self.entries.iter_mut().find(|(s, _)| *s == receipt.store) {
            Some((_, items)) => items.extend(receipt.items.iter().cloned()),
            None => self
                .entries
                .push((receipt.store, receipt.items.clone())),
        }
    }

    /// Store sections in insertion order.
    pub fn entries(&self) -> &[(Store, Vec<LineItem>)] {
        &self.entries
    }

    /// Items accumulated for one store.
    pub fn items(&self, store: Store) -> &[LineItem] {
        self.entries
            .iter()
            .find(|(s, _)| *s == store)
            .map(|(_, items)| items.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of item prices for one store.
    pub fn store_total(&self, store: Store) -> Decimal {
        self.items(store).iter().map(|i| i.price).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of items across all stores.
    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|(_, items)| items.len()).sum()
    }
}
