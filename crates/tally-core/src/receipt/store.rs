//! Store classification from raw receipt text.

use tracing::debug;

use crate::models::receipt::Store;

/// Ordered (signature, store) rules. Evaluated top to bottom against the
/// lowercased text; the first matching signature wins.
const STORE_RULES: &[(&str, Store)] = &[
    ("trader joe", Store::TraderJoes),
    ("walmart", Store::Walmart),
    ("wal*mart", Store::Walmart),
];

/// Classifies receipt text into a [`Store`] by signature substring search.
#[derive(Debug, Clone, Default)]
pub struct StoreClassifier;

impl StoreClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Identify the store, or [`Store::Unknown`] if no signature matches.
    ///
    /// The search is case-insensitive and the rule order is fixed, so the
    /// result is deterministic even when a garbled receipt happens to
    /// mention more than one store.
    pub fn classify(&self, text: &str) -> Store {
        let lowered = text.to_lowercase();

        for (signature, store) in STORE_RULES {
            if lowered.contains(signature) {
                debug!("Matched store signature {:?}", signature);
                return *store;
            }
        }

        Store::Unknown
    }
}
