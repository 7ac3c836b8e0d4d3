//! Receipt text processing: store classification and line parsing.

pub mod parser;
pub mod pipeline;
pub mod rules;
pub mod store;

pub use parser::ReceiptParser;
pub use pipeline::ReceiptPipeline;
pub use rules::{LineGrammar, EXCLUSION_KEYWORDS};
pub use store::StoreClassifier;
