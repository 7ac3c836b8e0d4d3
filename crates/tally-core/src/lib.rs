//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - OCR text extraction from receipt images (ocrs/rten)
//! - Store classification via an ordered signature rule table
//! - Rule-based line parsing into (item, price) pairs
//! - Per-store summary aggregation and CSV serialization
//! - A YOLO object-detection helper for console display

pub mod detect;
pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;
pub mod summary;

pub use error::{DetectError, OcrError, Result, TallyError};
pub use models::config::TallyConfig;
pub use models::receipt::{LineItem, Receipt, Store};
pub use ocr::{OcrEngine, TextSource};
pub use receipt::{LineGrammar, ReceiptParser, ReceiptPipeline, StoreClassifier};
pub use summary::{Summary, format_price, write_summary, write_summary_file};

pub use detect::{Detection, YoloDetector};
