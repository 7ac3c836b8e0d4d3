//! Sequential image-to-receipt pipeline.

use std::path::Path;

use tracing::{info, warn};

use crate::models::receipt::Receipt;
use crate::ocr::TextSource;

use super::parser::ReceiptParser;

/// Runs text extraction and parsing over receipt images, one at a time.
///
/// Every failure short of writing the output is recovered locally: a
/// missing file is skipped, an unreadable image produces an empty receipt,
/// and processing continues with the next path either way.
pub struct ReceiptPipeline<S: TextSource> {
    source: S,
    parser: ReceiptParser,
}

impl<S: TextSource> ReceiptPipeline<S> {
    pub fn new(source: S, parser: ReceiptParser) -> Self {
        Self { source, parser }
    }

    /// Process one image into a [`Receipt`].
    ///
    /// A missing file is skipped with a warning and returns `None`; it
    /// contributes nothing to a summary. An existing image the text source
    /// cannot read comes back as empty text and yields an empty receipt.
    pub fn process_path(&self, path: &Path) -> Option<Receipt> {
        if !path.exists() {
            warn!("Skipping missing file: {}", path.display());
            return None;
        }

        let text = self.source.text_from_path(path);
        let receipt = self.parser.parse(&text).with_source(path);

        info!(
            "Found {} items from {} in {}",
            receipt.items.len(),
            receipt.store,
            path.display()
        );

        Some(receipt)
    }

    /// Process a list of images in order, dropping skipped paths.
    pub fn process_all(&self, paths: &[impl AsRef<Path>]) -> Vec<Receipt> {
        paths
            .iter()
            .filter_map(|path| self.process_path(path.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::Store;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Canned per-path text, standing in for the OCR engine. Paths with no
    /// entry come back empty, like an image the engine cannot read.
    struct FixedText(HashMap<PathBuf, String>);

    impl TextSource for FixedText {
        fn text_from_path(&self, path: &Path) -> String {
            self.0.get(path).cloned().unwrap_or_default()
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"not a real image").unwrap();
        path
    }

    fn pipeline(texts: HashMap<PathBuf, String>) -> ReceiptPipeline<FixedText> {
        ReceiptPipeline::new(FixedText(texts), ReceiptParser::new())
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let pipeline = pipeline(HashMap::new());
        assert_eq!(
            pipeline.process_path(Path::new("no-such-receipt.jpg")),
            None
        );
    }

    #[test]
    fn test_unreadable_image_yields_empty_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let path = touch(dir.path(), "garbled.jpg");

        // No canned text for this path, so extraction comes back empty.
        let receipt = pipeline(HashMap::new()).process_path(&path).unwrap();
        assert_eq!(receipt.store, Store::Unknown);
        assert!(receipt.items.is_empty());
        assert_eq!(receipt.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_process_all_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let first = touch(dir.path(), "a.jpg");
        let missing = dir.path().join("gone.jpg");
        let garbled = touch(dir.path(), "b.jpg");
        let last = touch(dir.path(), "c.jpg");

        let mut texts = HashMap::new();
        texts.insert(first.clone(), "WAL*MART\nMILK 3.50 X\n".to_string());
        texts.insert(last.clone(), "TRADER JOE'S\nSALSA 2.99\n".to_string());

        let receipts =
            pipeline(texts).process_all(&[&first, &missing, &garbled, &last]);

        // The missing path is dropped; the garbled one still registers an
        // empty receipt; later paths are unaffected.
        assert_eq!(receipts.len(), 3);
        assert_eq!(receipts[0].store, Store::Walmart);
        assert_eq!(receipts[0].items.len(), 1);
        assert_eq!(receipts[1].store, Store::Unknown);
        assert!(receipts[1].items.is_empty());
        assert_eq!(receipts[2].store, Store::TraderJoes);
        assert_eq!(receipts[2].items[0].name, "SALSA");
    }
}
