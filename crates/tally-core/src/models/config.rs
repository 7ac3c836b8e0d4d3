//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the tally pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Receipt parsing configuration.
    pub parse: ParseConfig,

    /// Object detection configuration.
    pub detect: DetectConfig,

    /// Summary output configuration.
    pub output: OutputConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing the OCR model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "text-detection.rten".to_string(),
            recognition_model: "text-recognition.rten".to_string(),
        }
    }
}

/// Receipt parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Parse receipts from unrecognized stores with the generic grammar.
    /// When false, unknown stores yield an empty item list.
    pub parse_unknown_stores: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            parse_unknown_stores: true,
        }
    }
}

/// Object detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Path to the YOLO ONNX model file.
    pub model_path: PathBuf,

    /// Minimum class confidence to keep a detection (0.0 - 1.0).
    pub confidence_threshold: f32,

    /// IoU threshold for non-maximum suppression (0.0 - 1.0).
    pub nms_threshold: f32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/yolov8n.onnx"),
            confidence_threshold: 0.25,
            nms_threshold: 0.45,
        }
    }
}

/// Summary output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default path for the summary CSV.
    pub summary_path: PathBuf,

    /// Write a blank separator row after each store section.
    pub blank_row_between_stores: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: PathBuf::from("shopping_summary.csv"),
            blank_row_between_stores: true,
        }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
