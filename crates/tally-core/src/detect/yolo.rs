//! ONNX Runtime (ort) backed YOLOv8 detector.

use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use ort::ep::XNNPACK;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::Tensor;
use tracing::debug;

use crate::error::DetectError;

use super::labels::COCO_CLASSES;
use super::Detection;

/// Model input edge length. YOLOv8 exports use a square 640x640 input.
const INPUT_SIZE: u32 = 640;

/// Letterbox padding color (YOLO convention).
const PAD_VALUE: f32 = 114.0 / 255.0;

/// YOLOv8 object detector.
pub struct YoloDetector {
    session: Mutex<Session>,
    input_name: String,
    confidence_threshold: f32,
    nms_threshold: f32,
}

impl YoloDetector {
    /// Load a YOLOv8 ONNX model from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DetectError> {
        let path = path.as_ref();
        debug!("Loading YOLO model from: {}", path.display());

        let bytes = std::fs::read(path)
            .map_err(|e| DetectError::ModelLoad(format!("{}: {}", path.display(), e)))?;

        let session = Session::builder()
            .map_err(|e| DetectError::SessionCreate(e.to_string()))?
            .with_execution_providers([XNNPACK::default().build()])
            .map_err(|e| DetectError::SessionCreate(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| DetectError::SessionCreate(e.to_string()))?
            .with_intra_threads(4)
            .map_err(|e| DetectError::SessionCreate(e.to_string()))?
            .commit_from_memory(&bytes)
            .map_err(|e| DetectError::ModelLoad(e.to_string()))?;

        let input_name = session
            .inputs()
            .iter()
            .map(|i| i.name().to_string())
            .next()
            .ok_or_else(|| DetectError::ModelLoad("model has no inputs".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            confidence_threshold: 0.25,
            nms_threshold: 0.45,
        })
    }

    /// Set the minimum class confidence for kept detections.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Set the IoU threshold for non-maximum suppression.
    pub fn with_nms_threshold(mut self, threshold: f32) -> Self {
        self.nms_threshold = threshold;
        self
    }

    /// Run detection on an image.
    ///
    /// Returns detections with boxes in source image coordinates, sorted
    /// by descending confidence.
    pub fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectError> {
        let start = Instant::now();
        let (img_w, img_h) = image.dimensions();

        let (input_data, letterbox) = preprocess(image);
        let shape: Vec<i64> = vec![1, 3, INPUT_SIZE as i64, INPUT_SIZE as i64];
        let tensor = Tensor::from_array((shape, input_data))
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| DetectError::Inference(format!("failed to lock session: {}", e)))?;

        let inputs: Vec<(&str, ort::session::SessionInputValue<'static>)> =
            vec![(self.input_name.as_str(), tensor.into())];
        let outputs = session
            .run(inputs)
            .map_err(|e| DetectError::Inference(e.to_string()))?;

        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| DetectError::OutputExtraction("model produced no outputs".to_string()))?;

        let (shape_ref, data) = value
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectError::OutputExtraction(e.to_string()))?;
        let out_shape: Vec<usize> = shape_ref.iter().map(|&s| s as usize).collect();

        let candidates = decode_output(
            data,
            &out_shape,
            &letterbox,
            (img_w as f32, img_h as f32),
            self.confidence_threshold,
        )?;
        let detections = nms(candidates, self.nms_threshold);

        debug!(
            "Detected {} objects in {}ms",
            detections.len(),
            start.elapsed().as_millis()
        );

        Ok(detections)
    }
}

/// Scale and offsets used to map letterboxed coordinates back to the
/// source image.
struct Letterbox {
    scale: f32,
    pad_x: f32,
    pad_y: f32,
}

/// Resize with preserved aspect ratio onto a padded square canvas and
/// convert to normalized CHW float data.
fn preprocess(image: &DynamicImage) -> (Vec<f32>, Letterbox) {
    let (img_w, img_h) = image.dimensions();
    let scale = (INPUT_SIZE as f32 / img_w as f32).min(INPUT_SIZE as f32 / img_h as f32);
    let new_w = ((img_w as f32 * scale) as u32).max(1);
    let new_h = ((img_h as f32 * scale) as u32).max(1);
    let pad_x = ((INPUT_SIZE - new_w) / 2) as f32;
    let pad_y = ((INPUT_SIZE - new_h) / 2) as f32;

    let resized = image.resize_exact(new_w, new_h, FilterType::Triangle).to_rgb8();

    let area = (INPUT_SIZE * INPUT_SIZE) as usize;
    let mut data = vec![PAD_VALUE; 3 * area];
    for (x, y, pixel) in resized.enumerate_pixels() {
        let tx = x as usize + pad_x as usize;
        let ty = y as usize + pad_y as usize;
        for c in 0..3 {
            data[c * area + ty * INPUT_SIZE as usize + tx] = pixel.0[c] as f32 / 255.0;
        }
    }

    (data, Letterbox { scale, pad_x, pad_y })
}

/// Decode the `[1, 4 + classes, anchors]` YOLOv8 output head into
/// threshold-filtered detections in source image coordinates.
fn decode_output(
    data: &[f32],
    shape: &[usize],
    letterbox: &Letterbox,
    (img_w, img_h): (f32, f32),
    confidence_threshold: f32,
) -> Result<Vec<Detection>, DetectError> {
    if shape.len() != 3 || shape[1] < 5 {
        return Err(DetectError::OutputExtraction(format!(
            "unexpected output shape: {:?}",
            shape
        )));
    }

    let channels = shape[1];
    let anchors = shape[2];
    let num_classes = channels - 4;
    let at = |c: usize, j: usize| data[c * anchors + j];

    let mut detections = Vec::new();
    for j in 0..anchors {
        let mut best_class = 0;
        let mut best_score = 0.0f32;
        for class in 0..num_classes {
            let score = at(4 + class, j);
            if score > best_score {
                best_score = score;
                best_class = class;
            }
        }

        if best_score < confidence_threshold {
            continue;
        }

        let cx = at(0, j);
        let cy = at(1, j);
        let w = at(2, j);
        let h = at(3, j);

        let x1 = ((cx - w / 2.0 - letterbox.pad_x) / letterbox.scale).clamp(0.0, img_w);
        let y1 = ((cy - h / 2.0 - letterbox.pad_y) / letterbox.scale).clamp(0.0, img_h);
        let x2 = ((cx + w / 2.0 - letterbox.pad_x) / letterbox.scale).clamp(0.0, img_w);
        let y2 = ((cy + h / 2.0 - letterbox.pad_y) / letterbox.scale).clamp(0.0, img_h);

        let label = COCO_CLASSES
            .get(best_class)
            .copied()
            .unwrap_or("unknown")
            .to_string();

        detections.push(Detection {
            label,
            confidence: best_score,
            bbox: [x1, y1, x2, y2],
        });
    }

    Ok(detections)
}

/// Greedy class-wise non-maximum suppression, highest confidence first.
fn nms(mut candidates: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<Detection> = Vec::new();
    for candidate in candidates {
        let suppressed = kept
            .iter()
            .any(|k| k.label == candidate.label && k.iou(&candidate) > iou_threshold);
        if !suppressed {
            kept.push(candidate);
        }
    }

    kept
}
