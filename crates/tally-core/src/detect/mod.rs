//! Object detection using a YOLOv8-family ONNX model.
//!
//! Detections are consumed for console display only; the receipt pipeline
//! does not use them.

mod labels;
mod yolo;

pub use labels::COCO_CLASSES;
pub use yolo::YoloDetector;

use serde::{Deserialize, Serialize};

/// A single detected object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// Class label, e.g. "person".
    pub label: String,

    /// Class confidence score (0.0 - 1.0).
    pub confidence: f32,

    /// Bounding box in source image coordinates (x1, y1, x2, y2).
    pub bbox: [f32; 4],
}

impl Detection {
    /// Intersection-over-union with another detection's box.
    pub fn iou(&self, other: &Detection) -> f32 {
        let x1 = self.bbox[0].max(other.bbox[0]);
        let y1 = self.bbox[1].max(other.bbox[1]);
        let x2 = self.bbox[2].min(other.bbox[2]);
        let y2 = self.bbox[3].min(other.bbox[3]);

        let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        let area_a = (self.bbox[2] - self.bbox[0]) * (self.bbox[3] - self.bbox[1]);
        let area_b = (other.bbox[2] - other.bbox[0]) * (other.bbox[3] - other.bbox[1]);
        let union = area_a + area_b - intersection;

        if union <= 0.0 {
            0.0
        } else {
            intersection / union
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(bbox: [f32; 4]) -> Detection {
        Detection {
            label: "person".to_string(),
            confidence: 0.9,
            bbox,
        }
    }

    #[test]
    fn test_iou_identical_boxes() {
        let a = det([0.0, 0.0, 10.0, 10.0]);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_disjoint_boxes() {
        let a = det([0.0, 0.0, 10.0, 10.0]);
        let b = det([20.0, 20.0, 30.0, 30.0]);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_half_overlap() {
        let a = det([0.0, 0.0, 10.0, 10.0]);
        let b = det([5.0, 0.0, 15.0, 10.0]);
        // intersection 50, union 150
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);
    }
}
