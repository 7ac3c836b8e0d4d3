//! Detect command - run object detection on an image and print the results.

use std::path::PathBuf;

use clap::Args;
use console::style;

use tally_core::YoloDetector;

use super::load_config;

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// Input image
    #[arg(required = true)]
    input: PathBuf,

    /// Path to the YOLO ONNX model
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Minimum class confidence (0.0 - 1.0)
    #[arg(long)]
    confidence: Option<f32>,

    /// IoU threshold for non-maximum suppression (0.0 - 1.0)
    #[arg(long)]
    nms: Option<f32>,

    /// Print detections as JSON instead of a list
    #[arg(long)]
    json: bool,
}

pub async fn run(args: DetectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let model_path = args
        .model
        .unwrap_or_else(|| config.detect.model_path.clone());
    if !model_path.exists() {
        anyhow::bail!(
            "Detection model not found at {}. Export a YOLOv8 model to ONNX and point --model at it.",
            model_path.display()
        );
    }

    let detector = YoloDetector::from_file(&model_path)?
        .with_confidence_threshold(
            args.confidence.unwrap_or(config.detect.confidence_threshold),
        )
        .with_nms_threshold(args.nms.unwrap_or(config.detect.nms_threshold));

    let image = image::open(&args.input)?;
    let detections = detector.detect(&image)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detections)?);
        return Ok(());
    }

    if detections.is_empty() {
        println!("{} No objects detected", style("ℹ").blue());
        return Ok(());
    }

    println!();
    println!("Detected objects:");
    for detection in &detections {
        println!(
            "- {} ({:.2}): [{:.1}, {:.1}, {:.1}, {:.1}]",
            detection.label,
            detection.confidence,
            detection.bbox[0],
            detection.bbox[1],
            detection.bbox[2],
            detection.bbox[3]
        );
    }

    Ok(())
}
