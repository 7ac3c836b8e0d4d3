//! Scan command - batch receipt images into a shopping summary CSV.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use tally_core::receipt::{ReceiptParser, ReceiptPipeline};
use tally_core::summary::{Summary, format_price, write_summary_file};
use tally_core::{OcrEngine, Receipt};

use super::{load_config, resolve_model_dir};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input files or glob pattern (e.g. "receipts/*.jpg")
    #[arg(required = true)]
    input: String,

    /// Output CSV path (default from config: shopping_summary.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Skip receipts from unrecognized stores instead of parsing them
    /// with the generic grammar
    #[arg(long)]
    skip_unknown: bool,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(
                ext.to_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "webp" | "tiff" | "tif" | "bmp"
            )
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching image files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} receipt images to process",
        style("ℹ").blue(),
        files.len()
    );

    // Load the OCR engine up front; a broken model setup is fatal, unlike
    // per-image failures below.
    let model_dir = resolve_model_dir(args.model_dir.clone(), &config);
    let engine = OcrEngine::from_dir(&model_dir, &config.ocr).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load OCR models from {}: {}",
            model_dir.display(),
            e
        )
    })?;

    let parser = ReceiptParser::new()
        .with_unknown_policy(config.parse.parse_unknown_stores && !args.skip_unknown);
    let pipeline = ReceiptPipeline::new(engine, parser);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut receipts: Vec<Receipt> = Vec::with_capacity(files.len());
    for path in &files {
        // The pipeline skips files that vanished since the glob ran.
        if let Some(receipt) = pipeline.process_path(path) {
            pb.println(format!(
                "Found {} items from {} in {}",
                receipt.items.len(),
                receipt.store,
                path.display()
            ));
            receipts.push(receipt);
        }
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    let summary = Summary::from_receipts(&receipts);

    // Write the summary CSV; a failure here aborts with a clear message.
    let output_path = args
        .output
        .unwrap_or_else(|| config.output.summary_path.clone());
    write_summary_file(&summary, &output_path, config.output.blank_row_between_stores).map_err(|e| {
        anyhow::anyhow!("Failed to write summary to {}: {}", output_path.display(), e)
    })?;

    println!();
    for (store, items) in summary.entries() {
        println!(
            "   {}: {} items, {}",
            style(store.display_name()).cyan(),
            items.len(),
            format_price(summary.store_total(*store))
        );
    }
    println!(
        "{} Summary written to {}",
        style("✓").green(),
        output_path.display()
    );

    debug!("Processed {} images in {:?}", receipts.len(), start.elapsed());

    Ok(())
}
