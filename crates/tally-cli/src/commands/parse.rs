//! Parse command - extract items from a single receipt.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use tally_core::receipt::ReceiptParser;
use tally_core::summary::{Summary, format_price, write_summary};
use tally_core::{OcrEngine, Receipt};

use super::{load_config, resolve_model_dir};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input receipt image (or text file with --text)
    #[arg(required = true)]
    input: PathBuf,

    /// Treat the input as already-extracted text and skip OCR
    #[arg(long)]
    text: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = if args.text {
        fs::read_to_string(&args.input)?
    } else {
        let model_dir = resolve_model_dir(args.model_dir.clone(), &config);
        let engine = OcrEngine::from_dir(&model_dir, &config.ocr).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load OCR models from {}: {}",
                model_dir.display(),
                e
            )
        })?;
        engine.extract_text_from_path(&args.input)
    };

    let parser = ReceiptParser::new().with_unknown_policy(config.parse.parse_unknown_stores);
    let receipt = parser.parse(&text).with_source(&args.input);

    let output = format_receipt(&receipt, args.format, config.output.blank_row_between_stores)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_receipt(
    receipt: &Receipt,
    format: OutputFormat,
    blank_row_between_stores: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Csv => {
            let summary = Summary::from_receipts(std::iter::once(receipt));
            let mut buf = Vec::new();
            write_summary(&summary, &mut buf, blank_row_between_stores)?;
            Ok(String::from_utf8(buf)?)
        }
        OutputFormat::Text => Ok(format_receipt_text(receipt)),
    }
}

fn format_receipt_text(receipt: &Receipt) -> String {
    let mut output = String::new();

    output.push_str(&format!("Store: {}\n", receipt.store));
    output.push('\n');

    for item in &receipt.items {
        output.push_str(&format!("  {}  {}\n", item.name, format_price(item.price)));
    }

    output.push('\n');
    output.push_str(&format!(
        "{} items, total {}\n",
        receipt.items.len(),
        format_price(receipt.total())
    ));

    output
}
