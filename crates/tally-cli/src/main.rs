//! CLI application for receipt OCR summaries.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, detect, parse, scan};

/// tally - Summarize shopping receipts from images, and spot objects while
/// you're at it
#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan receipt images and write a shopping summary CSV
    Scan(scan::ScanArgs),

    /// Parse a single receipt image or text file
    Parse(parse::ParseArgs),

    /// Detect objects in an image
    Detect(detect::DetectArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Scan(args) => scan::run(args, cli.config.as_deref()).await,
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()).await,
        Commands::Detect(args) => detect::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
