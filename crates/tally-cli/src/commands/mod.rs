//! CLI subcommands.

pub mod config;
pub mod detect;
pub mod parse;
pub mod scan;

use std::path::{Path, PathBuf};

use tally_core::TallyConfig;

/// Load the config file given on the command line, or the default config
/// file if present, or built-in defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<TallyConfig> {
    if let Some(path) = config_path {
        return Ok(TallyConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        return Ok(TallyConfig::from_file(&default_path)?);
    }

    Ok(TallyConfig::default())
}

/// Resolve the OCR model directory: explicit argument first, then the
/// configured directory, then the user cache directory.
pub(crate) fn resolve_model_dir(arg: Option<PathBuf>, config: &TallyConfig) -> PathBuf {
    if let Some(dir) = arg {
        return dir;
    }

    if config.ocr.model_dir.exists() {
        return config.ocr.model_dir.clone();
    }

    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
        .join("models")
}
