pub mod resolve;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::OutputFormat;

pub use self::resolve::{CliOverrides, ResolvedRunConfig};

pub(crate) const CONFIG_FILE: &str = "pagediff.toml";
pub(crate) const DEFAULT_OUTPUT: &str = "diff.png";
const MAX_DPI: u32 = 2400;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Where the diff PNG is written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PdfConfig {
    /// Rasterization resolution in dots per inch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u32>,
    /// Directory containing the pdfium shared library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdfium_library: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub pdf: PdfConfig,
}

pub fn validate_dpi(v: u32) -> Result<u32, String> {
    if !(1..=MAX_DPI).contains(&v) {
        return Err(format!("dpi must be between 1 and {MAX_DPI}, got {v}"));
    }
    Ok(v)
}

fn parse(content: &str, origin: &Path) -> Result<Config> {
    let config: Config = toml::from_str(content)
        .with_context(|| format!("Failed to parse {}", origin.display()))?;
    if let Some(dpi) = config.pdf.dpi {
        validate_dpi(dpi).map_err(|e| anyhow::anyhow!("pdf.{e}"))?;
    }
    Ok(config)
}

/// Read the config file at `path`. A missing file is only an error when
/// `required` is set.
pub fn load(path: &Path, required: bool) -> Result<Config> {
    if !required && !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content, path)
}
