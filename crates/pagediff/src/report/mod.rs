pub mod json;
pub mod terminal;

use std::path::{Path, PathBuf};

use anyhow::Result;
use pagediff::Comparison;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of one successful run, as reported to the user.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub previous: PathBuf,
    pub new: PathBuf,
    pub output: PathBuf,
    pub diff_pixels: u64,
    pub total_pixels: u64,
    pub percent: f64,
}

impl Summary {
    pub fn new(previous: &Path, new: &Path, output: &Path, comparison: &Comparison) -> Self {
        Self {
            previous: previous.to_path_buf(),
            new: new.to_path_buf(),
            output: output.to_path_buf(),
            diff_pixels: comparison.diff_pixels,
            total_pixels: comparison.total_pixels,
            percent: comparison.percent,
        }
    }
}

pub fn print(summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => terminal::print_summary(summary),
        OutputFormat::Json => json::print_summary(summary)?,
    }
    Ok(())
}
