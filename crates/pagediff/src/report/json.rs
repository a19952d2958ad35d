use anyhow::{Context, Result};

use super::Summary;

pub fn render(summary: &Summary) -> Result<String> {
    serde_json::to_string(summary).context("Failed to serialize summary")
}

/// One JSON object on stdout, for CI scripts.
pub fn print_summary(summary: &Summary) -> Result<()> {
    println!("{}", render(summary)?);
    Ok(())
}
