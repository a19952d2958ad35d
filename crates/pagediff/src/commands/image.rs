use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagediff::{Comparison, DecoderRegistry, pipeline};
use tracing::debug;

use crate::config::ResolvedRunConfig;
use crate::report::Summary;

/// Everything one `pagediff image` invocation needs.
pub struct ImageRun {
    pub previous: PathBuf,
    pub new: PathBuf,
    pub config: ResolvedRunConfig,
}

/// `pagediff image` — compare two raster files and write the diff.
pub fn image(run: &ImageRun) -> Result<Summary> {
    let comparison = compare_files(&run.previous, &run.new, &run.config.output)?;
    Ok(Summary::new(
        &run.previous,
        &run.new,
        &run.config.output,
        &comparison,
    ))
}

/// Decode, compare, and persist the diff image. Shared with `pagediff pdf`.
pub(super) fn compare_files(previous: &Path, new: &Path, output: &Path) -> Result<Comparison> {
    let registry = DecoderRegistry::default();
    debug!(codecs = ?registry.codec_names(), "decoder registry");

    let comparison = pipeline::compare_paths(previous, new, &registry).with_context(|| {
        format!(
            "Failed to compare {} with {}",
            previous.display(),
            new.display()
        )
    })?;
    pipeline::write_diff(&comparison, output).context("Failed to save diff image")?;
    Ok(comparison)
}
