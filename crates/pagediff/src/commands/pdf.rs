use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pagediff::{PdfiumRasterizer, Rasterizer, pipeline};
use tracing::info;

use super::image::compare_files;
use crate::config::ResolvedRunConfig;
use crate::report::Summary;

/// Everything one `pagediff pdf` invocation needs.
pub struct PdfRun {
    pub previous: PathBuf,
    pub new: PathBuf,
    /// Keep rasters here; `None` uses a temporary directory removed on exit.
    pub raster_dir: Option<PathBuf>,
    pub config: ResolvedRunConfig,
}

/// `pagediff pdf` — rasterize the first page of each PDF, then compare.
pub fn pdf(run: &PdfRun) -> Result<Summary> {
    let rasterizer = PdfiumRasterizer::new(run.config.dpi, run.config.pdfium_library.clone());
    pdf_with(run, &rasterizer)
}

fn pdf_with(run: &PdfRun, rasterizer: &dyn Rasterizer) -> Result<Summary> {
    let temp_dir;
    let dir: &Path = match &run.raster_dir {
        Some(dir) => dir,
        None => {
            temp_dir = tempfile::Builder::new()
                .prefix("pagediff-")
                .tempdir()
                .context("Failed to create temporary directory")?;
            temp_dir.path()
        }
    };

    let previous_png = pipeline::raster_path(dir, "previous", &run.previous);
    let new_png = pipeline::raster_path(dir, "new", &run.new);

    for (pdf, png) in [(&run.previous, &previous_png), (&run.new, &new_png)] {
        pipeline::rasterize_to_png(rasterizer, pdf, png)
            .with_context(|| format!("Failed to rasterize {}", pdf.display()))?;
    }

    let comparison = compare_files(&previous_png, &new_png, &run.config.output)?;
    if run.raster_dir.is_some() {
        info!(dir = %dir.display(), "kept page rasters");
    }

    Ok(Summary::new(
        &run.previous,
        &run.new,
        &run.config.output,
        &comparison,
    ))
}
