use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::compare::{Comparison, compare};
use crate::decode::DecoderRegistry;
use crate::encode::{write_png, write_rgba8_png};
use crate::error::Result;
use crate::rasterize::Rasterizer;

/// Only the first page of a PDF is ever compared.
pub const FIRST_PAGE: u16 = 0;

/// Extension of intermediate page rasters.
pub const RASTER_EXTENSION: &str = "png";

/// Decode both files and compare them. `previous` is decoded first.
pub fn compare_paths(
    previous: &Path,
    new: &Path,
    registry: &DecoderRegistry,
) -> Result<Comparison> {
    let before = registry.decode_file(previous)?;
    let after = registry.decode_file(new)?;
    debug!(
        previous = %previous.display(),
        new = %new.display(),
        bounds = %before.bounds(),
        "decoded inputs"
    );
    Ok(compare(&before, &after)?)
}

/// `<dir>/<role>/<stem>.png` for the PDF at `pdf`.
///
/// The role subdirectory keeps two PDFs that share a file name apart.
pub fn raster_path(dir: &Path, role: &str, pdf: &Path) -> PathBuf {
    let stem = pdf.file_stem().unwrap_or(pdf.as_os_str());
    dir.join(role)
        .join(format!("{}.{RASTER_EXTENSION}", stem.to_string_lossy()))
}

/// Render the first page of `pdf` and store it losslessly at `dest`.
pub fn rasterize_to_png(rasterizer: &dyn Rasterizer, pdf: &Path, dest: &Path) -> Result<()> {
    let grid = rasterizer.rasterize(pdf, FIRST_PAGE)?;
    write_png(&grid.to_dynamic(), dest)?;
    info!(pdf = %pdf.display(), raster = %dest.display(), bounds = %grid.bounds(), "rasterized");
    Ok(())
}

/// Persist the diff image of a finished comparison.
pub fn write_diff(comparison: &Comparison, output: &Path) -> Result<()> {
    write_rgba8_png(&comparison.diff_image, output)?;
    Ok(())
}
