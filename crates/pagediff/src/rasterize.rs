//! PDF page rasterization.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use pdfium_render::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::grid::PixelGrid;

/// Resolution used when none is configured.
pub const DEFAULT_DPI: u32 = 300;

/// PDF user space is 72 points per inch.
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("PDF not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("pdfium library unavailable: {0}")]
    Library(String),

    #[error("failed to open PDF {}: {message}", path.display())]
    Document { path: PathBuf, message: String },

    #[error("{} has no page {index}", path.display())]
    Page { path: PathBuf, index: u16 },

    #[error("failed to render page {index} of {}: {message}", path.display())]
    Render {
        path: PathBuf,
        index: u16,
        message: String,
    },
}

pub trait Rasterizer {
    /// Render one page of the PDF at `path` to a pixel grid.
    fn rasterize(&self, path: &Path, index: u16) -> Result<PixelGrid, RasterizeError>;
}

/// Renders through a dynamically loaded pdfium library.
pub struct PdfiumRasterizer {
    dpi: u32,
    /// Directory holding the pdfium shared library. `None` tries the
    /// working directory, then the system library path.
    library_dir: Option<PathBuf>,
    /// Bound on first use and shared by every later page.
    pdfium: OnceCell<Pdfium>,
}

impl Default for PdfiumRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_DPI, None)
    }
}

impl PdfiumRasterizer {
    pub fn new(dpi: u32, library_dir: Option<PathBuf>) -> Self {
        Self {
            dpi,
            library_dir,
            pdfium: OnceCell::new(),
        }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    fn pdfium(&self) -> Result<&Pdfium, RasterizeError> {
        if let Some(pdfium) = self.pdfium.get() {
            return Ok(pdfium);
        }
        let pdfium = self.bind()?;
        Ok(self.pdfium.get_or_init(|| pdfium))
    }

    fn bind(&self) -> Result<Pdfium, RasterizeError> {
        let bindings = match &self.library_dir {
            Some(dir) => {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| RasterizeError::Library(e.to_string()))?;
        Ok(Pdfium::new(bindings))
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(&self, path: &Path, index: u16) -> Result<PixelGrid, RasterizeError> {
        if !path.is_file() {
            return Err(RasterizeError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let pdfium = self.pdfium()?;
        // Dropping `document` closes it, whichever way this function returns.
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| RasterizeError::Document {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let page = document
            .pages()
            .get(index.into())
            .map_err(|_| RasterizeError::Page {
                path: path.to_path_buf(),
                index,
            })?;

        let render_err = |message: String| RasterizeError::Render {
            path: path.to_path_buf(),
            index,
            message,
        };

        let config =
            PdfRenderConfig::new().scale_page_by_factor(self.dpi as f32 / POINTS_PER_INCH);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| render_err(e.to_string()))?;

        let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
            render_err(format!("bitmap buffer does not match {width}x{height}"))
        })?;
        debug!(path = %path.display(), index, width, height, dpi = self.dpi, "rasterized page");

        Ok(PixelGrid::from_dynamic(image::DynamicImage::ImageRgba8(rgba)))
    }
}
