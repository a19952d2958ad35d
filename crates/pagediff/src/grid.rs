use std::fmt;

use image::{DynamicImage, ImageBuffer, Rgba};

/// 16-bit-per-channel RGBA pixel storage.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Axis-aligned pixel rectangle. `min` is inclusive, `max` exclusive.
///
/// Always well-formed: `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Bounds {
    /// `None` when a minimum exceeds its maximum.
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Option<Self> {
        (min_x <= max_x && min_y <= max_y).then_some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// `width x height` rectangle at `(x, y)`; `None` if it leaves `u32` space.
    pub fn at(x: u32, y: u32, width: u32, height: u32) -> Option<Self> {
        Self::new(x, y, x.checked_add(width)?, y.checked_add(height)?)
    }

    pub fn min_x(&self) -> u32 {
        self.min_x
    }

    pub fn min_y(&self) -> u32 {
        self.min_y
    }

    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn pixel_count(&self) -> u64 {
        (self.width() as u64) * (self.height() as u64)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_x == 0 && self.min_y == 0 {
            write!(f, "{}x{}", self.width(), self.height())
        } else {
            write!(
                f,
                "{}x{} at ({}, {})",
                self.width(),
                self.height(),
                self.min_x,
                self.min_y
            )
        }
    }
}

/// A decoded, read-only image addressed in absolute coordinates.
///
/// Grids coming out of the decoder or the rasterizer start at (0, 0).
/// [`PixelGrid::with_origin`] places the same pixels elsewhere, which is how
/// a cropped region keeps its position in the page it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    bounds: Bounds,
    pixels: Rgba16Image,
}

impl PixelGrid {
    pub fn new(pixels: Rgba16Image) -> Self {
        let (w, h) = pixels.dimensions();
        Self {
            bounds: Bounds {
                min_x: 0,
                min_y: 0,
                max_x: w,
                max_y: h,
            },
            pixels,
        }
    }

    /// `None` when the far corner would overflow `u32`.
    pub fn with_origin(x: u32, y: u32, pixels: Rgba16Image) -> Option<Self> {
        let (w, h) = pixels.dimensions();
        Some(Self {
            bounds: Bounds::at(x, y, w, h)?,
            pixels,
        })
    }

    /// Normalize any decoded image to 16-bit RGBA.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.to_rgba16())
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Pixel at absolute `(x, y)`, or `None` outside the bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba<u16>> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        Some(*self.at(x, y))
    }

    /// Same as [`get`](Self::get) for coordinates already known to be in bounds.
    pub(crate) fn at(&self, x: u32, y: u32) -> &Rgba<u16> {
        self.pixels.get_pixel(x - self.bounds.min_x, y - self.bounds.min_y)
    }

    /// Origin-relative pixel storage, e.g. for encoding.
    pub fn pixels(&self) -> &Rgba16Image {
        &self.pixels
    }

    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba16(self.pixels.clone())
    }
}
