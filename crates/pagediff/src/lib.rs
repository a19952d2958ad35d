//! Pixel-exact visual diffs of raster images and PDF pages.
//!
//! Load two sources into [`PixelGrid`]s, run [`compare`], and persist the
//! diff image with [`encode::write_png`]. [`pipeline`] wires those steps
//! together for files on disk.

pub mod compare;
pub mod decode;
pub mod encode;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod rasterize;

pub use self::compare::{Comparison, DiffError, MISMATCH_PERCENT, compare};
pub use self::decode::{Codec, DecoderRegistry};
pub use self::error::{Error, Result};
pub use self::grid::{Bounds, PixelGrid};
pub use self::rasterize::{PdfiumRasterizer, Rasterizer};
