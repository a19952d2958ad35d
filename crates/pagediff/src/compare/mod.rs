pub mod diff;

use image::RgbaImage;
use thiserror::Error;

use crate::grid::Bounds;

pub use self::diff::compare;

/// Percentage reported for inputs that cannot be compared at all.
pub const MISMATCH_PERCENT: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum DiffError {
    #[error("image sizes don't match: {left} vs {right}")]
    DimensionMismatch { left: Bounds, right: Bounds },
}

impl DiffError {
    /// Sentinel score for callers that only look at the number.
    pub fn percent(&self) -> f64 {
        match self {
            Self::DimensionMismatch { .. } => MISMATCH_PERCENT,
        }
    }
}

#[derive(Debug)]
pub struct Comparison {
    /// Second input's colours, with mismatched pixels painted red.
    pub diff_image: RgbaImage,
    /// Number of pixels that differ in any channel.
    pub diff_pixels: u64,
    pub total_pixels: u64,
    /// 0.0 = identical, 100.0 = every pixel differs.
    pub percent: f64,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.diff_pixels == 0
    }
}
