use image::{Rgba, RgbaImage};
use tracing::debug;

use super::{Comparison, DiffError};
use crate::grid::{Bounds, PixelGrid};

const MISMATCH_MARKER: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Exact pixel-by-pixel comparison of `previous` against `new`.
///
/// The diff image shows `new` at full opacity with every mismatching pixel
/// replaced by opaque red. Pixels match only when all four alpha-premultiplied
/// 16-bit channels are equal.
pub fn compare(previous: &PixelGrid, new: &PixelGrid) -> Result<Comparison, DiffError> {
    let bounds = previous.bounds();
    if !bounds_match(&bounds, &new.bounds()) {
        return Err(DiffError::DimensionMismatch {
            left: bounds,
            right: new.bounds(),
        });
    }

    let mut diff_image = RgbaImage::new(bounds.width(), bounds.height());
    let mut diff_pixels: u64 = 0;

    for y in bounds.min_y()..bounds.max_y() {
        for x in bounds.min_x()..bounds.max_x() {
            let before = previous.at(x, y);
            let after = new.at(x, y);
            let (dx, dy) = (x - bounds.min_x(), y - bounds.min_y());

            diff_image.put_pixel(dx, dy, opaque_8bit(after));

            if !is_equal_color(before, after) {
                diff_pixels += 1;
                diff_image.put_pixel(dx, dy, MISMATCH_MARKER);
            }
        }
    }

    let total_pixels = bounds.pixel_count();
    let percent = if total_pixels > 0 {
        diff_pixels as f64 / total_pixels as f64 * 100.0
    } else {
        0.0
    };
    debug!(diff_pixels, total_pixels, percent, "pixel scan finished");

    Ok(Comparison {
        diff_image,
        diff_pixels,
        total_pixels,
        percent,
    })
}

/// Scale colour channels by alpha, so every fully transparent pixel is
/// `[0, 0, 0, 0]` regardless of its stored colour.
fn premultiply(p: &Rgba<u16>) -> [u16; 4] {
    let Rgba([r, g, b, a]) = *p;
    let scale = |c: u16| (c as u32 * a as u32 / 0xffff) as u16;
    [scale(r), scale(g), scale(b), a]
}

fn is_equal_color(a: &Rgba<u16>, b: &Rgba<u16>) -> bool {
    premultiply(a) == premultiply(b)
}

fn bounds_match(a: &Bounds, b: &Bounds) -> bool {
    a.min_x() == b.min_x()
        && a.min_y() == b.min_y()
        && a.max_x() == b.max_x()
        && a.max_y() == b.max_y()
}

/// Premultiplied colour dropped to 8 bits per channel, at full opacity.
fn opaque_8bit(p: &Rgba<u16>) -> Rgba<u8> {
    let [r, g, b, _] = premultiply(p);
    Rgba([(r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8, 255])
}
