use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG to {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to flush {}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `image` to `path` as PNG, creating missing parent directories.
pub fn write_png(image: &DynamicImage, path: &Path) -> Result<(), WriteError> {
    write_with(path, |w| image.write_with_encoder(PngEncoder::new(w)))
}

/// Same as [`write_png`] for an 8-bit RGBA buffer, without copying it.
pub fn write_rgba8_png(image: &RgbaImage, path: &Path) -> Result<(), WriteError> {
    write_with(path, |w| {
        PngEncoder::new(w).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
    })
}

/// The file handle lives only inside this call and is closed on every
/// return path, including a failed encode.
fn write_with<F>(path: &Path, encode: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut BufWriter<File>) -> image::ImageResult<()>,
{
    let create_err = |source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(create_err)?;
    }

    let file = File::create(path).map_err(create_err)?;
    let mut writer = BufWriter::new(file);
    encode(&mut writer).map_err(|source| WriteError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| WriteError::Flush {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "wrote PNG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn writes_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        write_png(&DynamicImage::ImageRgba8(img.clone()), &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back, img);
    }

    #[test]
    fn writes_rgba8_buffer_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.png");
        let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 80, y as u8 * 100, 7, 255]));
        write_rgba8_png(&img, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba8();
        assert_eq!(back, img);
    }

    #[test]
    fn preserves_16_bit_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep.png");
        let img = crate::grid::Rgba16Image::from_pixel(2, 2, Rgba([1, 2, 3, 65535]));
        write_png(&DynamicImage::ImageRgba16(img.clone()), &path).unwrap();

        let back = image::open(&path).unwrap().to_rgba16();
        assert_eq!(back, img);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/out.png");
        let img = RgbaImage::new(1, 1);
        write_png(&DynamicImage::ImageRgba8(img), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let path = blocker.join("out.png");

        let err = write_png(&DynamicImage::ImageRgba8(RgbaImage::new(1, 1)), &path).unwrap_err();
        assert!(matches!(err, WriteError::Create { .. }));
    }
}
