//! Raster image decoding.
//!
//! Formats are resolved through a [`DecoderRegistry`]: an ordered list of
//! [`Codec`]s, each recognising its own file signature. The first codec whose
//! signature matches decodes the bytes; a file nobody recognises is rejected
//! as unsupported.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;
use tracing::debug;

use crate::grid::PixelGrid;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unrecognized image format")]
    Unsupported,

    #[error("corrupt {codec} data")]
    Malformed {
        codec: &'static str,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// A single image format the registry can dispatch to.
pub trait Codec {
    fn name(&self) -> &'static str;
    /// Cheap signature check on the leading bytes.
    fn sniff(&self, bytes: &[u8]) -> bool;
    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid, CodecError>;
}

/// Codec backed by one of the `image` crate's format decoders.
pub struct ImageCodec {
    name: &'static str,
    format: ImageFormat,
}

impl ImageCodec {
    pub const fn new(name: &'static str, format: ImageFormat) -> Self {
        Self { name, format }
    }
}

impl Codec for ImageCodec {
    fn name(&self) -> &'static str {
        self.name
    }

    fn sniff(&self, bytes: &[u8]) -> bool {
        image::guess_format(bytes).is_ok_and(|f| f == self.format)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid, CodecError> {
        let image = image::load_from_memory_with_format(bytes, self.format).map_err(|source| {
            CodecError::Malformed {
                codec: self.name,
                source,
            }
        })?;
        Ok(PixelGrid::from_dynamic(image))
    }
}

pub struct DecoderRegistry {
    codecs: Vec<Box<dyn Codec>>,
}

impl Default for DecoderRegistry {
    /// PNG, JPEG, GIF, WebP, BMP, TIFF, in that priority order.
    fn default() -> Self {
        Self::empty()
            .with(ImageCodec::new("png", ImageFormat::Png))
            .with(ImageCodec::new("jpeg", ImageFormat::Jpeg))
            .with(ImageCodec::new("gif", ImageFormat::Gif))
            .with(ImageCodec::new("webp", ImageFormat::WebP))
            .with(ImageCodec::new("bmp", ImageFormat::Bmp))
            .with(ImageCodec::new("tiff", ImageFormat::Tiff))
    }
}

impl DecoderRegistry {
    pub fn empty() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Append a codec at the lowest priority.
    pub fn with(mut self, codec: impl Codec + 'static) -> Self {
        self.codecs.push(Box::new(codec));
        self
    }

    pub fn codec_names(&self) -> Vec<&'static str> {
        self.codecs.iter().map(|c| c.name()).collect()
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PixelGrid, CodecError> {
        let codec = self
            .codecs
            .iter()
            .find(|c| c.sniff(bytes))
            .ok_or(CodecError::Unsupported)?;
        debug!(codec = codec.name(), len = bytes.len(), "decoding");
        codec.decode(bytes)
    }

    pub fn decode_file(&self, path: &Path) -> Result<PixelGrid, DecodeError> {
        let bytes = std::fs::read(path).map_err(|source| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode(&bytes).map_err(|source| DecodeError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }
}
