use thiserror::Error;

use crate::compare::DiffError;
use crate::decode::DecodeError;
use crate::encode::WriteError;
use crate::rasterize::RasterizeError;

/// Any failure of a comparison run. None of them are retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Rasterize(#[from] RasterizeError),

    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
