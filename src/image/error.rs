use crate::manifest::error::ManifestError;
use crate::toc::error::TocError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    TocError(#[from] TocError),

    #[error(transparent)]
    ManifestError(#[from] ManifestError),

    #[error("UTOC image size {0} is not a multiple of the sector size")]
    InvalidImageSize(usize),

    #[error("Segment durations run past the end of track {0}")]
    SegmentsExceedTrack(u8),

    #[error("Output file {0} already exists, use --force to overwrite")]
    OutputAlreadyExists(PathBuf),
}

pub type ImageResult<T> = Result<T, ImageError>;
