use thiserror::Error;

#[derive(Debug, Error)]
pub enum TocError {
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    #[error("Expected at least {expected} UTOC sectors, found {found}")]
    MissingSector { expected: usize, found: usize },

    #[error("UTOC sector {index} is {size} bytes long, expected {expected}")]
    InvalidSectorSize {
        index: usize,
        size: usize,
        expected: usize,
    },

    #[error("Segment {index} has no duration, only the last segment may omit it")]
    MissingDuration { index: usize },

    #[error("Segment {index} ends past the last addressable group")]
    BoundaryOutOfRange { index: usize },

    #[error("Track {0} is not allocated")]
    TrackNotAllocated(u8),

    #[error("Out of title cells")]
    OutOfTitleCells,

    #[error("Out of track slots")]
    OutOfTrackSlots,
}

pub type TocResult<T> = Result<T, TocError>;
