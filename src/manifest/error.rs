use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    TomlError(#[from] toml::de::Error),

    #[error("Manifest does not list any segments")]
    NoSegments,

    #[error("Segment {index} has an invalid duration: {value}")]
    InvalidDuration { index: usize, value: f64 },
}

pub type ManifestResult<T> = Result<T, ManifestError>;
