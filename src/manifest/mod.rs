use crate::manifest::error::{ManifestError, ManifestResult};
use crate::toc::split::Segment;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub mod error;

/// Segment list for a split, read from TOML:
///
/// ```toml
/// [[segment]]
/// title = "Intro"
/// duration = 12.5
///
/// [[segment]]
/// title = "Outro"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(rename = "segment", default)]
    pub segments: Vec<ManifestSegment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestSegment {
    pub title: Option<String>,

    /// Seconds.
    pub duration: Option<f64>,
}

impl Manifest {
    pub fn parse(text: &str) -> ManifestResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> ManifestResult<Self> {
        debug!("Reading manifest: {:?}", path.as_ref());
        let text = tokio::fs::read_to_string(path).await?;
        Self::parse(&text)
    }

    pub fn into_segments(self) -> ManifestResult<Vec<Segment>> {
        if self.segments.is_empty() {
            return Err(ManifestError::NoSegments);
        }

        self.segments
            .into_iter()
            .enumerate()
            .map(|(index, segment)| -> ManifestResult<Segment> {
                let duration = segment
                    .duration
                    .map(|value| {
                        Duration::try_from_secs_f64(value)
                            .map_err(|_| ManifestError::InvalidDuration { index, value })
                    })
                    .transpose()?;

                Ok(Segment {
                    title: segment.title,
                    duration,
                })
            })
            .collect()
    }
}
