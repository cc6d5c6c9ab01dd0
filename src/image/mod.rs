use crate::image::error::{ImageError, ImageResult};
use crate::manifest::Manifest;
use crate::md::SECTOR_SIZE;
use crate::text::decode_half_width;
use crate::toc::TocEditor;
use crate::toc::codec::UtocCodec;
use crate::toc::error::TocError;
use crate::toc::models::{Toc, TrackFragment};
use crate::toc::session::EditSession;
use crate::toc::split::{segments_fit, validate_segments};
use crate::toc::title::read_title;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod error;

/// UTOC dump: raw 2352-byte sectors back to back, starting with sector 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtocImage {
    sectors: Vec<Vec<u8>>,
}

impl UtocImage {
    pub fn from_bytes(data: &[u8]) -> ImageResult<Self> {
        if data.is_empty() || data.len() % SECTOR_SIZE != 0 {
            return Err(ImageError::InvalidImageSize(data.len()));
        }

        Ok(Self {
            sectors: data.chunks(SECTOR_SIZE).map(<[u8]>::to_vec).collect(),
        })
    }

    pub async fn load(path: impl AsRef<Path>) -> ImageResult<Self> {
        debug!("Reading UTOC image: {:?}", path.as_ref());
        let data = fs::read(path).await?;
        Self::from_bytes(&data)
    }

    pub fn sectors(&self) -> &[Vec<u8>] {
        &self.sectors
    }

    /// Overwrites the given sectors, leaving the others as they were.
    pub fn apply(&mut self, changed: Vec<(usize, Vec<u8>)>) {
        for (index, sector) in changed {
            info!("Writing UTOC sector {index}");
            match self.sectors.get_mut(index) {
                Some(existing) => *existing = sector,
                None => self.sectors.push(sector),
            }
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.sectors.concat()
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        debug!("Writing UTOC image: {:?}", path.as_ref());
        fs::write(path, self.to_bytes()).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackListing {
    pub number: u8,
    pub fragment: TrackFragment,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscListing {
    pub title: String,
    pub tracks: Vec<TrackListing>,
}

pub fn describe(toc: &Toc) -> DiscListing {
    let title_of = |track: u8| {
        decode_half_width(&read_title(toc, toc.titles.title_map[usize::from(track)]))
    };

    let tracks = toc
        .track_numbers()
        .into_iter()
        .filter_map(|number| {
            toc.track_fragment(number).map(|fragment| TrackListing {
                number,
                fragment: *fragment,
                title: title_of(number),
            })
        })
        .collect();

    DiscListing {
        title: title_of(0),
        tracks,
    }
}

async fn resolve_output(input: &Path, output: Option<&Path>, force: bool) -> ImageResult<PathBuf> {
    let Some(output) = output else {
        return Ok(input.to_path_buf());
    };

    if output != input && fs::metadata(output).await.is_ok() && !force {
        return Err(ImageError::OutputAlreadyExists(output.to_path_buf()));
    }

    Ok(output.to_path_buf())
}

/// Splits `track` of the UTOC image at `input` according to the manifest and writes the
/// result to `output` (or back to `input`). Returns the resulting track numbers.
pub async fn split_image_track(
    input: &Path,
    manifest: &Path,
    track: u8,
    output: Option<&Path>,
    force: bool,
) -> ImageResult<Vec<u8>> {
    let output = resolve_output(input, output, force).await?;
    let segments = Manifest::load(manifest).await?.into_segments()?;
    let mut image = UtocImage::load(input).await?;

    let editor = TocEditor::<UtocCodec>::default();
    let mut session = EditSession::open(*editor.codec(), image.sectors().to_vec())?;

    validate_segments(&segments)?;
    if let Some(fragment) = session.toc().track_fragment(track) {
        if !segments_fit(fragment, &segments) {
            return Err(ImageError::SegmentsExceedTrack(track));
        }
    }

    let tracks = session.edit(|toc| editor.split_track(toc, track, &segments))?;

    image.apply(session.finish()?);
    image.save(&output).await?;

    Ok(tracks)
}

/// Sets the title of `track` in the UTOC image, track 0 being the disc title.
pub async fn set_image_title(
    input: &Path,
    track: u8,
    title: &str,
    output: Option<&Path>,
    force: bool,
) -> ImageResult<()> {
    let output = resolve_output(input, output, force).await?;
    let mut image = UtocImage::load(input).await?;

    let editor = TocEditor::<UtocCodec>::default();
    let mut session = EditSession::open(*editor.codec(), image.sectors().to_vec())?;
    session.edit(|toc| {
        if track != 0 && toc.fragment_slot(track).is_none() {
            return Err(TocError::TrackNotAllocated(track));
        }
        editor.set_title(toc, track, title)
    })?;

    image.apply(session.finish()?);
    image.save(&output).await?;

    Ok(())
}

pub async fn list_image_tracks(input: &Path) -> ImageResult<DiscListing> {
    let image = UtocImage::load(input).await?;
    let session = EditSession::open(UtocCodec, image.sectors().to_vec())?;
    Ok(describe(session.toc()))
}
