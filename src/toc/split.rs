use crate::md::{GROUPS_PER_FRAME, SAMPLE_RATE, SAMPLES_PER_GROUP};
use crate::text::TitleEncoder;
use crate::toc::address::DiscAddress;
use crate::toc::codec::TocCodec;
use crate::toc::error::{TocError, TocResult};
use crate::toc::models::{Toc, TrackFragment};
use crate::toc::{TocEditor, free_track_number};
use log::{debug, info};
use std::time::Duration;

/// One output track of a split, in playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segment {
    pub title: Option<String>,

    /// Only the last segment may leave this unset, it runs to the end of the source track.
    pub duration: Option<Duration>,
}

impl Segment {
    pub fn new(title: Option<impl Into<String>>, duration: Option<Duration>) -> Self {
        Self {
            title: title.map(Into::into),
            duration,
        }
    }
}

/// Fails with [`TocError::MissingDuration`] if any segment but the last lacks a duration.
pub fn validate_segments(segments: &[Segment]) -> TocResult<()> {
    let last = segments.len().saturating_sub(1);

    match segments[..last].iter().position(|s| s.duration.is_none()) {
        Some(index) => Err(TocError::MissingDuration { index }),
        None => Ok(()),
    }
}

/// Group index at which a track starting at `start` is cut after `elapsed` of audio, or
/// `None` when that lies beyond what a group index can hold.
pub fn split_boundary(start: &DiscAddress, elapsed: Duration) -> Option<u32> {
    let frames = (elapsed.as_secs_f64() * SAMPLE_RATE as f64 / SAMPLES_PER_GROUP as f64).round();
    let groups = (frames as u64).checked_mul(u64::from(GROUPS_PER_FRAME))?;
    let boundary = u64::from(start.to_group_index()).checked_add(groups)?;
    u32::try_from(boundary).ok()
}

/// Whether every cut the segments ask for lands inside `fragment`, leaving the last
/// segment at least one group. [`TocEditor::split_track`] does not check this itself.
pub fn segments_fit(fragment: &TrackFragment, segments: &[Segment]) -> bool {
    segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .filter_map(|s| s.duration)
        .try_fold(Duration::ZERO, Duration::checked_add)
        .and_then(|cut_at| split_boundary(&fragment.start, cut_at))
        .is_some_and(|boundary| boundary <= fragment.end.to_group_index())
}

impl<C: TocCodec, E: TitleEncoder> TocEditor<C, E> {
    /// Cuts `starting_track` into one track per segment and titles them.
    ///
    /// Boundaries come from the running sum of segment durations measured from the start
    /// of the source track; they are not clamped to its end. Each new track takes the
    /// lowest unused track number and the current P-EMPTY fragment slot. Returns the
    /// resulting track numbers in playback order.
    ///
    /// Segment durations and the start track are checked before anything is written.
    /// Running out of title cells or track slots afterwards, or a boundary past the last
    /// addressable group, leaves `toc` half edited.
    pub fn split_track(
        &self,
        toc: &mut Toc,
        starting_track: u8,
        segments: &[Segment],
    ) -> TocResult<Vec<u8>> {
        validate_segments(segments)?;

        let TrackFragment {
            start, mode, end, ..
        } = *toc
            .track_fragment(starting_track)
            .ok_or(TocError::TrackNotAllocated(starting_track))?;

        let mut elapsed = Duration::ZERO;
        let mut current_track = starting_track;
        let mut produced = vec![starting_track];

        for (index, segment) in segments.iter().enumerate() {
            if let Some(title) = segment.title.as_deref().filter(|t| !t.is_empty()) {
                self.set_title(toc, current_track, title)?;
            }

            if index + 1 == segments.len() {
                break;
            }

            let duration = segment
                .duration
                .ok_or(TocError::MissingDuration { index })?;
            elapsed = elapsed
                .checked_add(duration)
                .ok_or(TocError::BoundaryOutOfRange { index })?;

            let boundary = split_boundary(&start, elapsed)
                .ok_or(TocError::BoundaryOutOfRange { index })?;
            let cut_end = DiscAddress::from_group_index(boundary.saturating_sub(1))
                .ok_or(TocError::BoundaryOutOfRange { index })?;
            let cut_start = DiscAddress::from_group_index(boundary)
                .ok_or(TocError::BoundaryOutOfRange { index })?;

            toc.track_fragment_mut(current_track)
                .ok_or(TocError::TrackNotAllocated(current_track))?
                .end = cut_end;

            let next_track = free_track_number(toc).ok_or(TocError::OutOfTrackSlots)?;
            let slot = toc.tracks.next_free_track_slot;
            if slot == 0 {
                return Err(TocError::OutOfTrackSlots);
            }

            toc.tracks.track_map[usize::from(next_track)] = slot;
            toc.tracks.track_fragment_list[usize::from(slot)] = TrackFragment {
                start: cut_start,
                mode,
                end,
                link: 0,
            };
            toc.tracks.n_tracks = toc
                .tracks
                .n_tracks
                .checked_add(1)
                .ok_or(TocError::OutOfTrackSlots)?;
            toc.tracks.next_free_track_slot = self.next_free_fragment_slot(toc).unwrap_or(0);

            debug!(
                "Split track {current_track} at group {boundary}, track {next_track} now in slot {slot}"
            );

            current_track = next_track;
            produced.push(next_track);
        }

        info!(
            "Split track {starting_track} into {} tracks",
            produced.len()
        );

        Ok(produced)
    }
}
