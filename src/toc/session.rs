use crate::toc::codec::TocCodec;
use crate::toc::error::TocResult;
use crate::toc::models::Toc;
use log::{debug, info, warn};

/// Decode, edit, re-encode cycle over one set of UTOC sectors.
///
/// Every edit runs against a private copy of the committed [`Toc`] and is only swapped in
/// when it succeeds, so a failed split or title allocation never leaves a half edited
/// table behind.
#[derive(Debug)]
pub struct EditSession<C: TocCodec> {
    codec: C,
    original: Vec<Vec<u8>>,
    toc: Toc,
}

impl<C: TocCodec> EditSession<C> {
    pub fn open(codec: C, sectors: Vec<Vec<u8>>) -> TocResult<Self> {
        let toc = codec.decode(&sectors)?;
        debug!(
            "Opened UTOC with {} tracks from {} sectors",
            toc.tracks.n_tracks,
            sectors.len()
        );

        Ok(Self {
            codec,
            original: sectors,
            toc,
        })
    }

    pub fn toc(&self) -> &Toc {
        &self.toc
    }

    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Toc) -> TocResult<T>) -> TocResult<T> {
        let mut draft = self.toc.clone();

        match f(&mut draft) {
            Ok(value) => {
                self.toc = draft;
                Ok(value)
            }
            Err(err) => {
                warn!("Discarding failed UTOC edit: {err}");
                Err(err)
            }
        }
    }

    /// Re-encodes the table and returns the sectors whose bytes changed, by index.
    pub fn finish(self) -> TocResult<Vec<(usize, Vec<u8>)>> {
        let encoded = self.codec.encode(&self.toc)?;

        let changed: Vec<(usize, Vec<u8>)> = encoded
            .into_iter()
            .enumerate()
            .filter(|(index, sector)| self.original.get(*index) != Some(sector))
            .collect();

        info!("{} UTOC sector(s) changed", changed.len());
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::HalfWidthEncoder;
    use crate::toc::TocEditor;
    use crate::toc::address::DiscAddress;
    use crate::toc::codec::UtocCodec;
    use crate::toc::error::TocError;
    use crate::toc::models::TrackFragment;
    use crate::toc::split::Segment;
    use crate::toc::title::read_title;
    use std::time::Duration;

    fn sectors() -> Vec<Vec<u8>> {
        let mut toc = Toc::blank();
        toc.tracks.n_tracks = 1;
        toc.tracks.track_map[1] = 1;
        toc.tracks.track_fragment_list[1] = TrackFragment {
            start: DiscAddress::from_group_index(1000).unwrap(),
            mode: 0x06,
            end: DiscAddress::from_group_index(90_000).unwrap(),
            link: 0,
        };
        toc.tracks.next_free_track_slot = 2;
        UtocCodec.encode(&toc).unwrap()
    }

    #[test]
    fn test_untouched_session_changes_nothing() {
        let session = EditSession::open(UtocCodec, sectors()).unwrap();
        assert!(session.finish().unwrap().is_empty());
    }

    #[test]
    fn test_successful_edit_is_committed() {
        let editor = TocEditor::new(UtocCodec, HalfWidthEncoder);
        let mut session = EditSession::open(UtocCodec, sectors()).unwrap();

        let segments = [
            Segment::new(Some("One"), Some(Duration::from_secs(30))),
            Segment::new(Some("Two"), None),
        ];
        let tracks = session
            .edit(|toc| editor.split_track(toc, 1, &segments))
            .unwrap();

        assert_eq!(tracks, vec![1, 2]);
        assert_eq!(session.toc().tracks.n_tracks, 2);

        let changed = session.finish().unwrap();
        let indices: Vec<usize> = changed.iter().map(|(index, _)| *index).collect();
        assert_eq!(indices, vec![0, 1]);

        let reopened = UtocCodec
            .decode(&changed.into_iter().map(|(_, s)| s).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(read_title(&reopened, reopened.titles.title_map[2]), b"Two");
    }

    #[test]
    fn test_title_only_edit_touches_title_sector() {
        let editor = TocEditor::new(UtocCodec, HalfWidthEncoder);
        let mut session = EditSession::open(UtocCodec, sectors()).unwrap();

        session
            .edit(|toc| editor.set_disc_title(toc, "Live"))
            .unwrap();

        let changed = session.finish().unwrap();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].0, 1);
    }

    #[test]
    fn test_failed_edit_is_discarded() {
        let editor = TocEditor::new(UtocCodec, HalfWidthEncoder);
        let mut session = EditSession::open(UtocCodec, sectors()).unwrap();
        let before = session.toc().clone();

        let err = session
            .edit(|toc| {
                for track in 2..=255u8 {
                    toc.titles.title_map[usize::from(track)] = track;
                }
                editor.set_title(toc, 1, "Far too long for one cell")
            })
            .unwrap_err();

        assert!(matches!(err, TocError::OutOfTitleCells));
        assert_eq!(session.toc(), &before);
        assert!(session.finish().unwrap().is_empty());
    }
}
