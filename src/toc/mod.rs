use crate::text::{HalfWidthEncoder, TitleEncoder};
use crate::toc::codec::{TocCodec, UtocCodec};
use crate::toc::error::TocResult;
use crate::toc::models::Toc;
use log::debug;

pub mod address;
pub mod codec;
pub mod error;
pub mod models;
pub mod session;
pub mod split;
pub mod title;

/// Mutates a [`Toc`] in place. Holds the collaborators the edits depend on: the codec's
/// notion of an allocated fragment and the title character set.
///
/// None of the operations roll back. When one fails part way through, discard the
/// [`Toc`] (or run the edit through a [`session::EditSession`], which only keeps
/// successful edits).
#[derive(Debug, Clone, Default)]
pub struct TocEditor<C = UtocCodec, E = HalfWidthEncoder> {
    codec: C,
    encoder: E,
}

impl<C: TocCodec, E: TitleEncoder> TocEditor<C, E> {
    pub fn new(codec: C, encoder: E) -> Self {
        Self { codec, encoder }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Encodes `title` and writes it into free title cells, returning the first cell.
    pub fn allocate_title(&self, toc: &mut Toc, title: &str) -> TocResult<u8> {
        let encoded = self.encoder.encode_title(title);
        title::allocate_title(toc, &encoded)
    }

    /// Replaces the title of `track`. The old chain is not cleared, it just stops being
    /// referenced and gets picked up by the next free-slot scan.
    pub fn set_title(&self, toc: &mut Toc, track: u8, title: &str) -> TocResult<u8> {
        toc.titles.title_map[usize::from(track)] = 0;
        let head = self.allocate_title(toc, title)?;
        toc.titles.title_map[usize::from(track)] = head;
        debug!("Track {track} title now starts at cell {head}");
        Ok(head)
    }

    pub fn set_disc_title(&self, toc: &mut Toc, title: &str) -> TocResult<u8> {
        self.set_title(toc, 0, title)
    }

    /// First fragment slot after 0 that the codec does not consider allocated.
    pub fn next_free_fragment_slot(&self, toc: &Toc) -> Option<u8> {
        (1..=u8::MAX).find(|&slot| {
            !self
                .codec
                .is_valid_fragment(&toc.tracks.track_fragment_list[usize::from(slot)])
        })
    }
}

/// Lowest track number without a fragment.
pub fn free_track_number(toc: &Toc) -> Option<u8> {
    (1..=u8::MAX).find(|&track| toc.tracks.track_map[usize::from(track)] == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::address::DiscAddress;
    use crate::toc::models::TrackFragment;
    use crate::toc::title::read_title;

    #[test]
    fn test_set_title_replaces_chain() {
        let editor = TocEditor::<UtocCodec, HalfWidthEncoder>::default();
        let mut toc = Toc::blank();

        editor.set_title(&mut toc, 1, "First version").unwrap();
        let head = editor.set_title(&mut toc, 1, "Second").unwrap();

        assert_eq!(head, 1);
        assert_eq!(toc.titles.title_map[1], 1);
        assert_eq!(read_title(&toc, head), b"Second");
    }

    #[test]
    fn test_set_disc_title_uses_entry_zero() {
        let editor = TocEditor::<UtocCodec, HalfWidthEncoder>::default();
        let mut toc = Toc::blank();

        editor.set_disc_title(&mut toc, "Ｍｉｘｔａｐｅ").unwrap();
        editor.set_title(&mut toc, 1, "Track").unwrap();

        assert_eq!(read_title(&toc, toc.titles.title_map[0]), b"Mixtape");
        assert_eq!(read_title(&toc, toc.titles.title_map[1]), b"Track");
    }

    #[test]
    fn test_next_free_fragment_slot() {
        let editor = TocEditor::<UtocCodec, HalfWidthEncoder>::default();
        let mut toc = Toc::blank();
        assert_eq!(editor.next_free_fragment_slot(&toc), Some(1));

        toc.tracks.track_fragment_list[1].mode = 6;
        // free slots chained on the P-EMPTY list are still free
        toc.tracks.track_fragment_list[2].link = 3;
        toc.tracks.track_fragment_list[3].link = 4;
        assert_eq!(editor.next_free_fragment_slot(&toc), Some(2));

        toc.tracks.track_fragment_list[2].end = DiscAddress::new(0, 0, 5);
        assert_eq!(editor.next_free_fragment_slot(&toc), Some(3));

        for fragment in toc.tracks.track_fragment_list.iter_mut().skip(1) {
            *fragment = TrackFragment {
                mode: 6,
                ..Default::default()
            };
        }
        assert_eq!(editor.next_free_fragment_slot(&toc), None);
    }

    #[test]
    fn test_free_track_number_skips_zero() {
        let mut toc = Toc::blank();
        assert_eq!(free_track_number(&toc), Some(1));

        toc.tracks.track_map[1] = 1;
        toc.tracks.track_map[2] = 2;
        assert_eq!(free_track_number(&toc), Some(3));
    }
}
