use crate::md::{TABLE_ENTRIES, TITLE_CELL_LEN};
use crate::toc::address::DiscAddress;
use binrw::binrw;

const SYNC: [u8; 12] = [
    0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00,
];
const UTOC_CLUSTER: u16 = 3;
const UTOC_MODE: u8 = 2;

/// One contiguous extent of a track. Extents of a physically split track are chained
/// through `link`.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackFragment {
    #[br(map = |packed: [u8; 3]| DiscAddress::from_packed(packed))]
    #[bw(map = |addr: &DiscAddress| addr.to_packed())]
    pub start: DiscAddress,

    /// Track mode flags (copy protection, stereo/mono, emphasis...).
    pub mode: u8,

    #[br(map = |packed: [u8; 3]| DiscAddress::from_packed(packed))]
    #[bw(map = |addr: &DiscAddress| addr.to_packed())]
    pub end: DiscAddress,

    pub link: u8,
}

/// Seven characters of a title plus the index of the next cell in the chain.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TitleCell {
    pub text: [u8; TITLE_CELL_LEN],
    pub link: u8,
}

/// UTOC sector 0: track map and fragment table.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSector {
    pub sync: [u8; 12],
    pub address: [u8; 3],
    pub mode: u8,
    pub reserved0: [u8; 12],

    pub maker_code: u8,
    pub model_code: u8,
    pub first_track: u8,

    /// Number of the last track, which is also the track count.
    pub n_tracks: u8,

    pub reserved1: [u8; 7],
    pub used_sectors: u8,
    pub reserved2: [u8; 4],
    pub disc_id: u16,

    /// P-DFA, head of the defective area chain.
    pub defective_slot: u8,

    /// P-EMPTY, first fragment slot available for a new track.
    pub next_free_track_slot: u8,

    /// Track number to fragment slot. Entry 0 is P-FRA, the free area chain.
    pub track_map: [u8; TABLE_ENTRIES],

    pub track_fragment_list: [TrackFragment; TABLE_ENTRIES],
}

/// UTOC sector 1: title map and title cells.
#[binrw]
#[brw(big)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSector {
    pub sync: [u8; 12],
    pub address: [u8; 3],
    pub mode: u8,
    pub reserved: [u8; 31],

    /// Advisory hint, rewritten on every allocation.
    pub next_free_title_slot: u8,

    /// Track number to first title cell. Entry 0 holds the disc title.
    pub title_map: [u8; TABLE_ENTRIES],

    pub title_cell_list: [TitleCell; TABLE_ENTRIES],
}

impl TrackSector {
    pub fn blank() -> Self {
        Self {
            sync: SYNC,
            address: utoc_address(0),
            mode: UTOC_MODE,
            reserved0: [0; 12],
            maker_code: 0,
            model_code: 0,
            first_track: 1,
            n_tracks: 0,
            reserved1: [0; 7],
            used_sectors: 0,
            reserved2: [0; 4],
            disc_id: 0,
            defective_slot: 0,
            next_free_track_slot: 1,
            track_map: [0; TABLE_ENTRIES],
            track_fragment_list: [TrackFragment::default(); TABLE_ENTRIES],
        }
    }
}

impl TitleSector {
    pub fn blank() -> Self {
        Self {
            sync: SYNC,
            address: utoc_address(1),
            mode: UTOC_MODE,
            reserved: [0; 31],
            next_free_title_slot: 1,
            title_map: [0; TABLE_ENTRIES],
            title_cell_list: [TitleCell::default(); TABLE_ENTRIES],
        }
    }
}

fn utoc_address(sector: u8) -> [u8; 3] {
    let [hi, lo] = UTOC_CLUSTER.to_be_bytes();
    [hi, lo, sector]
}

/// In-memory table of contents, one edit session's worth of state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    pub tracks: TrackSector,
    pub titles: TitleSector,
}

impl Toc {
    /// Table of contents of a freshly erased disc.
    pub fn blank() -> Self {
        Self {
            tracks: TrackSector::blank(),
            titles: TitleSector::blank(),
        }
    }

    /// Fragment slot of a track, `None` for track 0 and unused track numbers.
    pub fn fragment_slot(&self, track: u8) -> Option<u8> {
        if track == 0 {
            return None;
        }

        match self.tracks.track_map[usize::from(track)] {
            0 => None,
            slot => Some(slot),
        }
    }

    pub fn track_fragment(&self, track: u8) -> Option<&TrackFragment> {
        self.fragment_slot(track)
            .map(|slot| &self.tracks.track_fragment_list[usize::from(slot)])
    }

    pub fn track_fragment_mut(&mut self, track: u8) -> Option<&mut TrackFragment> {
        self.fragment_slot(track)
            .map(|slot| &mut self.tracks.track_fragment_list[usize::from(slot)])
    }

    /// Allocated track numbers in ascending order.
    pub fn track_numbers(&self) -> Vec<u8> {
        (1..=u8::MAX)
            .filter(|&track| self.fragment_slot(track).is_some())
            .collect()
    }
}
