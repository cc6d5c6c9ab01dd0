use crate::md::{SECTOR_SIZE, UTOC_SECTOR_COUNT};
use crate::toc::error::{TocError, TocResult};
use crate::toc::models::{TitleSector, Toc, TrackFragment, TrackSector};
use binrw::{BinRead, BinWrite};
use std::io::Cursor;

/// Converts between raw UTOC sectors and [`Toc`].
pub trait TocCodec {
    fn decode(&self, sectors: &[Vec<u8>]) -> TocResult<Toc>;

    fn encode(&self, toc: &Toc) -> TocResult<Vec<Vec<u8>>>;

    /// Whether a fragment slot is in use. Free-slot scans rely on this.
    fn is_valid_fragment(&self, fragment: &TrackFragment) -> bool;
}

/// Codec for the two leading 2352-byte UTOC sectors (tracks, then titles).
#[derive(Debug, Clone, Copy, Default)]
pub struct UtocCodec;

impl TocCodec for UtocCodec {
    fn decode(&self, sectors: &[Vec<u8>]) -> TocResult<Toc> {
        if sectors.len() < UTOC_SECTOR_COUNT {
            return Err(TocError::MissingSector {
                expected: UTOC_SECTOR_COUNT,
                found: sectors.len(),
            });
        }

        for (index, sector) in sectors.iter().take(UTOC_SECTOR_COUNT).enumerate() {
            if sector.len() != SECTOR_SIZE {
                return Err(TocError::InvalidSectorSize {
                    index,
                    size: sector.len(),
                    expected: SECTOR_SIZE,
                });
            }
        }

        let tracks = TrackSector::read(&mut Cursor::new(&sectors[0]))?;
        let titles = TitleSector::read(&mut Cursor::new(&sectors[1]))?;

        Ok(Toc { tracks, titles })
    }

    fn encode(&self, toc: &Toc) -> TocResult<Vec<Vec<u8>>> {
        let mut tracks = Cursor::new(Vec::with_capacity(SECTOR_SIZE));
        toc.tracks.write(&mut tracks)?;

        let mut titles = Cursor::new(Vec::with_capacity(SECTOR_SIZE));
        toc.titles.write(&mut titles)?;

        Ok(vec![tracks.into_inner(), titles.into_inner()])
    }

    /// `link` is ignored: free slots stay chained to each other through it.
    fn is_valid_fragment(&self, fragment: &TrackFragment) -> bool {
        !fragment.start.is_zero() || !fragment.end.is_zero() || fragment.mode != 0
    }
}
