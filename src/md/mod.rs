// src/md/mod.rs
pub const SECTOR_SIZE: usize = 2352;
pub const UTOC_SECTOR_COUNT: usize = 2;

pub const SECTORS_PER_CLUSTER: u32 = 32;
pub const GROUPS_PER_SECTOR: u32 = 11;
pub const GROUPS_PER_CLUSTER: u32 = SECTORS_PER_CLUSTER * GROUPS_PER_SECTOR;
/// Cluster numbers are stored in 14 bits.
pub const MAX_CLUSTER: u16 = 0x3fff;

pub const SAMPLE_RATE: u32 = 44100;
pub const SAMPLES_PER_GROUP: u32 = 512;
/// Sound groups are laid out in stereo pairs on disc.
pub const GROUPS_PER_FRAME: u32 = 2;

pub const TABLE_ENTRIES: usize = 256;
pub const TITLE_CELL_LEN: usize = 7;
