use clap::Parser;
use std::path::PathBuf;

/// Splits one recorded track into several, following a segment manifest.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Splits one recorded track into several, following a segment manifest\n\nThe manifest is a TOML file with one [[segment]] table per output track, each with an optional title and a duration in seconds. Only the last segment may omit its duration, it runs to the end of the source track."
)]
pub struct SplitCommand {
    /// UTOC image, raw 2352-byte sectors starting with sector 0
    #[arg(value_name = "UTOC")]
    pub utoc: PathBuf,

    /// Segment manifest (TOML)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Track to split
    #[arg(long, short = 't', value_name = "TRACK", default_value_t = 1)]
    pub track: u8,

    /// Output UTOC image, defaults to rewriting the input
    #[arg(long, short = 'o', value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', default_value_t = false)]
    pub force: bool,
}

/// Sets the title of a track, or of the disc.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct TitleCommand {
    /// UTOC image, raw 2352-byte sectors starting with sector 0
    #[arg(value_name = "UTOC")]
    pub utoc: PathBuf,

    /// New title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Track to rename, 0 for the disc title
    #[arg(long, short = 't', value_name = "TRACK", default_value_t = 0)]
    pub track: u8,

    /// Output UTOC image, defaults to rewriting the input
    #[arg(long, short = 'o', value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', default_value_t = false)]
    pub force: bool,
}

/// Lists the tracks of a UTOC image.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct ShowCommand {
    /// UTOC image, raw 2352-byte sectors starting with sector 0
    #[arg(value_name = "UTOC")]
    pub utoc: PathBuf,
}
