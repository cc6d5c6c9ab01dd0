use crate::commands::utoc::{ShowCommand, SplitCommand, TitleCommand};
use clap::{Parser, Subcommand};

pub mod utoc;

/// CLI for splitting and titling MiniDisc tracks by editing the UTOC.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Split(SplitCommand),
    Title(TitleCommand),
    Show(ShowCommand),
}
