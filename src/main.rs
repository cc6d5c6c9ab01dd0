use crate::commands::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mdsplit::image::{list_image_tracks, set_image_title, split_image_track};

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Split(cmd) => {
            let tracks = split_image_track(
                &cmd.utoc,
                &cmd.manifest,
                cmd.track,
                cmd.output.as_deref(),
                cmd.force,
            )
            .await
            .with_context(|| format!("failed to split track {} of {:?}", cmd.track, cmd.utoc))?;

            info!("Created tracks {tracks:?}");
            info!("Reset the player (remove its batteries) so it reloads the edited UTOC");
        }
        Commands::Title(cmd) => {
            set_image_title(
                &cmd.utoc,
                cmd.track,
                &cmd.title,
                cmd.output.as_deref(),
                cmd.force,
            )
            .await
            .with_context(|| format!("failed to set the title of {:?}", cmd.utoc))?;
        }
        Commands::Show(cmd) => {
            let listing = list_image_tracks(&cmd.utoc)
                .await
                .with_context(|| format!("failed to read {:?}", cmd.utoc))?;

            println!("Disc: {}", listing.title);
            for track in listing.tracks {
                println!(
                    "{:3}  {} - {}  mode {:02x}  {}",
                    track.number,
                    track.fragment.start,
                    track.fragment.end,
                    track.fragment.mode,
                    track.title
                );
            }
        }
    }

    Ok(())
}
