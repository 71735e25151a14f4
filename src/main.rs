//! party-cards - load content packs and report server status.
//!
//! Usage:
//!   party-cards                          - Load ./packs with ./settings.json
//!   party-cards --packs dir --json       - Print the status snapshot as JSON
//!   party-cards --ext pack               - Load `*.pack` files instead of `*.json`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use party_cards::games::lobby::LobbyEngine;
use party_cards::lifecycle::{AppContext, ContextCell, ContextOptions};
use party_cards::packs::{DEFAULT_EXTENSION, DEFAULT_PACKS_DIR};
use party_cards::DEFAULT_SETTINGS_PATH;

#[derive(Parser)]
#[command(name = "party-cards")]
#[command(about = "Load party card packs and report server status")]
#[command(version)]
struct Cli {
    /// Directory searched recursively for pack files
    #[arg(long, default_value = DEFAULT_PACKS_DIR)]
    packs: PathBuf,

    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Pack file extension
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    ext: String,

    /// Print the status snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let options = ContextOptions::default()
        .with_packs_dir(cli.packs)
        .with_settings_path(cli.settings)
        .with_extension(cli.ext);

    let cell: ContextCell<LobbyEngine> = ContextCell::new();
    let ctx = cell
        .get_or_init(|| AppContext::bootstrap(&options))
        .context("server startup failed")?;

    let snapshot = ctx.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", ctx.status().title());
        println!(
            "Players: {} [{}, {}]",
            snapshot.current_player_count, snapshot.min_players, snapshot.max_players
        );
        println!(
            "Cards: {} white, {} black",
            snapshot.white_card_count, snapshot.black_card_count
        );
        for pack in &snapshot.pack_info {
            println!("  {} - {}", pack.id, pack.name);
        }
        for failure in ctx.load_failures() {
            println!("  skipped {}: {}", failure.path.display(), failure.error);
        }
    }

    ctx.shutdown();
    Ok(())
}
