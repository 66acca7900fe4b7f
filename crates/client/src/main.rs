//! `skirmish`: replay recorded matches through the tactical engine.
//!
//! ```bash
//! skirmish replay data/scenarios/opening.ron
//! skirmish replay data/scenarios/portal_defense.ron --format json
//! skirmish config --config data/tactics.toml
//! ```
//!
//! Environment (also read from `.env`): `SKIRMISH_CONFIG`, `SKIRMISH_RULES`,
//! `SKIRMISH_LOG_DIR`, `RUST_LOG`.

mod commands;
mod config;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Replay, ShowConfig};
use config::ClientConfig;

/// Tactical engine replay client
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Replay skirmish scenarios through the tactical engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Log to stderr only
    #[arg(long, global = true)]
    no_log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a scenario turn by turn and print the commands
    Replay(Replay),

    /// Print the effective configuration
    Config(ShowConfig),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let settings = ClientConfig::from_env();

    let log_dir = (!cli.no_log_file).then(|| settings.log_dir());
    let _guard = logging::setup_logging(log_dir.as_deref())?;

    match cli.command {
        Command::Replay(cmd) => cmd.execute(settings),
        Command::Config(cmd) => cmd.execute(settings),
    }
}
