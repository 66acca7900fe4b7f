//! Subcommands of the `skirmish` binary.

mod config;
mod replay;

pub use config::ShowConfig;
pub use replay::Replay;

/// Output format shared by every subcommand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
