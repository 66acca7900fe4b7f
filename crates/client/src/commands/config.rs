//! Print the effective configuration.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use game_content::ConfigLoader;
use game_core::{GameRules, TacticsConfig};

use super::OutputFormat;
use crate::config::ClientConfig;

/// Print the tactics tuning and match rules in effect
#[derive(Parser)]
pub struct ShowConfig {
    /// Tactics tuning TOML (overrides SKIRMISH_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Match rules TOML (overrides SKIRMISH_RULES)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ShowConfig {
    pub fn execute(self, settings: ClientConfig) -> Result<()> {
        let settings = settings.with_overrides(self.config, self.rules);
        let tactics = settings.load_tactics()?;
        let rules = settings.load_rules()?.unwrap_or_default();

        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_config(&mut out, self.format, &tactics, &rules)
    }
}

fn write_config(
    out: &mut impl Write,
    format: OutputFormat,
    tactics: &TacticsConfig,
    rules: &GameRules,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "# tactics")?;
            writeln!(out, "{}", ConfigLoader::tactics_to_toml(tactics)?)?;
            writeln!(out, "# rules")?;
            writeln!(out, "{}", ConfigLoader::rules_to_toml(rules)?)?;
        }
        OutputFormat::Json => {
            let value = serde_json::json!({ "tactics": tactics, "rules": rules });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
