//! Replay a scenario through the turn driver.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{Scenario, ScenarioLoader};
use game_core::{Command, EntityId, TacticsConfig};
use runtime::{TurnDriver, TurnOutcome};
use serde::Serialize;

use super::OutputFormat;
use crate::config::ClientConfig;

/// Play every snapshot of a scenario and print the issued commands
#[derive(Parser)]
pub struct Replay {
    /// Scenario file (RON)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Tactics tuning TOML (overrides SKIRMISH_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Match rules TOML (overrides SKIRMISH_RULES and the scenario's rules)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Exit with an error if any turn is abandoned
    #[arg(long)]
    strict: bool,
}

/// One played turn, as printed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayTurn {
    pub turn: u32,
    pub commands: Vec<Command>,
    pub missions: Vec<MissionLine>,
    pub available_mana: Option<i32>,
    pub abandoned: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissionLine {
    pub unit: EntityId,
    pub mission: String,
}

impl Replay {
    pub fn execute(self, settings: ClientConfig) -> Result<()> {
        let settings = settings.with_overrides(self.config, self.rules);
        let tactics = settings.load_tactics()?;
        let rules = settings.load_rules()?;

        let scenario = ScenarioLoader::load_with_rules(&self.scenario, rules)
            .with_context(|| format!("Failed to load scenario: {}", self.scenario.display()))?;
        tracing::info!(scenario = %scenario.name, turns = scenario.len(), "Replaying");

        let turns = replay(&scenario, tactics);
        let abandoned = turns.iter().filter(|turn| turn.abandoned.is_some()).count();

        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self.format {
            OutputFormat::Text => write_text(&mut out, &scenario.name, &turns)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &turns)?;
                writeln!(out)?;
            }
        }

        if self.strict && abandoned > 0 {
            anyhow::bail!("{} of {} turn(s) abandoned", abandoned, turns.len());
        }
        Ok(())
    }
}

/// Drives one bot through all turns so chase memory carries over.
pub fn replay(scenario: &Scenario, tactics: TacticsConfig) -> Vec<ReplayTurn> {
    let mut driver = TurnDriver::with_config(tactics);

    let turns = scenario
        .turns
        .iter()
        .map(|world| {
            let mut issued: Vec<Command> = Vec::new();
            match driver.play(world, &mut issued) {
                TurnOutcome::Completed { report, .. } => ReplayTurn {
                    turn: report.turn,
                    commands: issued,
                    missions: report
                        .assignments
                        .iter()
                        .map(|assignment| MissionLine {
                            unit: assignment.unit,
                            mission: assignment.mission.kind().to_string(),
                        })
                        .collect(),
                    available_mana: Some(report.available_mana),
                    abandoned: None,
                },
                TurnOutcome::Abandoned { turn, error } => ReplayTurn {
                    turn,
                    commands: issued,
                    missions: Vec::new(),
                    available_mana: None,
                    abandoned: Some(error.to_string()),
                },
            }
        })
        .collect();

    let stats = driver.stats();
    tracing::info!(
        completed = stats.completed,
        abandoned = stats.abandoned,
        commands = stats.commands,
        "Replay finished"
    );
    turns
}

fn write_text(out: &mut impl Write, name: &str, turns: &[ReplayTurn]) -> io::Result<()> {
    writeln!(out, "scenario {}: {} turn(s)", name, turns.len())?;
    for turn in turns {
        if let Some(error) = &turn.abandoned {
            writeln!(out, "turn {}: abandoned ({})", turn.turn, error)?;
            continue;
        }

        write!(out, "turn {}: {} command(s)", turn.turn, turn.commands.len())?;
        if let Some(mana) = turn.available_mana {
            write!(out, ", {} mana free", mana)?;
        }
        writeln!(out)?;

        for mission in &turn.missions {
            writeln!(out, "  {} -> {}", mission.unit, mission.mission)?;
        }
        for command in &turn.commands {
            writeln!(out, "  {}", command)?;
        }
    }
    Ok(())
}
