//! Per-turn dispatch boundary.
//!
//! [`TurnDriver`] is the host loop's entry point. It validates the snapshot,
//! lets the bot decide into a private buffer, and only hands the commands to
//! the real sink once the whole turn succeeded. A failed turn issues nothing.

use game_core::{
    CommandBuffer, CommandSink, ErrorSeverity, GameError, TacticsConfig, WorldSnapshot,
};

use crate::bot::{TacticalBot, TurnReport};
use crate::error::TacticsError;

/// How a turn ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Commands were flushed to the sink.
    Completed { report: TurnReport, issued: usize },
    /// The turn was dropped; no command reached the sink.
    Abandoned { turn: u32, error: TacticsError },
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed { .. })
    }

    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            TurnOutcome::Completed { report, .. } => Some(report),
            TurnOutcome::Abandoned { .. } => None,
        }
    }
}

/// Running totals across turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub completed: usize,
    pub abandoned: usize,
    pub commands: usize,
}

#[derive(Debug, Default)]
pub struct TurnDriver {
    bot: TacticalBot,
    buffer: CommandBuffer,
    stats: DriverStats,
}

impl TurnDriver {
    pub fn new(bot: TacticalBot) -> Self {
        Self {
            bot,
            buffer: CommandBuffer::new(),
            stats: DriverStats::default(),
        }
    }

    pub fn with_config(config: TacticsConfig) -> Self {
        Self::new(TacticalBot::new(config))
    }

    pub fn bot(&self) -> &TacticalBot {
        &self.bot
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// Plays one turn and forwards its commands to `sink` on success.
    pub fn play(&mut self, world: &dyn WorldSnapshot, sink: &mut dyn CommandSink) -> TurnOutcome {
        self.buffer.clear();
        let turn = world.turn();

        let result = world
            .validate()
            .map_err(TacticsError::from)
            .and_then(|()| self.bot.play_turn(world, &mut self.buffer));

        match result {
            Ok(report) => {
                let issued = self.buffer.flush_into(sink);
                self.stats.completed += 1;
                self.stats.commands += issued;
                tracing::debug!(turn, issued, "Turn committed");
                TurnOutcome::Completed { report, issued }
            }
            Err(error) => {
                self.buffer.clear();
                self.stats.abandoned += 1;
                let severity: ErrorSeverity = error.severity();
                tracing::error!(
                    turn,
                    code = error.error_code(),
                    severity = severity.as_str(),
                    "Turn abandoned: {}",
                    error
                );
                TurnOutcome::Abandoned { turn, error }
            }
        }
    }
}
