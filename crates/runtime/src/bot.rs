//! The tactical bot: one full decision pass per snapshot.
//!
//! A turn runs in a fixed order: ledger reset, build-site refresh, mission
//! assignment (sequential, order matters), mission execution, portal
//! production, and finally the chase samples for next turn.

use game_core::{CommandSink, EntityId, GameError, TacticsConfig, WorldSnapshot};

use crate::context::TurnContext;
use crate::error::Result;
use crate::memory::TacticsMemory;
use crate::tactics::mission::{self, Assignment};
use crate::tactics::production::{self, ProductionSummary};

/// What happened during one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    pub assignments: Vec<Assignment>,
    /// Units whose mission could not be executed.
    pub skipped: Vec<EntityId>,
    pub production: ProductionSummary,
    /// Mana still spendable after every reservation.
    pub available_mana: i32,
}

#[derive(Clone, Debug, Default)]
pub struct TacticalBot {
    config: TacticsConfig,
    memory: TacticsMemory,
}

impl TacticalBot {
    pub fn new(config: TacticsConfig) -> Self {
        Self {
            config,
            memory: TacticsMemory::new(),
        }
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    pub fn memory(&self) -> &TacticsMemory {
        &self.memory
    }

    /// Decides and issues this turn's commands.
    ///
    /// A unit whose mission fails with a recoverable error is logged and
    /// skipped; the rest of the turn carries on.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TacticsError::MissingCastle`] when the snapshot lacks
    /// a castle, before anything is issued. Any non-recoverable execution
    /// error aborts the turn as well.
    pub fn play_turn(
        &mut self,
        world: &dyn WorldSnapshot,
        sink: &mut dyn CommandSink,
    ) -> Result<TurnReport> {
        let mut ctx = TurnContext::new(world, &self.config)?;
        ctx.refresh_sites();

        let assignments = mission::assign(&mut ctx);

        let mut skipped = Vec::new();
        for assignment in &assignments {
            let outcome = ctx
                .object(assignment.unit)
                .and_then(|unit| mission::execute(&mut ctx, &self.memory, unit, assignment.mission, sink));
            if let Err(err) = outcome {
                if !err.severity().is_recoverable() {
                    return Err(err);
                }
                tracing::warn!(
                    unit = %assignment.unit,
                    mission = %assignment.mission.kind(),
                    code = err.error_code(),
                    "Skipping unit: {}",
                    err
                );
                skipped.push(assignment.unit);
            }
        }

        let production = production::portal_turn(&mut ctx, sink);
        self.memory.record(&ctx);

        let report = TurnReport {
            turn: world.turn(),
            assignments,
            skipped,
            production,
            available_mana: ctx.ledger.available(),
        };

        tracing::info!(
            turn = report.turn,
            units = report.assignments.len(),
            skipped = report.skipped.len(),
            summoned = report.production.summoned,
            reserved = ctx.ledger.reserved(),
            "Turn played"
        );

        Ok(report)
    }
}
