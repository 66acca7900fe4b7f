//! Per-turn tactical decision engine.
//!
//! This crate turns a read-only [`game_core::WorldSnapshot`] into at most one
//! command per unit and portal. Consumers embed [`TurnDriver`] in their host
//! loop, or call [`TacticalBot::play_turn`] directly with their own sink.
//!
//! Modules are organized by responsibility:
//! - [`tactics`] holds the reasoning components, leaves first
//! - [`context`] is the per-turn blackboard shared by every decision
//! - [`memory`] keeps the little state that outlives a turn
//! - [`bot`] sequences one turn
//! - [`driver`] is the dispatch boundary that commits or drops a turn
pub mod bot;
pub mod context;
pub mod driver;
pub mod error;
pub mod memory;
pub mod tactics;

pub use bot::{TacticalBot, TurnReport};
pub use context::{Role, Roster, TurnContext, Zone};
pub use driver::{DriverStats, TurnDriver, TurnOutcome};
pub use error::{Result, TacticsError};
pub use memory::TacticsMemory;
pub use tactics::{
    Assignment, Mission, MissionKind, ProductionSummary, ResourceLedger, Ring, SitePlan,
    ThreatModel,
};
