//! Shared data types for the skirmish tactical engine.
//!
//! `game-core` defines the vocabulary every other crate speaks: locations and
//! map bounds, the closed set of object kinds with their capability table,
//! the match constants ([`GameRules`]) and strategy tuning
//! ([`TacticsConfig`]), the read-only [`WorldSnapshot`] interface and the
//! [`CommandSink`] act interface. It contains no decision logic.
pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod rules;
pub mod state;

pub use action::{Command, CommandBuffer, CommandSink};
pub use config::{EngagementThresholds, TacticsConfig};
pub use env::{WorldSnapshot, WorldState};
pub use error::{ErrorSeverity, GameError, SnapshotError};
pub use rules::{CapabilityTable, CostTable, Creatable, Durations, GameRules, SpellKind};
pub use state::{
    Capabilities, CreatureKind, EntityId, GameObject, KindProfile, Location, MapBounds,
    ObjectKind, Side, StatusEffects, StructureKind, TargetMask,
};
