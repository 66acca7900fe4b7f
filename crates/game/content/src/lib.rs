//! Data files for the skirmish tactical engine.
//!
//! This crate turns files on disk into `game-core` values:
//! - Scenarios (RON): a named sequence of per-turn world snapshots
//! - Match rules (TOML): costs, durations and the capability table
//! - Tactics tuning (TOML): strategy thresholds for the engine
//!
//! Content only feeds the engine; nothing loaded here is written back.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, Scenario, ScenarioLoader};
