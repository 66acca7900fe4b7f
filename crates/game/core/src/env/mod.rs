//! Read-only world access.
//!
//! [`WorldSnapshot`] is the narrow interface the tactical layer consumes;
//! [`WorldState`] is the in-memory implementation used by scenario replays
//! and tests.
mod snapshot;
mod world;

pub use snapshot::WorldSnapshot;
pub use world::WorldState;
