//! Snapshot data types.
//!
//! Plain values describing what the simulation reports each turn: positions,
//! ownership, object kinds and their stats. Nothing here mutates a world; the
//! tactical layer only reads these types.
mod common;
mod object;

pub use common::{EntityId, Location, MapBounds, Side};
pub use object::{
    Capabilities, CreatureKind, GameObject, KindProfile, ObjectKind, StatusEffects,
    StructureKind, TargetMask,
};
