//! State that survives between turns.
//!
//! Everything else is rebuilt from the snapshot; the only thing remembered is
//! how far each friendly unit was from each enemy unit, which is what chase
//! detection compares against.

use std::collections::HashMap;

use game_core::{EntityId, GameObject};

use crate::context::TurnContext;

#[derive(Clone, Debug, Default)]
pub struct TacticsMemory {
    last_distances: HashMap<EntityId, HashMap<EntityId, i32>>,
}

impl TacticsMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the samples with this turn's unit-to-enemy distances.
    ///
    /// Units that died are dropped along with their samples.
    pub fn record(&mut self, ctx: &TurnContext<'_>) {
        self.last_distances = ctx
            .mine()
            .units
            .iter()
            .map(|unit| {
                let samples = ctx
                    .enemy()
                    .units
                    .iter()
                    .map(|enemy| (enemy.id, unit.distance(enemy.location)))
                    .collect();
                (unit.id, samples)
            })
            .collect();
    }

    pub fn last_distance(&self, unit: EntityId, enemy: EntityId) -> Option<i32> {
        self.last_distances.get(&unit)?.get(&enemy).copied()
    }

    /// A unit is in a chase when the gap to `enemy` barely moved since last
    /// turn (less than half the unit's speed). No sample means no chase.
    pub fn is_in_chase(&self, unit: &GameObject, enemy: &GameObject) -> bool {
        let Some(last) = self.last_distance(unit.id, enemy.id) else {
            return false;
        };
        let current = unit.distance(enemy.location);
        (current - last).abs() < unit.max_speed() / 2
    }

    pub fn clear(&mut self) {
        self.last_distances.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.last_distances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Location, MapBounds, ObjectKind, Side, TacticsConfig, WorldSnapshot, WorldState};

    use super::*;

    fn world(enemy_col: i32) -> WorldState {
        let mut world = WorldState::new(MapBounds::new(4000, 7000));
        world.spawn(ObjectKind::CASTLE, Side::Mine, Location::new(2000, 500));
        world.spawn(ObjectKind::CASTLE, Side::Enemy, Location::new(2000, 6500));
        world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 1000));
        world.spawn(ObjectKind::Unit, Side::Enemy, Location::new(2000, enemy_col));
        world
    }

    #[test]
    fn steady_gap_is_a_chase() {
        let config = TacticsConfig::default();
        let mut memory = TacticsMemory::new();

        let before = world(1500);
        memory.record(&TurnContext::new(&before, &config).unwrap());
        assert_eq!(memory.last_distance(EntityId(2), EntityId(3)), Some(500));

        // gap grew by 40, under half the default speed of 100
        let after = world(1540);
        let unit = after.object(EntityId(2)).unwrap();
        let enemy = after.object(EntityId(3)).unwrap();
        assert!(memory.is_in_chase(unit, enemy));

        let escaped = world(1600);
        let enemy = escaped.object(EntityId(3)).unwrap();
        assert!(!memory.is_in_chase(unit, enemy));
    }

    #[test]
    fn no_sample_no_chase() {
        let memory = TacticsMemory::new();
        let world = world(1500);
        let unit = world.object(EntityId(2)).unwrap();
        let enemy = world.object(EntityId(3)).unwrap();
        assert!(!memory.is_in_chase(unit, enemy));
    }
}
