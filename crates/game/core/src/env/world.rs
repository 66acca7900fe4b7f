//! In-memory world snapshot.
//!
//! [`WorldState`] is the plain-data implementation of [`WorldSnapshot`] used by
//! scenario files, the replay client and tests. Placement rules are the
//! simulation's basic ones: a structure's footprint must lie inside the map
//! and must not overlap any existing structure.

use super::snapshot::WorldSnapshot;
use crate::rules::GameRules;
use crate::state::{EntityId, GameObject, Location, MapBounds, ObjectKind, Side, StructureKind};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn: u32,
    pub bounds: MapBounds,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_per_turn: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: GameRules,
    #[cfg_attr(feature = "serde", serde(default))]
    pub objects: Vec<GameObject>,
}

impl WorldState {
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            turn: 0,
            bounds,
            mana: 0,
            mana_per_turn: 0,
            rules: GameRules::default(),
            objects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: GameRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn with_mana(mut self, mana: i32, mana_per_turn: i32) -> Self {
        self.mana = mana;
        self.mana_per_turn = mana_per_turn;
        self
    }

    #[must_use]
    pub fn with_turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    /// Adds an object with default stats for its kind and returns its id.
    pub fn spawn(&mut self, kind: ObjectKind, side: Side, location: Location) -> EntityId {
        let id = self.next_id();
        let stats = self.rules.capabilities(kind);
        self.objects.push(GameObject::new(id, kind, side, location, stats));
        id
    }

    /// Adds a fully described object as-is.
    pub fn insert(&mut self, object: GameObject) {
        self.objects.push(object);
    }

    pub fn object_mut(&mut self, id: EntityId) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    /// Removes an object, returning it when present.
    pub fn remove(&mut self, id: EntityId) -> Option<GameObject> {
        let index = self.objects.iter().position(|object| object.id == id)?;
        Some(self.objects.remove(index))
    }

    fn next_id(&self) -> EntityId {
        self.objects
            .iter()
            .map(|object| EntityId(object.id.0 + 1))
            .max()
            .unwrap_or_default()
    }
}

impl WorldSnapshot for WorldState {
    fn turn(&self) -> u32 {
        self.turn
    }

    fn bounds(&self) -> MapBounds {
        self.bounds
    }

    fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    fn mana(&self) -> i32 {
        self.mana
    }

    fn mana_per_turn(&self) -> i32 {
        self.mana_per_turn
    }

    fn rules(&self) -> &GameRules {
        &self.rules
    }

    fn can_build_at(&self, location: Location, structure: StructureKind) -> bool {
        if structure == StructureKind::Castle {
            return false;
        }

        let size = self.rules.capabilities(ObjectKind::Structure(structure)).size;
        let footprint_inside = location.row - size >= 0
            && location.col - size >= 0
            && location.row + size < self.bounds.rows
            && location.col + size < self.bounds.cols;

        footprint_inside
            && self
                .objects
                .iter()
                .filter(|object| object.is_structure())
                .all(|object| object.location.distance(location) > size + object.size())
    }
}
