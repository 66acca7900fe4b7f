use std::collections::HashSet;

use crate::error::SnapshotError;
use crate::rules::GameRules;
use crate::state::{EntityId, GameObject, Location, MapBounds, ObjectKind, Side, StructureKind};

/// Read-only view of the match for the current turn.
///
/// The external simulation refreshes the snapshot once per turn. Everything
/// the tactical layer knows about the world flows through this trait; it never
/// mutates the world directly and only expresses intent via
/// [`crate::CommandSink`].
pub trait WorldSnapshot {
    /// Current turn number, starting at 0.
    fn turn(&self) -> u32;

    fn bounds(&self) -> MapBounds;

    /// All live objects of both sides.
    fn objects(&self) -> &[GameObject];

    /// Mana held by the controlling side.
    fn mana(&self) -> i32;

    /// Mana gained by the controlling side each turn.
    fn mana_per_turn(&self) -> i32;

    fn rules(&self) -> &GameRules;

    /// Terrain and overlap rules for placing a structure, owned by the simulation.
    fn can_build_at(&self, location: Location, structure: StructureKind) -> bool;

    fn contains(&self, location: Location) -> bool {
        self.bounds().contains(location)
    }

    fn object(&self, id: EntityId) -> Option<&GameObject> {
        self.objects().iter().find(|object| object.id == id)
    }

    fn castle(&self, side: Side) -> Result<&GameObject, SnapshotError> {
        self.objects()
            .iter()
            .find(|object| object.side == side && object.kind == ObjectKind::CASTLE)
            .ok_or(SnapshotError::MissingCastle { side })
    }

    /// Checks the structural invariants the tactical layer relies on.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the bounds are empty, an id is reused,
    /// or either castle is missing.
    fn validate(&self) -> Result<(), SnapshotError> {
        let bounds = self.bounds();
        if bounds.rows <= 0 || bounds.cols <= 0 {
            return Err(SnapshotError::InvalidBounds {
                rows: bounds.rows,
                cols: bounds.cols,
            });
        }

        let mut seen = HashSet::with_capacity(self.objects().len());
        for object in self.objects() {
            if !seen.insert(object.id) {
                return Err(SnapshotError::DuplicateEntity(object.id));
            }
        }

        self.castle(Side::Mine)?;
        self.castle(Side::Enemy)?;
        Ok(())
    }
}
