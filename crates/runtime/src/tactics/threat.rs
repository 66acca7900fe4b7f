//! One-tick threat prediction.
//!
//! [`ThreatModel`] answers a single question: which enemies could strike a
//! given location or object on the next tick? Every enemy is projected one
//! move toward a destination and tested against its attack range plus the
//! subject's footprint. The lookahead is one ply; path safety,
//! build safety and portal defence all reuse this primitive.

use game_core::{EntityId, GameObject, Location, Side};

/// What is being threatened.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    /// A bare map point, e.g. a candidate step.
    Location(Location),
    /// A live object; its footprint widens the strike radius and target-locked
    /// enemies only count when locked onto it.
    Object(&'a GameObject),
}

impl Subject<'_> {
    pub fn location(&self) -> Location {
        match self {
            Subject::Location(location) => *location,
            Subject::Object(object) => object.location,
        }
    }

    pub fn footprint(&self) -> i32 {
        match self {
            Subject::Location(_) => 0,
            Subject::Object(object) => object.size(),
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        match self {
            Subject::Location(_) => None,
            Subject::Object(object) => Some(object.id),
        }
    }
}

impl From<Location> for Subject<'_> {
    fn from(location: Location) -> Self {
        Subject::Location(location)
    }
}

impl<'a> From<&'a GameObject> for Subject<'a> {
    fn from(object: &'a GameObject) -> Self {
        Subject::Object(object)
    }
}

/// The mobile enemies able to threaten one side's objects.
#[derive(Clone, Debug, Default)]
pub struct ThreatModel<'w> {
    threats: Vec<&'w GameObject>,
}

impl<'w> ThreatModel<'w> {
    /// Collects every object hostile to `defender` whose kind threatens units.
    ///
    /// Siege and area creatures are left out; portal defence handles them
    /// separately.
    pub fn new(objects: &'w [GameObject], defender: Side) -> Self {
        let threats = objects
            .iter()
            .filter(|object| object.side != defender)
            .filter(|object| object.kind.profile().threatens_units)
            .collect();
        Self { threats }
    }

    pub fn threats(&self) -> &[&'w GameObject] {
        &self.threats
    }

    /// Enemies that could strike `subject` next tick.
    ///
    /// Each enemy moves up to its max speed toward `destination` (the
    /// subject's own location when `None`). Enemies that decay to death this
    /// tick, target-locked enemies busy with another object, and anything in
    /// `excluded` are left out.
    pub fn possible_attackers<'s>(
        &self,
        subject: impl Into<Subject<'s>>,
        destination: Option<Location>,
        excluded: &[EntityId],
    ) -> Vec<&'w GameObject> {
        let subject = subject.into();
        let location = subject.location();
        let destination = destination.unwrap_or(location);
        let footprint = subject.footprint();

        self.threats
            .iter()
            .copied()
            .filter(|enemy| !excluded.contains(&enemy.id))
            .filter(|enemy| !enemy.dies_this_tick())
            .filter(|enemy| match subject.id() {
                Some(id) if enemy.kind.profile().locks_target => enemy.target == Some(id),
                _ => true,
            })
            .filter(|enemy| {
                let next = enemy.location.towards(destination, enemy.max_speed());
                next.in_range(location, enemy.attack_range() + footprint)
            })
            .collect()
    }

    /// Shorthand for "nobody can strike `subject` next tick".
    pub fn is_clear<'s>(&self, subject: impl Into<Subject<'s>>, excluded: &[EntityId]) -> bool {
        self.possible_attackers(subject, None, excluded).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use game_core::{Capabilities, ObjectKind};

    use super::*;

    fn object(id: u32, kind: ObjectKind, side: Side, at: (i32, i32), stats: Capabilities) -> GameObject {
        GameObject::new(EntityId(id), kind, side, Location::new(at.0, at.1), stats)
    }

    fn mobile(range: i32, speed: i32, suffocation: i32) -> Capabilities {
        Capabilities {
            max_health: 10,
            attack_range: range,
            attack_multiplier: 1,
            max_speed: speed,
            suffocation_per_turn: suffocation,
            size: 0,
        }
    }

    #[test]
    fn enemy_reaching_range_next_tick_is_counted() {
        let objects = vec![
            object(1, ObjectKind::Unit, Side::Enemy, (0, 60), mobile(20, 50, 0)),
            object(2, ObjectKind::Unit, Side::Enemy, (0, 200), mobile(20, 50, 0)),
        ];
        let model = ThreatModel::new(&objects, Side::Mine);

        let attackers = model.possible_attackers(Location::ORIGIN, None, &[]);
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].id, EntityId(1));
        assert!(model.possible_attackers(Location::ORIGIN, None, &[EntityId(1)]).is_empty());
    }

    #[test]
    fn footprint_widens_reach() {
        let portal_stats = Capabilities { max_health: 20, size: 200, ..Capabilities::default() };
        let objects = vec![
            object(1, ObjectKind::Unit, Side::Enemy, (0, 250), mobile(20, 50, 0)),
            object(9, ObjectKind::PORTAL, Side::Mine, (0, 0), portal_stats),
        ];
        let model = ThreatModel::new(&objects, Side::Mine);

        assert!(model.is_clear(Location::ORIGIN, &[]));
        assert!(!model.is_clear(&objects[1], &[]));
    }

    #[test]
    fn locked_trolls_only_threaten_their_target() {
        let elf_stats = mobile(20, 50, 0);
        let mut objects = vec![
            object(1, ObjectKind::Unit, Side::Mine, (0, 0), elf_stats),
            object(2, ObjectKind::Unit, Side::Mine, (0, 10), elf_stats),
            object(3, ObjectKind::ICE_TROLL, Side::Enemy, (0, 40), mobile(20, 50, 1)),
        ];
        objects[2].target = Some(EntityId(2));
        let model = ThreatModel::new(&objects, Side::Mine);

        assert!(model.is_clear(&objects[0], &[]));
        assert!(!model.is_clear(&objects[1], &[]));
        // bare locations see every troll
        assert!(!model.is_clear(Location::ORIGIN, &[]));
    }

    #[test]
    fn decaying_enemies_are_ignored() {
        let objects = vec![
            object(1, ObjectKind::ICE_TROLL, Side::Enemy, (0, 10), mobile(20, 50, 2)).with_health(2),
        ];
        let model = ThreatModel::new(&objects, Side::Mine);
        assert!(model.is_clear(Location::ORIGIN, &[]));
    }

    #[test]
    fn siege_creatures_are_not_threats() {
        let objects = vec![
            object(1, ObjectKind::LAVA_GIANT, Side::Enemy, (0, 10), mobile(200, 50, 1)),
            object(2, ObjectKind::Unit, Side::Mine, (0, 20), mobile(200, 50, 0)),
        ];
        let model = ThreatModel::new(&objects, Side::Mine);
        assert!(model.threats().is_empty());
    }
}
