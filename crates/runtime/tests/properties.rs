//! Property-based tests for the tactical primitives.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use proptest::prelude::*;

use game_core::{
    Capabilities, EntityId, GameObject, Location, MapBounds, ObjectKind, Side, TacticsConfig,
    WorldSnapshot, WorldState,
};
use runtime::tactics::{ResourceLedger, Ring, ThreatModel, best_mission};
use runtime::tactics::mission::{self, Mission};
use runtime::{Role, TurnContext, Zone};

fn mobile(range: i32, speed: i32) -> Capabilities {
    Capabilities {
        max_health: 10,
        attack_range: range,
        attack_multiplier: 1,
        max_speed: speed,
        suffocation_per_turn: 0,
        size: 0,
    }
}

fn arena(mine: &[(i32, i32)], enemies: &[(i32, i32)]) -> WorldState {
    let mut world = WorldState::new(MapBounds::new(4000, 7000)).with_mana(150, 3);
    world.spawn(ObjectKind::CASTLE, Side::Mine, Location::new(2000, 500));
    world.spawn(ObjectKind::CASTLE, Side::Enemy, Location::new(2000, 6500));
    for &(row, col) in mine {
        world.spawn(ObjectKind::Unit, Side::Mine, Location::new(row, col));
    }
    for &(row, col) in enemies {
        world.spawn(ObjectKind::Unit, Side::Enemy, Location::new(row, col));
    }
    world
}

fn field_point() -> impl Strategy<Value = (i32, i32)> {
    (0..4000i32, 0..7000i32)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Ring sampling is deterministic, bounded and within one unit of the radius.
    #[test]
    fn prop_ring_points_stay_on_the_circle(
        row in -200..200i32,
        col in -200..200i32,
        radius in 0..300i32,
        rows in 1..400i32,
        cols in 1..400i32,
    ) {
        let center = Location::new(row, col);
        let bounds = MapBounds::new(rows, cols);
        let ring = Ring::new(center, radius);

        let first = ring.points_within(bounds);
        prop_assert_eq!(&first, &ring.points_within(bounds));

        for point in &first {
            prop_assert!(bounds.contains(*point));
            let distance = center.distance(*point);
            prop_assert!(distance == radius || distance == radius - 1 || distance == radius + 1);
        }
    }

    /// An enemy too far to close in one move never shows up as an attacker.
    #[test]
    fn prop_distant_enemy_changes_nothing(
        target in (500..1500i32, 500..1500i32),
        near in proptest::collection::vec((0..2000i32, 0..2000i32), 0..6),
        range in 10..300i32,
        speed in 10..300i32,
        angle in 0..360i32,
        slack in 5..500i32,
    ) {
        let location = Location::new(target.0, target.1);
        let mut objects: Vec<GameObject> = near
            .iter()
            .enumerate()
            .map(|(index, &(row, col))| {
                GameObject::new(EntityId(index as u32), ObjectKind::Unit, Side::Enemy, Location::new(row, col), mobile(range, speed))
            })
            .collect();
        let before: Vec<EntityId> = ThreatModel::new(&objects, Side::Mine)
            .possible_attackers(location, None, &[])
            .iter()
            .map(|enemy| enemy.id)
            .collect();

        let reach = f64::from(range + speed + slack);
        let radians = f64::from(angle).to_radians();
        let far = Location::new(
            target.0 + (reach * radians.sin()).round() as i32,
            target.1 + (reach * radians.cos()).round() as i32,
        );
        objects.push(GameObject::new(EntityId(100), ObjectKind::Unit, Side::Enemy, far, mobile(range, speed)));

        let after: Vec<EntityId> = ThreatModel::new(&objects, Side::Mine)
            .possible_attackers(location, None, &[])
            .iter()
            .map(|enemy| enemy.id)
            .collect();
        prop_assert_eq!(before, after);
    }

    /// Available mana is always raw minus the sum of reservations.
    #[test]
    fn prop_ledger_conserves_mana(
        raw in 0..5000i32,
        reservations in proptest::collection::vec(0..1000i32, 0..20),
    ) {
        let mut ledger = ResourceLedger::new(raw);
        for cost in &reservations {
            ledger.reserve(*cost);
        }
        prop_assert_eq!(ledger.available(), raw - reservations.iter().sum::<i32>());

        ledger.reset();
        prop_assert_eq!(ledger.available(), raw);
    }

    /// Every unit gets a mission whose precondition holds.
    #[test]
    fn prop_missions_are_total_and_sound(
        mine in proptest::collection::vec(field_point(), 1..4),
        enemies in proptest::collection::vec(field_point(), 0..4),
    ) {
        let world = arena(&mine, &enemies);
        let config = TacticsConfig::default();
        let mut ctx = TurnContext::new(&world, &config).unwrap();
        ctx.refresh_sites();

        for unit in ctx.mine().units.clone() {
            match best_mission(&ctx, unit, &[]) {
                Mission::CurrentlyBuilding => prop_assert!(unit.is_building()),
                Mission::BuildStructure { structure } => {
                    prop_assert!(world.can_build_at(unit.location, structure));
                    prop_assert!(ctx.ledger.can_afford(ctx.cost(structure)));
                }
                Mission::SaveForStructure { structure, .. } => {
                    prop_assert!(world.can_build_at(unit.location, structure));
                    prop_assert!(!ctx.ledger.can_afford(ctx.cost(structure)));
                }
                Mission::AttackTarget { target } => {
                    let target = ctx.object(target).unwrap();
                    prop_assert!(unit.in_attack_range(target));
                }
                Mission::MoveToTarget { target } => {
                    let target = ctx.object(target).unwrap();
                    prop_assert!(target.side == Side::Enemy);
                    if ctx.role_of(unit) == Role::Raider {
                        let in_reach = mission::get_attack_target(&ctx, unit)
                            .is_some_and(|attack| attack.id == target.id);
                        prop_assert!(!in_reach);

                        let spot = unit.distance(unit.attack_location(target));
                        let closer = mission::pending_site(&ctx, unit)
                            .is_none_or(|(_, site)| spot < unit.distance(site));
                        prop_assert!(closer || ctx.attacking_portals() > 0);
                    }
                }
                Mission::MoveToBuildSite { structure, site } => {
                    prop_assert!(world.contains(site));
                    prop_assert!(world.can_build_at(site, structure));
                    prop_assert_eq!(mission::pending_site(&ctx, unit), Some((structure, site)));
                }
                Mission::MoveToHomeBase => {}
                Mission::RushResource { .. } => prop_assert!(config.rush_fountains),
            }
        }
    }

    /// Two units never chase the same enemy unit while others remain free.
    #[test]
    fn prop_chase_targets_are_unique(
        mine in proptest::collection::vec(field_point(), 2..5),
        enemies in proptest::collection::vec(field_point(), 2..5),
    ) {
        let world = arena(&mine, &enemies);
        let config = TacticsConfig::default();
        let mut ctx = TurnContext::new(&world, &config).unwrap();
        prop_assume!(ctx.portals_in(Zone::Attacking) == 0);

        let enemy_units: Vec<EntityId> = ctx.enemy().units.iter().map(|unit| unit.id).collect();
        let mut chasers: HashMap<EntityId, usize> = HashMap::new();
        for assignment in mission::assign(&mut ctx) {
            if let Mission::MoveToTarget { target } = assignment.mission {
                if enemy_units.contains(&target) {
                    *chasers.entry(target).or_default() += 1;
                }
            }
        }
        prop_assert!(chasers.values().all(|count| *count <= 1));
    }
}
