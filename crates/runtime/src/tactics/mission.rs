//! Per-unit mission selection, cross-unit arbitration and execution.
//!
//! Missions are recomputed from scratch every turn. [`best_mission`] walks a
//! fixed priority ladder and returns the first tier whose precondition
//! holds; [`assign`] runs it for every unit in interception order, sharing
//! move targets only when there is no one else to chase; [`execute`] turns a
//! mission into at most one command.

use game_core::{
    Command, CommandSink, EntityId, GameObject, Location, ObjectKind, SpellKind, StructureKind,
};

use super::path;
use crate::context::{Role, TurnContext, Zone};
use crate::error::Result;
use crate::memory::TacticsMemory;

// ============================================================================
// Mission
// ============================================================================

/// The job a unit does this turn. Targets are held by id and re-resolved at
/// execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mission {
    /// Mid-construction; leave the unit alone.
    CurrentlyBuilding,
    /// Build here, now.
    BuildStructure { structure: StructureKind },
    /// Hold position while mana accumulates, hitting `attack` meanwhile.
    SaveForStructure {
        structure: StructureKind,
        attack: Option<EntityId>,
    },
    AttackTarget { target: EntityId },
    MoveToTarget { target: EntityId },
    MoveToBuildSite {
        structure: StructureKind,
        site: Location,
    },
    /// Fallback: advance on the enemy castle.
    MoveToHomeBase,
    /// Sprint for an enemy fountain.
    RushResource { fountain: EntityId },
}

/// Discriminant of [`Mission`], for logs and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MissionKind {
    CurrentlyBuilding,
    BuildStructure,
    SaveForStructure,
    AttackTarget,
    MoveToTarget,
    MoveToBuildSite,
    MoveToHomeBase,
    RushResource,
}

impl Mission {
    pub fn kind(&self) -> MissionKind {
        match self {
            Mission::CurrentlyBuilding => MissionKind::CurrentlyBuilding,
            Mission::BuildStructure { .. } => MissionKind::BuildStructure,
            Mission::SaveForStructure { .. } => MissionKind::SaveForStructure,
            Mission::AttackTarget { .. } => MissionKind::AttackTarget,
            Mission::MoveToTarget { .. } => MissionKind::MoveToTarget,
            Mission::MoveToBuildSite { .. } => MissionKind::MoveToBuildSite,
            Mission::MoveToHomeBase => MissionKind::MoveToHomeBase,
            Mission::RushResource { .. } => MissionKind::RushResource,
        }
    }

    /// Mana the mission earmarks when assigned.
    pub fn reservation(&self, ctx: &TurnContext<'_>) -> i32 {
        match self {
            Mission::BuildStructure { structure } | Mission::SaveForStructure { structure, .. } => {
                ctx.cost(*structure)
            }
            _ => 0,
        }
    }
}

// ============================================================================
// Target selection
// ============================================================================

/// Best enemy to hit from where `unit` stands.
///
/// Units first, then portals, then tornadoes, then everything else; weaker
/// targets before healthier ones. Castles are left to the home-base advance.
pub fn get_attack_target<'a>(ctx: &TurnContext<'a>, unit: &GameObject) -> Option<&'a GameObject> {
    let enemy = ctx.enemy();
    let tornadoes = enemy.creatures_of(ObjectKind::TORNADO);

    enemy
        .units
        .iter()
        .chain(enemy.portals.iter())
        .chain(enemy.fountains.iter())
        .copied()
        .chain(tornadoes)
        .filter(|target| unit.in_attack_range(target))
        .min_by_key(|target| {
            let priority = target.kind.profile().target_priority.unwrap_or(u8::MAX);
            (priority, target.current_health, unit.distance(target.location), target.id)
        })
}

/// Best enemy worth walking to, ignoring `exceptions`.
///
/// Candidates are enemy portals and fountains plus enemy units no healthier
/// than `unit`. Ranked by exposure on the way (enemies closing on the attack
/// spot, the target itself excluded), then distance to the attack spot, then
/// portals near our castle, then fountains, then health.
pub fn get_move_target<'a>(
    ctx: &TurnContext<'a>,
    unit: &GameObject,
    exceptions: &[EntityId],
) -> Option<&'a GameObject> {
    let enemy = ctx.enemy();
    let home = ctx.mine().castle.location;

    enemy
        .portals
        .iter()
        .chain(enemy.fountains.iter())
        .chain(enemy.units.iter().filter(|target| target.current_health <= unit.current_health))
        .copied()
        .filter(|target| !exceptions.contains(&target.id))
        .min_by_key(|target| {
            let spot = unit.attack_location(target);
            let exposure = ctx.threats().possible_attackers(unit, Some(spot), &[target.id]).len();
            let portal_distance = if target.is_kind(ObjectKind::PORTAL) {
                target.distance(home)
            } else {
                i32::MAX
            };
            let fountain_last = !target.is_kind(ObjectKind::FOUNTAIN);
            (
                exposure,
                unit.distance(spot),
                portal_distance,
                fountain_last,
                target.current_health,
                target.id,
            )
        })
}

/// Nearest enemy fountain within one sped-up sprint, when rushing is enabled.
pub fn get_rush_target<'a>(ctx: &TurnContext<'a>, unit: &GameObject) -> Option<&'a GameObject> {
    if !ctx.config().rush_fountains {
        return None;
    }

    let reach = ctx.rules().speed_up_reach(unit.max_speed());
    ctx.enemy()
        .fountains
        .iter()
        .copied()
        .min_by_key(|fountain| (unit.distance(fountain.location), fountain.id))
        .filter(|fountain| unit.location.in_range(unit.attack_location(fountain), reach))
}

// ============================================================================
// Strategic predicates
// ============================================================================

fn should_build_fountain(ctx: &TurnContext<'_>, unit: &GameObject) -> bool {
    let mine = ctx.mine();
    ctx.role_of(unit) == Role::Defender
        && mine.fountains.len() < ctx.config().max_fountains(!mine.portals.is_empty())
        && ctx.fountains_in_progress() == 0
        && !ctx.castle_under_attack()
        && ctx.zone_of(unit.location) != Zone::Attacking
}

/// Whether another portal belongs at `location` for this unit.
///
/// Every zone must have room under its cap. Outside the attacking zone the
/// overall portal budget applies as well, and home portals are the
/// defender's job. Forward portals must be able to launch viable giants.
fn should_build_portal(ctx: &TurnContext<'_>, unit: &GameObject, location: Location) -> bool {
    let zone = ctx.zone_of(location);
    if !ctx.zone_has_room(zone) {
        return false;
    }

    match zone {
        Zone::Attacking => ctx.can_attack_from(location),
        Zone::Neutral => ctx.mine().portals.len() < ctx.max_portals() && ctx.can_attack_from(location),
        Zone::Defensive => {
            ctx.role_of(unit) == Role::Defender && ctx.mine().portals.len() < ctx.max_portals()
        }
    }
}

/// Structure the unit should put down where it stands, if any.
fn build_here(ctx: &TurnContext<'_>, unit: &GameObject) -> Option<StructureKind> {
    let world = ctx.world();
    if !ctx.is_safe_to_hold(unit, 1, &[]) {
        return None;
    }

    if world.can_build_at(unit.location, StructureKind::ManaFountain) && should_build_fountain(ctx, unit) {
        return Some(StructureKind::ManaFountain);
    }
    if world.can_build_at(unit.location, StructureKind::Portal)
        && should_build_portal(ctx, unit, unit.location)
    {
        return Some(StructureKind::Portal);
    }
    None
}

/// Whether `unit` can wait out a savings plan for `structure` in place.
fn can_save_for(ctx: &TurnContext<'_>, unit: &GameObject, structure: StructureKind) -> bool {
    // one savings plan per turn
    if ctx.ledger.reserved() > 0 {
        return false;
    }

    let cost = ctx.cost(structure);
    let income = ctx.world().mana_per_turn();
    let Some(turns) = ctx.ledger.saving_turns(cost, income) else {
        return false;
    };
    if turns > ctx.config().max_saving_turns {
        return false;
    }

    let horizon = turns + ctx.rules().building_duration(structure);
    ctx.is_safe_to_hold(unit, horizon, &[])
}

/// Build site to head for next, in priority order: a fountain for the
/// defender, a home portal while in the defensive zone, then a forward portal.
pub fn pending_site(ctx: &TurnContext<'_>, unit: &GameObject) -> Option<(StructureKind, Location)> {
    let plan = ctx.site_plan(unit.id);

    if let Some(site) = plan.fountain.filter(|_| should_build_fountain(ctx, unit)) {
        return Some((StructureKind::ManaFountain, site));
    }

    if let Some(site) = plan.defensive_portal {
        let home = ctx.zone_of(unit.location) == Zone::Defensive;
        if home && should_build_portal(ctx, unit, site) {
            return Some((StructureKind::Portal, site));
        }
    }

    plan.attacking_portal
        .filter(|site| should_build_portal(ctx, unit, *site))
        .map(|site| (StructureKind::Portal, site))
}

// ============================================================================
// Mission ladder
// ============================================================================

/// First applicable mission for `unit`. Targets in `exceptions` are not
/// chased.
pub fn best_mission(ctx: &TurnContext<'_>, unit: &GameObject, exceptions: &[EntityId]) -> Mission {
    if unit.is_building() {
        return Mission::CurrentlyBuilding;
    }

    let attack_target = get_attack_target(ctx, unit);

    if let Some(structure) = build_here(ctx, unit) {
        if ctx.ledger.can_afford(ctx.cost(structure)) {
            return Mission::BuildStructure { structure };
        }
        if can_save_for(ctx, unit, structure) {
            return Mission::SaveForStructure {
                structure,
                attack: attack_target.map(|target| target.id),
            };
        }
    }

    if let Some(target) = attack_target.filter(|target| ctx.should_engage(unit, target)) {
        return Mission::AttackTarget { target: target.id };
    }

    if let Some(fountain) = get_rush_target(ctx, unit) {
        return Mission::RushResource { fountain: fountain.id };
    }

    let site = pending_site(ctx, unit);
    if let Some(target) = get_move_target(ctx, unit, exceptions) {
        let worth_it = match ctx.role_of(unit) {
            Role::Defender => true,
            Role::Raider => {
                let already_there = attack_target.is_some_and(|attack| attack.id == target.id);
                let closer = site.is_none_or(|(_, site)| {
                    unit.distance(unit.attack_location(target)) < unit.distance(site)
                });
                !already_there && (closer || ctx.attacking_portals() > 0)
            }
        };
        if worth_it {
            return Mission::MoveToTarget { target: target.id };
        }
    }

    if let Some((structure, site)) = site {
        return Mission::MoveToBuildSite { structure, site };
    }

    Mission::MoveToHomeBase
}

/// A unit paired with its mission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub unit: EntityId,
    pub mission: Mission,
}

/// Whether several units may chase the same enemy unit.
pub fn sharing_allowed(ctx: &TurnContext<'_>) -> bool {
    ctx.enemy().units.len() <= 1 || ctx.attacking_portals() > 0
}

/// Assigns one mission per friendly unit and reserves their mana.
///
/// Units closest to an enemy unit pick first. A claimed enemy unit is off
/// limits to later units unless [`sharing_allowed`]; those units fall through
/// to their next option instead.
pub fn assign(ctx: &mut TurnContext<'_>) -> Vec<Assignment> {
    let enemy_units = ctx.enemy().units.clone();
    let mut order = ctx.mine().units.clone();
    order.sort_by_key(|unit| {
        let nearest = enemy_units
            .iter()
            .map(|enemy| unit.distance(enemy.location))
            .min()
            .unwrap_or(i32::MAX);
        (nearest, unit.id)
    });

    let shared = sharing_allowed(ctx);
    let mut claimed: Vec<EntityId> = Vec::new();
    let mut assignments = Vec::with_capacity(order.len());

    for unit in order {
        let exceptions: &[EntityId] = if shared { &[] } else { &claimed };
        let mission = best_mission(ctx, unit, exceptions);

        if let Mission::MoveToTarget { target } = mission {
            if enemy_units.iter().any(|enemy| enemy.id == target) {
                claimed.push(target);
            }
        }

        let cost = mission.reservation(ctx);
        if cost > 0 {
            ctx.ledger.reserve(cost);
        }

        tracing::debug!(unit = %unit.id, mission = %mission.kind(), "Mission assigned");
        assignments.push(Assignment { unit: unit.id, mission });
    }

    assignments
}

// ============================================================================
// Execution
// ============================================================================

fn move_safely(
    ctx: &TurnContext<'_>,
    unit: &GameObject,
    destination: Location,
    ignore: &[EntityId],
    sink: &mut dyn CommandSink,
) {
    let step = path::next_step(ctx.threats(), ctx.world().bounds(), unit, destination, ignore);
    sink.issue(Command::MoveTo { unit: unit.id, to: step });
}

/// Casts SpeedUp when the unit is locked in a chase with `target` and can
/// afford it. Returns whether the cast was issued.
fn try_speed_up(
    ctx: &TurnContext<'_>,
    memory: &TacticsMemory,
    unit: &GameObject,
    target: &GameObject,
    sink: &mut dyn CommandSink,
) -> bool {
    if !target.is_unit() || unit.is_sped_up() || !memory.is_in_chase(unit, target) {
        return false;
    }
    if !ctx.ledger.can_afford(ctx.cost(SpellKind::SpeedUp)) {
        return false;
    }
    tracing::debug!(unit = %unit.id, target = %target.id, "Chase detected, speeding up");
    sink.issue(Command::Cast { unit: unit.id, spell: SpellKind::SpeedUp });
    true
}

/// Issues the command for `mission`.
///
/// Paid spells are charged to the ledger here; structures were charged at
/// assignment.
///
/// # Errors
///
/// Returns [`crate::TacticsError::UnknownEntity`] when a referenced target
/// is not in the snapshot.
pub fn execute(
    ctx: &mut TurnContext<'_>,
    memory: &TacticsMemory,
    unit: &GameObject,
    mission: Mission,
    sink: &mut dyn CommandSink,
) -> Result<()> {
    match mission {
        Mission::CurrentlyBuilding => {}

        Mission::BuildStructure { structure } => {
            sink.issue(Command::Build { unit: unit.id, structure });
        }

        Mission::SaveForStructure { attack, .. } => {
            if let Some(target) = attack {
                let target = ctx.object(target)?;
                sink.issue(Command::Attack { unit: unit.id, target: target.id });
            }
        }

        Mission::AttackTarget { target } => {
            let target = ctx.object(target)?;
            sink.issue(Command::Attack { unit: unit.id, target: target.id });
        }

        Mission::MoveToTarget { target } => {
            let target = ctx.object(target)?;
            if try_speed_up(ctx, memory, unit, target, sink) {
                let cost = ctx.cost(SpellKind::SpeedUp);
                ctx.ledger.reserve(cost);
                return Ok(());
            }
            // the chased unit is not an obstacle on the way to itself
            let ignore: &[EntityId] = if target.is_unit() { &[target.id] } else { &[] };
            move_safely(ctx, unit, unit.attack_location(target), ignore, sink);
        }

        Mission::MoveToBuildSite { site, .. } => move_safely(ctx, unit, site, &[], sink),

        Mission::RushResource { fountain } => {
            let fountain = ctx.object(fountain)?;
            let cost = ctx.cost(SpellKind::SpeedUp);
            if !unit.is_sped_up() && ctx.ledger.can_afford(cost) {
                sink.issue(Command::Cast { unit: unit.id, spell: SpellKind::SpeedUp });
                ctx.ledger.reserve(cost);
            } else {
                move_safely(ctx, unit, unit.attack_location(fountain), &[], sink);
            }
        }

        Mission::MoveToHomeBase => {
            let castle = ctx.enemy().castle;
            if unit.in_attack_range(castle) {
                sink.issue(Command::Attack { unit: unit.id, target: castle.id });
            } else if let Some(target) = get_attack_target(ctx, unit) {
                sink.issue(Command::Attack { unit: unit.id, target: target.id });
            } else {
                move_safely(ctx, unit, unit.attack_location(castle), &[], sink);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use game_core::{CommandBuffer, MapBounds, Side, TacticsConfig, WorldState};

    use super::*;

    fn base(mana: i32, income: i32) -> WorldState {
        let mut world = WorldState::new(MapBounds::new(4000, 7000)).with_mana(mana, income);
        world.spawn(ObjectKind::CASTLE, Side::Mine, Location::new(2000, 500));
        world.spawn(ObjectKind::CASTLE, Side::Enemy, Location::new(2000, 6500));
        world
    }

    fn decide(world: &WorldState, unit: EntityId) -> Mission {
        let config = TacticsConfig::default();
        let mut ctx = TurnContext::new(world, &config).unwrap();
        ctx.refresh_sites();
        let unit = ctx.object(unit).unwrap();
        best_mission(&ctx, unit, &[])
    }

    #[test]
    fn busy_builder_is_left_alone() {
        let mut world = base(500, 5);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 1300));
        world.object_mut(unit).unwrap().building = Some(StructureKind::Portal);

        assert_eq!(decide(&world, unit), Mission::CurrentlyBuilding);
    }

    #[test]
    fn defender_builds_fountain_on_the_spot() {
        let mut world = base(500, 5);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 1300));

        assert_eq!(
            decide(&world, unit),
            Mission::BuildStructure { structure: StructureKind::ManaFountain }
        );
    }

    #[test]
    fn short_on_mana_saves_instead() {
        let mut world = base(100, 5);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 1300));

        // 20 missing at 5 per turn is 4 turns of saving
        assert_eq!(
            decide(&world, unit),
            Mission::SaveForStructure { structure: StructureKind::ManaFountain, attack: None }
        );
    }

    #[test]
    fn no_income_means_no_savings_plan() {
        let mut world = base(100, 0);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 1300));

        let mission = decide(&world, unit);
        assert_ne!(mission.kind(), MissionKind::SaveForStructure);
        assert_ne!(mission.kind(), MissionKind::BuildStructure);
    }

    #[test]
    fn weak_unit_in_range_is_attacked() {
        let mut world = base(0, 0);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 3000));
        let enemy = world.spawn(ObjectKind::Unit, Side::Enemy, Location::new(2000, 3150));
        world.object_mut(enemy).unwrap().current_health = 2;

        assert_eq!(decide(&world, unit), Mission::AttackTarget { target: enemy });
    }

    #[test]
    fn raider_walks_to_a_portal() {
        let mut world = base(0, 0);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 3500));
        let portal = world.spawn(ObjectKind::PORTAL, Side::Enemy, Location::new(2000, 4500));

        assert_eq!(decide(&world, unit), Mission::MoveToTarget { target: portal });
    }

    #[test]
    fn empty_field_falls_back_to_home_base() {
        let mut world = base(0, 0);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 4000));

        let mission = decide(&world, unit);
        assert!(matches!(
            mission,
            Mission::MoveToHomeBase | Mission::MoveToBuildSite { structure: StructureKind::Portal, .. }
        ));
    }

    #[test]
    fn claimed_enemy_is_not_chased_twice() {
        let mut world = base(0, 0);
        let first = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(1000, 3000));
        world.spawn(ObjectKind::Unit, Side::Mine, Location::new(3000, 3000));
        let weak = world.spawn(ObjectKind::Unit, Side::Enemy, Location::new(1200, 3600));
        world.object_mut(weak).unwrap().current_health = 5;
        world.spawn(ObjectKind::Unit, Side::Enemy, Location::new(3800, 6800));

        let config = TacticsConfig::default();
        let mut ctx = TurnContext::new(&world, &config).unwrap();
        ctx.refresh_sites();
        assert!(!sharing_allowed(&ctx));

        let assignments = assign(&mut ctx);
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].unit, first);

        let chased: Vec<EntityId> = assignments
            .iter()
            .filter_map(|assignment| match assignment.mission {
                Mission::MoveToTarget { target } if target == weak => Some(assignment.unit),
                _ => None,
            })
            .collect();
        assert!(chased.len() <= 1);
    }

    #[test]
    fn home_base_attacks_castle_in_range() {
        let mut world = base(0, 0);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 5950));
        let config = TacticsConfig::default();
        let mut ctx = TurnContext::new(&world, &config).unwrap();
        let memory = TacticsMemory::new();
        let unit = ctx.object(unit).unwrap();

        let mut buffer = CommandBuffer::new();
        execute(&mut ctx, &memory, unit, Mission::MoveToHomeBase, &mut buffer).unwrap();
        assert_eq!(
            buffer.commands(),
            &[Command::Attack { unit: unit.id, target: EntityId(1) }]
        );
    }

    #[test]
    fn stale_target_is_reported() {
        let mut world = base(0, 0);
        let unit = world.spawn(ObjectKind::Unit, Side::Mine, Location::new(2000, 3000));
        let config = TacticsConfig::default();
        let mut ctx = TurnContext::new(&world, &config).unwrap();
        let memory = TacticsMemory::new();
        let unit = ctx.object(unit).unwrap();

        let mut buffer = CommandBuffer::new();
        let result = execute(
            &mut ctx,
            &memory,
            unit,
            Mission::AttackTarget { target: EntityId(99) },
            &mut buffer,
        );
        assert!(result.is_err());
        assert!(buffer.is_empty());
    }
}
