//! Attrition projections used to decide whether to fight, hold or leave.
//!
//! All three verdicts are pure functions of the snapshot. They model combat
//! as whole ticks of flat damage (attack multiplier per hit) plus passive
//! decay, which is what the simulation applies.

use game_core::{EngagementThresholds, EntityId, GameObject, Location};

use super::threat::ThreatModel;

fn ceil_div(value: i32, divisor: i32) -> i32 {
    if value <= 0 {
        return 0;
    }
    (value + divisor - 1) / divisor
}

/// Whether `unit` can stay where it is for `turns` ticks.
///
/// With a single turn this is "no possible attackers next tick". Longer
/// horizons run an attrition loop: each threat hits if in range or closes in
/// at full speed otherwise, and drops out once its own decay has used up its
/// health. The unit must stay alive and lose no more than the configured
/// share of its max health.
pub fn is_safe_to_hold(
    threats: &ThreatModel<'_>,
    unit: &GameObject,
    turns: i32,
    exceptions: &[EntityId],
    thresholds: &EngagementThresholds,
) -> bool {
    if turns <= 1 {
        return threats.is_clear(unit, exceptions);
    }

    let mut enemies: Vec<(&GameObject, Location)> = threats
        .threats()
        .iter()
        .copied()
        .filter(|enemy| !exceptions.contains(&enemy.id))
        .filter(|enemy| !enemy.kind.profile().locks_target || enemy.target == Some(unit.id))
        .map(|enemy| (enemy, enemy.location))
        .collect();

    let footprint = unit.size();
    let mut health = unit.current_health;

    for turn in 1..=turns {
        for (enemy, position) in enemies.iter_mut() {
            if position.in_range(unit.location, enemy.attack_range() + footprint) {
                health -= enemy.attack_multiplier();
            } else {
                *position = position.towards(unit.location, enemy.max_speed());
            }
        }
        enemies.retain(|(enemy, _)| enemy.current_health - enemy.suffocation() * turn > 0);
    }

    let allowed = EngagementThresholds::portion(unit.max_health(), thresholds.hold_damage_percent);
    health > 0 && unit.current_health - health <= allowed
}

/// Projected outcome of `unit` attacking `target` until it falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Engagement {
    /// Ticks of our damage plus the target's decay needed to finish it.
    pub turns_to_kill: i32,
    /// Our health once those ticks have passed.
    pub projected_health: i32,
}

/// Projects a fight against `target`; `None` when we cannot damage it at all.
///
/// Every current possible attacker of `unit` (the target included, when it
/// can strike back) deals its damage each tick until its own decay has
/// exhausted it.
pub fn project_engagement(
    threats: &ThreatModel<'_>,
    unit: &GameObject,
    target: &GameObject,
) -> Option<Engagement> {
    let damage = unit.attack_multiplier() + target.suffocation();
    if damage <= 0 {
        return None;
    }

    let turns_to_kill = ceil_div(target.current_health, damage);
    let attackers = threats.possible_attackers(unit, None, &[]);

    let mut health = unit.current_health;
    for tick in 0..turns_to_kill {
        for attacker in &attackers {
            if attacker.current_health <= attacker.suffocation() * tick {
                continue;
            }
            health -= attacker.attack_multiplier();
        }
    }

    Some(Engagement {
        turns_to_kill,
        projected_health: health,
    })
}

/// Whether attacking `target` now is worth it.
///
/// Approved when we come out untouched, keep at least the configured share
/// of max health, or (against another unit) merely survive the duel.
pub fn should_engage(
    threats: &ThreatModel<'_>,
    unit: &GameObject,
    target: &GameObject,
    thresholds: &EngagementThresholds,
) -> bool {
    let Some(engagement) = project_engagement(threats, unit, target) else {
        return false;
    };

    let health = engagement.projected_health;
    let floor = EngagementThresholds::portion(unit.max_health(), thresholds.engage_health_percent);

    health == unit.current_health
        || health >= floor
        || (target.is_unit() && health >= thresholds.duel_min_health)
}

/// One-shot duel: does `attacker` destroy `target` before dying?
///
/// The attacker first travels to the edge of its attack range, decaying on
/// the way. Then both sides' ticks-to-kill are compared; decay counts as
/// damage taken. On equal ticks the attacker wins only when the target cannot
/// strike back and the thresholds allow it.
pub fn will_finish(attacker: &GameObject, target: &GameObject, thresholds: &EngagementThresholds) -> bool {
    let reach = attacker.attack_range() + target.size();
    let gap = (attacker.distance(target.location) - reach).max(0);

    let travel = if gap == 0 {
        0
    } else if attacker.max_speed() > 0 {
        ceil_div(gap, attacker.max_speed())
    } else {
        return false;
    };

    let arrival_health = attacker.current_health - attacker.suffocation() * travel;
    if arrival_health <= 0 {
        return false;
    }

    let damage_dealt = attacker.attack_multiplier() + target.suffocation();
    if damage_dealt <= 0 {
        return false;
    }
    let ticks_to_finish = ceil_div(target.current_health, damage_dealt);

    let counters = target.can_attack(attacker);
    let damage_taken = if counters { target.attack_multiplier() } else { 0 } + attacker.suffocation();
    if damage_taken <= 0 {
        return true;
    }
    let ticks_to_fall = ceil_div(arrival_health, damage_taken);

    ticks_to_finish < ticks_to_fall
        || (ticks_to_finish == ticks_to_fall && !counters && thresholds.attacker_wins_uncontested_ties)
}

#[cfg(test)]
mod tests {
    use game_core::{Capabilities, ObjectKind, Side};

    use super::*;

    fn stats(health: i32, range: i32, multiplier: i32, speed: i32, suffocation: i32) -> Capabilities {
        Capabilities {
            max_health: health,
            attack_range: range,
            attack_multiplier: multiplier,
            max_speed: speed,
            suffocation_per_turn: suffocation,
            size: 0,
        }
    }

    fn spawn(id: u32, kind: ObjectKind, side: Side, col: i32, stats: Capabilities) -> GameObject {
        GameObject::new(EntityId(id), kind, side, Location::new(0, col), stats)
    }

    #[test]
    fn duel_projection_counts_the_target() {
        let objects = vec![
            spawn(1, ObjectKind::Unit, Side::Mine, 0, stats(100, 50, 10, 10, 0)),
            spawn(2, ObjectKind::Unit, Side::Enemy, 40, stats(100, 50, 10, 10, 0)).with_health(15),
        ];
        let threats = ThreatModel::new(&objects, Side::Mine);

        let engagement = project_engagement(&threats, &objects[0], &objects[1]).unwrap();
        assert_eq!(engagement.turns_to_kill, 2);
        assert_eq!(engagement.projected_health, 80);
        assert!(should_engage(&threats, &objects[0], &objects[1], &EngagementThresholds::default()));
    }

    #[test]
    fn losing_fight_against_structure_is_declined() {
        let portal = Capabilities { max_health: 60, size: 10, ..Capabilities::default() };
        let objects = vec![
            spawn(1, ObjectKind::Unit, Side::Mine, 0, stats(10, 50, 1, 10, 0)),
            spawn(2, ObjectKind::PORTAL, Side::Enemy, 40, portal),
            spawn(3, ObjectKind::Unit, Side::Enemy, 30, stats(10, 50, 1, 10, 0)),
        ];
        let threats = ThreatModel::new(&objects, Side::Mine);

        // 60 ticks under fire from the enemy unit would kill us
        assert!(!should_engage(&threats, &objects[0], &objects[1], &EngagementThresholds::default()));
        // the enemy unit itself is a fair duel: 10 ticks each, we end at 0
        assert!(should_engage(&threats, &objects[0], &objects[2], &EngagementThresholds::default()));
    }

    #[test]
    fn untouched_attack_is_always_fine() {
        let objects = vec![
            spawn(1, ObjectKind::Unit, Side::Mine, 0, stats(10, 50, 1, 10, 0)),
            spawn(2, ObjectKind::FOUNTAIN, Side::Enemy, 40, Capabilities { max_health: 500, ..Capabilities::default() }),
        ];
        let threats = ThreatModel::new(&objects, Side::Mine);
        assert!(should_engage(&threats, &objects[0], &objects[1], &EngagementThresholds::default()));
    }

    #[test]
    fn hold_projection_drops_decayed_threats() {
        let thresholds = EngagementThresholds::default();
        let unit = spawn(1, ObjectKind::Unit, Side::Mine, 0, stats(10, 0, 0, 0, 0));
        let lasting = spawn(2, ObjectKind::ICE_TROLL, Side::Enemy, 10, stats(30, 20, 3, 10, 1)).with_target(EntityId(1));
        let fading = lasting.clone().with_health(1);

        let objects = vec![unit.clone(), lasting];
        let threats = ThreatModel::new(&objects, Side::Mine);
        // three hits of 3 take 9 of 10 health
        assert!(!is_safe_to_hold(&threats, &unit, 3, &[], &thresholds));

        let objects = vec![unit.clone(), fading];
        let threats = ThreatModel::new(&objects, Side::Mine);
        // one hit, then the troll suffocates
        assert!(is_safe_to_hold(&threats, &unit, 3, &[], &thresholds));
    }

    #[test]
    fn hold_ignores_trolls_locked_elsewhere() {
        let thresholds = EngagementThresholds::default();
        let unit = spawn(1, ObjectKind::Unit, Side::Mine, 0, stats(10, 0, 0, 0, 0));
        let troll = spawn(2, ObjectKind::ICE_TROLL, Side::Enemy, 10, stats(30, 20, 3, 10, 1)).with_target(EntityId(7));
        let objects = vec![unit.clone(), troll];
        let threats = ThreatModel::new(&objects, Side::Mine);

        assert!(is_safe_to_hold(&threats, &unit, 1, &[], &thresholds));
        assert!(is_safe_to_hold(&threats, &unit, 5, &[], &thresholds));
    }

    #[test]
    fn tornado_finishes_distant_portal() {
        let thresholds = EngagementThresholds::default();
        let tornado = spawn(1, ObjectKind::TORNADO, Side::Mine, 0, stats(30, 150, 1, 100, 1));
        let mut portal_stats = Capabilities { max_health: 20, size: 300, ..Capabilities::default() };
        let portal = spawn(2, ObjectKind::PORTAL, Side::Enemy, 1000, portal_stats);
        // 550 to cover: 6 ticks of travel, arrives with 24, needs 20 more
        assert!(will_finish(&tornado, &portal, &thresholds));

        portal_stats.max_health = 40;
        let sturdy = spawn(3, ObjectKind::PORTAL, Side::Enemy, 1000, portal_stats);
        assert!(!will_finish(&tornado, &sturdy, &thresholds));
    }

    #[test]
    fn uncontested_tie_follows_threshold() {
        let attacker = spawn(1, ObjectKind::TORNADO, Side::Mine, 0, stats(5, 10, 1, 10, 1));
        let target = spawn(2, ObjectKind::FOUNTAIN, Side::Enemy, 0, Capabilities { max_health: 5, ..Capabilities::default() });

        let mut thresholds = EngagementThresholds::default();
        assert!(will_finish(&attacker, &target, &thresholds));
        thresholds.attacker_wins_uncontested_ties = false;
        assert!(!will_finish(&attacker, &target, &thresholds));
    }
}
