//! Portal production turn.
//!
//! Runs after unit missions so it sees their reservations. Free portals
//! (not already summoning) are handled closest to the enemy castle first:
//!
//! 1. threatened portals summon an ice troll, or reserve its cost;
//! 2. one portal summons a tornado when none of ours exists and it would
//!    raze an enemy building;
//! 3. the rest summon lava giants where a giant can reach the enemy castle,
//!    unless mana is being hoarded for the first fountain.

use game_core::{
    Command, CommandSink, CreatureKind, GameObject, ObjectKind, Side, StructureKind,
};

use super::combat;
use crate::context::TurnContext;

/// What the production turn did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProductionSummary {
    pub summoned: usize,
    /// Mana reserved for trolls that could not be afforded yet.
    pub reserved: i32,
}

/// Zero income with a fountain's worth of raw mana means the economy has not
/// started; everything goes to that fountain.
pub fn saving_for_first_fountain(ctx: &TurnContext<'_>) -> bool {
    let world = ctx.world();
    world.mana_per_turn() == 0 && world.mana() >= ctx.cost(StructureKind::ManaFountain)
}

/// Whether `portal` needs a defender within `horizon` turns.
///
/// Any enemy unit that can walk to the portal's strike boundary in time, any
/// enemy tornado locked onto it, or anyone able to hit it next tick.
pub fn is_threatened(ctx: &TurnContext<'_>, portal: &GameObject, horizon: i32) -> bool {
    let walking = ctx.enemy().units.iter().any(|enemy| {
        let boundary = portal.location.towards(enemy.location, enemy.attack_range() + portal.size());
        enemy.location.in_range(boundary, enemy.max_speed() * horizon)
    });
    let tornado = ctx
        .enemy()
        .creatures_of(ObjectKind::TORNADO)
        .any(|tornado| tornado.target == Some(portal.id));

    walking || tornado || !ctx.threats().is_clear(portal, &[])
}

fn has_tornado(ctx: &TurnContext<'_>) -> bool {
    let mine = ctx.mine();
    mine.creatures_of(ObjectKind::TORNADO).next().is_some()
        || mine.portals.iter().any(|portal| portal.summoning == Some(CreatureKind::Tornado))
}

/// Whether a fresh tornado from `portal` would finish the enemy building
/// nearest to it.
fn tornado_pays_off(ctx: &TurnContext<'_>, portal: &GameObject) -> bool {
    let Some(target) = ctx
        .enemy()
        .buildings()
        .min_by_key(|building| (portal.distance(building.location), building.id))
    else {
        return false;
    };

    let stats = ctx.rules().capabilities(ObjectKind::TORNADO);
    let tornado = GameObject::new(portal.id, ObjectKind::TORNADO, Side::Mine, portal.location, stats);
    combat::will_finish(&tornado, target, &ctx.config().engagement)
}

fn summon(
    ctx: &mut TurnContext<'_>,
    portal: &GameObject,
    creature: CreatureKind,
    sink: &mut dyn CommandSink,
) {
    let cost = ctx.cost(creature);
    ctx.ledger.reserve(cost);
    tracing::debug!(portal = %portal.id, %creature, cost, "Summoning");
    sink.issue(Command::Summon { portal: portal.id, creature });
}

/// Runs every free portal's production decision.
pub fn portal_turn(ctx: &mut TurnContext<'_>, sink: &mut dyn CommandSink) -> ProductionSummary {
    let mut summary = ProductionSummary::default();
    let enemy_castle = ctx.enemy().castle.location;

    let mut free: Vec<&GameObject> = ctx
        .mine()
        .portals
        .iter()
        .copied()
        .filter(|portal| !portal.is_summoning())
        .collect();
    if free.is_empty() {
        return summary;
    }
    free.sort_by_key(|portal| (portal.distance(enemy_castle), portal.id));

    let hoarding = saving_for_first_fountain(ctx);

    // ===== defence =====
    let troll_cost = ctx.cost(CreatureKind::IceTroll);
    let saving = ctx
        .ledger
        .saving_turns(troll_cost, ctx.world().mana_per_turn())
        .unwrap_or(ctx.config().max_saving_turns);
    let horizon = ctx.rules().summoning_duration(CreatureKind::IceTroll) + saving;

    let mut idle = Vec::with_capacity(free.len());
    for portal in free {
        if !is_threatened(ctx, portal, horizon) {
            idle.push(portal);
            continue;
        }
        if ctx.ledger.can_afford(troll_cost) {
            summon(ctx, portal, CreatureKind::IceTroll, sink);
            summary.summoned += 1;
        } else {
            ctx.ledger.reserve(troll_cost);
            summary.reserved += troll_cost;
            tracing::debug!(portal = %portal.id, "Threatened portal saving for a troll");
        }
    }

    // ===== tornado =====
    let tornado_cost = ctx.cost(CreatureKind::Tornado);
    if !has_tornado(ctx) && ctx.ledger.can_afford(tornado_cost) {
        if let Some(index) = idle.iter().position(|portal| tornado_pays_off(ctx, portal)) {
            let portal = idle.remove(index);
            summon(ctx, portal, CreatureKind::Tornado, sink);
            summary.summoned += 1;
        }
    }

    // ===== siege =====
    if hoarding {
        return summary;
    }
    let giant_cost = ctx.cost(CreatureKind::LavaGiant);
    for portal in idle {
        if ctx.can_attack_from(portal.location) && ctx.ledger.can_afford(giant_cost) {
            summon(ctx, portal, CreatureKind::LavaGiant, sink);
            summary.summoned += 1;
        }
    }

    summary
}
