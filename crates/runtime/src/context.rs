//! Per-turn blackboard for tactical decisions.
//!
//! [`TurnContext`] is built once at the start of a turn from the world
//! snapshot and passed by reference through mission arbitration and the
//! portal production turn. It owns the only mutable per-turn state, the
//! [`ResourceLedger`] and the [`SiteCache`], and offers the strategic queries
//! (zones, caps, roles) every mission tier shares.
//!
//! # Lifetime
//!
//! All object references borrow from the snapshot (`'a`), not from the
//! context, so a mission can hold on to a unit while the ledger is mutated.

use game_core::{
    EntityId, GameObject, GameRules, Location, ObjectKind, Side, StructureKind, TacticsConfig,
    WorldSnapshot,
};

use crate::error::{Result, TacticsError};
use crate::tactics::combat;
use crate::tactics::ledger::ResourceLedger;
use crate::tactics::site::{self, SiteCache, SitePlan, SiteSearch};
use crate::tactics::threat::ThreatModel;

// ============================================================================
// Roster
// ============================================================================

/// Live objects of one side, split by kind.
#[derive(Clone, Debug)]
pub struct Roster<'a> {
    pub castle: &'a GameObject,
    pub units: Vec<&'a GameObject>,
    pub creatures: Vec<&'a GameObject>,
    pub portals: Vec<&'a GameObject>,
    pub fountains: Vec<&'a GameObject>,
}

impl<'a> Roster<'a> {
    fn collect(objects: &'a [GameObject], side: Side) -> Result<Self> {
        let mut castle = None;
        let mut units = Vec::new();
        let mut creatures = Vec::new();
        let mut portals = Vec::new();
        let mut fountains = Vec::new();

        for object in objects.iter().filter(|object| object.side == side) {
            match object.kind {
                ObjectKind::Unit => units.push(object),
                ObjectKind::Creature(_) => creatures.push(object),
                ObjectKind::Structure(StructureKind::Portal) => portals.push(object),
                ObjectKind::Structure(StructureKind::ManaFountain) => fountains.push(object),
                ObjectKind::Structure(StructureKind::Castle) => {
                    castle.get_or_insert(object);
                }
            }
        }

        let castle = castle.ok_or(TacticsError::MissingCastle { side })?;
        Ok(Self {
            castle,
            units,
            creatures,
            portals,
            fountains,
        })
    }

    /// Creatures of one kind.
    pub fn creatures_of(&self, kind: ObjectKind) -> impl Iterator<Item = &'a GameObject> + '_ {
        self.creatures.iter().copied().filter(move |creature| creature.kind == kind)
    }

    /// Non-castle structures.
    pub fn buildings(&self) -> impl Iterator<Item = &'a GameObject> + '_ {
        self.portals.iter().chain(self.fountains.iter()).copied()
    }
}

// ============================================================================
// Zones and roles
// ============================================================================

/// Strategic band a location falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Zone {
    /// Within the strategic radius of the friendly castle.
    Defensive,
    /// Between both strategic radii.
    Neutral,
    /// Within the strategic radius of the enemy castle.
    Attacking,
}

/// Standing job of a friendly unit for this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    /// Keeps the economy and home defence running.
    Defender,
    /// Pushes toward the enemy base.
    Raider,
}

// ============================================================================
// TurnContext
// ============================================================================

pub struct TurnContext<'a> {
    world: &'a dyn WorldSnapshot,
    config: &'a TacticsConfig,
    mine: Roster<'a>,
    enemy: Roster<'a>,
    threats: ThreatModel<'a>,
    strategic_radius: i32,
    defender: Option<EntityId>,
    /// Mana bookkeeping for this turn.
    pub ledger: ResourceLedger,
    sites: SiteCache,
}

impl<'a> TurnContext<'a> {
    /// Classifies the snapshot and resets the ledger to the raw balance.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::MissingCastle`] when either side has no castle.
    pub fn new(world: &'a dyn WorldSnapshot, config: &'a TacticsConfig) -> Result<Self> {
        let objects = world.objects();
        let mine = Roster::collect(objects, Side::Mine)?;
        let enemy = Roster::collect(objects, Side::Enemy)?;
        let threats = ThreatModel::new(objects, Side::Mine);
        let strategic_radius = config.strategic_radius(mine.castle.distance(enemy.castle.location));
        let defender = pick_defender(&mine, enemy.castle);

        Ok(Self {
            world,
            config,
            mine,
            enemy,
            threats,
            strategic_radius,
            defender,
            ledger: ResourceLedger::new(world.mana()),
            sites: SiteCache::default(),
        })
    }

    // ===== accessors =====

    pub fn world(&self) -> &'a dyn WorldSnapshot {
        self.world
    }

    pub fn rules(&self) -> &'a GameRules {
        self.world.rules()
    }

    pub fn config(&self) -> &'a TacticsConfig {
        self.config
    }

    pub fn mine(&self) -> &Roster<'a> {
        &self.mine
    }

    pub fn enemy(&self) -> &Roster<'a> {
        &self.enemy
    }

    pub fn threats(&self) -> &ThreatModel<'a> {
        &self.threats
    }

    pub fn strategic_radius(&self) -> i32 {
        self.strategic_radius
    }

    pub fn sites(&self) -> &SiteCache {
        &self.sites
    }

    /// Looks up a live object by id.
    ///
    /// # Errors
    ///
    /// Returns [`TacticsError::UnknownEntity`] when the id is not in the snapshot.
    pub fn object(&self, id: EntityId) -> Result<&'a GameObject> {
        self.world.object(id).ok_or(TacticsError::UnknownEntity(id))
    }

    pub fn cost(&self, item: impl Into<game_core::Creatable>) -> i32 {
        self.rules().cost(item)
    }

    // ===== zones =====

    pub fn zone_of(&self, location: Location) -> Zone {
        if location.in_range(self.mine.castle.location, self.strategic_radius) {
            Zone::Defensive
        } else if location.in_range(self.enemy.castle.location, self.strategic_radius) {
            Zone::Attacking
        } else {
            Zone::Neutral
        }
    }

    /// Friendly portals within the strategic radius of the friendly castle.
    pub fn defensive_portals(&self) -> usize {
        let castle = self.mine.castle.location;
        self.mine
            .portals
            .iter()
            .filter(|portal| portal.location.in_range(castle, self.strategic_radius))
            .count()
    }

    /// Friendly portals past the defensive radius but inside the neutral radius.
    pub fn neutral_portals(&self) -> usize {
        let castle = self.mine.castle.location;
        self.mine
            .portals
            .iter()
            .filter(|portal| {
                let distance = portal.distance(castle);
                distance > self.strategic_radius && distance <= self.config.neutral_radius
            })
            .count()
    }

    /// Friendly portals within the strategic radius of the enemy castle.
    pub fn attacking_portals(&self) -> usize {
        let castle = self.enemy.castle.location;
        self.mine
            .portals
            .iter()
            .filter(|portal| portal.location.in_range(castle, self.strategic_radius))
            .count()
    }

    /// Enemy portals guarding their own castle.
    pub fn enemy_defensive_portals(&self) -> usize {
        let castle = self.enemy.castle.location;
        self.enemy
            .portals
            .iter()
            .filter(|portal| portal.location.in_range(castle, self.strategic_radius))
            .count()
    }

    /// Portal cap for a zone before the excess-mana override.
    pub fn portal_cap(&self, zone: Zone) -> usize {
        match zone {
            Zone::Defensive => self.config.max_defensive_portals,
            Zone::Neutral => self.config.max_neutral_portals,
            Zone::Attacking => self.config.max_attacking_portals,
        }
    }

    pub fn portals_in(&self, zone: Zone) -> usize {
        match zone {
            Zone::Defensive => self.defensive_portals(),
            Zone::Neutral => self.neutral_portals(),
            Zone::Attacking => self.attacking_portals(),
        }
    }

    /// Whether spare mana lifts the per-zone caps.
    pub fn has_excess_mana(&self) -> bool {
        self.ledger.available() > self.config.excess_mana * 2
    }

    /// Whether another portal fits under the cap of `zone`.
    pub fn zone_has_room(&self, zone: Zone) -> bool {
        self.portals_in(zone) < self.portal_cap(zone) || self.has_excess_mana()
    }

    /// Portal budget outside the attacking zone.
    ///
    /// Three while the enemy turtles (all their units at home) or out-builds
    /// us in home defence, otherwise one.
    pub fn max_portals(&self) -> usize {
        let home = self.enemy.castle.location;
        let reach = self.strategic_radius + self.rules().capabilities.unit.max_speed;
        let turtling = self.enemy.units.iter().all(|unit| unit.location.in_range(home, reach));
        let outbuilt = self.enemy_defensive_portals() > self.mine.portals.len();
        if turtling || outbuilt { 3 } else { 1 }
    }

    pub fn has_portal_advantage(&self) -> bool {
        self.mine.portals.len() > self.enemy.portals.len()
    }

    /// Any enemy unit or lava giant able to strike the friendly castle.
    pub fn castle_under_attack(&self) -> bool {
        let castle = self.mine.castle;
        let units = self.enemy.units.iter().filter(|unit| unit.in_attack_range(castle));
        let giants = self
            .enemy
            .creatures_of(ObjectKind::LAVA_GIANT)
            .filter(|giant| giant.in_attack_range(castle));
        units.count() + giants.count() > 0
    }

    /// Friendly fountains still under construction.
    pub fn fountains_in_progress(&self) -> usize {
        self.mine
            .units
            .iter()
            .filter(|unit| unit.building == Some(StructureKind::ManaFountain))
            .count()
    }

    /// Whether a lava giant released at `location` reaches the enemy castle
    /// before suffocating.
    pub fn can_attack_from(&self, location: Location) -> bool {
        let giant = self.rules().capabilities.lava_giant;
        if giant.max_speed <= 0 {
            return false;
        }

        let castle = self.enemy.castle;
        let boundary = castle.location.towards(location, castle.size() + giant.attack_range);
        let distance = location.distance(boundary);
        let turns = (distance + giant.max_speed - 1) / giant.max_speed;
        turns * giant.suffocation_per_turn < giant.max_health
    }

    // ===== roles =====

    pub fn role_of(&self, unit: &GameObject) -> Role {
        if self.defender == Some(unit.id) {
            Role::Defender
        } else {
            Role::Raider
        }
    }

    // ===== safety =====

    /// [`combat::is_safe_to_hold`] with the configured thresholds.
    pub fn is_safe_to_hold(&self, unit: &GameObject, turns: i32, exceptions: &[EntityId]) -> bool {
        combat::is_safe_to_hold(&self.threats, unit, turns, exceptions, &self.config.engagement)
    }

    pub fn should_engage(&self, unit: &GameObject, target: &GameObject) -> bool {
        combat::should_engage(&self.threats, unit, target, &self.config.engagement)
    }

    // ===== build sites =====

    /// Recomputes every friendly unit's build sites.
    pub fn refresh_sites(&mut self) {
        let mut cache = SiteCache::default();
        for unit in &self.mine.units {
            cache.insert(unit.id, self.plan_sites(unit));
        }
        tracing::debug!("Planned build sites for {} units", cache.len());
        self.sites = cache;
    }

    pub fn site_plan(&self, unit: EntityId) -> SitePlan {
        self.sites.plan(unit)
    }

    fn plan_sites(&self, unit: &GameObject) -> SitePlan {
        let spread: Vec<&GameObject> = self.mine.buildings().collect();
        let search = |structure, castle: &GameObject| {
            let size = self.rules().capabilities(ObjectKind::Structure(structure)).size;
            SiteSearch {
                structure,
                center: castle.location,
                min_radius: castle.size() + size + self.config.site_search_margin,
                max_radius: self.strategic_radius,
                step: self.config.site_search_step,
            }
        };

        let fountain = search(StructureKind::ManaFountain, self.mine.castle);
        let defensive = search(StructureKind::Portal, self.mine.castle);
        let attacking = search(StructureKind::Portal, self.enemy.castle);

        SitePlan {
            fountain: site::best_build_site(self.world, unit, &fountain, &spread),
            defensive_portal: site::best_build_site(self.world, unit, &defensive, &spread),
            attacking_portal: site::best_build_site(self.world, unit, &attacking, &spread),
        }
    }
}

/// The friendly unit nearest home keeps the economy going. A lone unit only
/// takes the job while it is closer to home than to the enemy.
fn pick_defender(mine: &Roster<'_>, enemy_castle: &GameObject) -> Option<EntityId> {
    let home = mine.castle.location;
    match mine.units.as_slice() {
        [] => None,
        [only] => (only.distance(home) < only.distance(enemy_castle.location)).then_some(only.id),
        units => units
            .iter()
            .min_by_key(|unit| (unit.distance(home), unit.id))
            .map(|unit| unit.id),
    }
}
