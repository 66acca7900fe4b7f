//! Build-site search.
//!
//! Candidate sites are the union of sampled rings around a reference
//! structure (a castle), filtered by the simulation's placement rules and
//! ranked so that units prefer sites they can reach this turn, then sites
//! far from their other structures, then sites close to the reference.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use game_core::{EntityId, GameObject, Location, StructureKind, WorldSnapshot};

use super::sampler::ring_points;

/// Where to look for one kind of structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SiteSearch {
    pub structure: StructureKind,
    pub center: Location,
    pub min_radius: i32,
    pub max_radius: i32,
    pub step: i32,
}

impl SiteSearch {
    /// Candidate locations before placement checks.
    pub fn candidates(&self, world: &dyn WorldSnapshot) -> BTreeSet<Location> {
        let step = self.step.max(1);
        let mut pool = BTreeSet::new();
        let mut radius = self.min_radius.max(0);
        while radius <= self.max_radius {
            pool.extend(ring_points(self.center, radius, world.bounds()));
            radius += step;
        }
        pool
    }
}

/// Best buildable site for `unit`, or `None` when the search area has none.
///
/// `spread_from` are the structures new ones should keep away from.
pub fn best_build_site(
    world: &dyn WorldSnapshot,
    unit: &GameObject,
    search: &SiteSearch,
    spread_from: &[&GameObject],
) -> Option<Location> {
    let speed = unit.max_speed();

    search
        .candidates(world)
        .into_iter()
        .filter(|location| world.can_build_at(*location, search.structure))
        .min_by_key(|location| {
            let out_of_reach = unit.distance(*location) > speed;
            let spread: i64 = spread_from
                .iter()
                .map(|structure| i64::from(structure.distance(*location)))
                .sum();
            (out_of_reach, Reverse(spread), location.distance(search.center))
        })
}

/// Sites chosen for one unit this turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SitePlan {
    pub fountain: Option<Location>,
    pub defensive_portal: Option<Location>,
    pub attacking_portal: Option<Location>,
}

/// Per-unit sites, recomputed wholesale at the start of each turn.
#[derive(Clone, Debug, Default)]
pub struct SiteCache {
    plans: HashMap<EntityId, SitePlan>,
}

impl SiteCache {
    pub fn insert(&mut self, unit: EntityId, plan: SitePlan) {
        self.plans.insert(unit, plan);
    }

    /// Sites for `unit`; units that were never planned get an empty plan.
    pub fn plan(&self, unit: EntityId) -> SitePlan {
        self.plans.get(&unit).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
