/// Strategy thresholds used by the tactical engine.
///
/// Values are tuning parameters rather than rules of the game; every field
/// can be overridden from a TOML file and omitted fields keep their default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    /// Fraction of the castle-to-castle distance used as strategic radius
    /// around either castle.
    pub distance_ratio: f64,
    /// Outer radius of the neutral zone around the friendly castle.
    pub neutral_radius: i32,
    /// Mana above twice this value lifts the per-zone structure caps.
    pub excess_mana: i32,
    pub max_defensive_portals: usize,
    pub max_neutral_portals: usize,
    pub max_attacking_portals: usize,
    pub max_fountains_without_portals: usize,
    pub max_fountains_with_portals: usize,
    /// Longest savings plan (in turns) a unit may commit to.
    pub max_saving_turns: i32,
    /// Radius step between concentric candidate rings in the site search.
    pub site_search_step: i32,
    /// Clearance added to castle and structure footprints for the first ring.
    pub site_search_margin: i32,
    pub engagement: EngagementThresholds,
    /// Allows the resource rush mission against enemy fountains.
    pub rush_fountains: bool,
}

impl TacticsConfig {
    pub const DEFAULT_DISTANCE_RATIO: f64 = 0.261781;
    pub const DEFAULT_NEUTRAL_RADIUS: i32 = 4000;
    pub const DEFAULT_EXCESS_MANA: i32 = 200;
    pub const DEFAULT_MAX_SAVING_TURNS: i32 = 10;
    pub const DEFAULT_SITE_SEARCH_STEP: i32 = 200;
    pub const DEFAULT_SITE_SEARCH_MARGIN: i32 = 10;

    pub fn new() -> Self {
        Self {
            distance_ratio: Self::DEFAULT_DISTANCE_RATIO,
            neutral_radius: Self::DEFAULT_NEUTRAL_RADIUS,
            excess_mana: Self::DEFAULT_EXCESS_MANA,
            max_defensive_portals: 1,
            max_neutral_portals: 0,
            max_attacking_portals: 2,
            max_fountains_without_portals: 2,
            max_fountains_with_portals: 3,
            max_saving_turns: Self::DEFAULT_MAX_SAVING_TURNS,
            site_search_step: Self::DEFAULT_SITE_SEARCH_STEP,
            site_search_margin: Self::DEFAULT_SITE_SEARCH_MARGIN,
            engagement: EngagementThresholds::default(),
            rush_fountains: false,
        }
    }

    /// Strategic radius for a given castle-to-castle distance.
    pub fn strategic_radius(&self, castle_distance: i32) -> i32 {
        (f64::from(castle_distance) * self.distance_ratio).ceil() as i32
    }

    /// Fountain cap; one more fountain is allowed once a portal exists.
    pub fn max_fountains(&self, has_portals: bool) -> usize {
        if has_portals {
            self.max_fountains_with_portals
        } else {
            self.max_fountains_without_portals
        }
    }
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fight-or-flight tie-break rules for combat projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngagementThresholds {
    /// Holding a position is safe while projected damage stays at or below
    /// this percentage of max health.
    pub hold_damage_percent: i32,
    /// Engaging is approved while projected health stays at or above this
    /// percentage of max health.
    pub engage_health_percent: i32,
    /// Against another unit, any projected health at or above this value
    /// approves the duel.
    pub duel_min_health: i32,
    /// When both sides need the same number of ticks, the attacker wins if
    /// the defender cannot strike back.
    pub attacker_wins_uncontested_ties: bool,
}

impl EngagementThresholds {
    /// `percent` of `max_health`, rounded down.
    pub fn portion(max_health: i32, percent: i32) -> i32 {
        max_health * percent / 100
    }
}

impl Default for EngagementThresholds {
    fn default() -> Self {
        Self {
            hold_damage_percent: 50,
            engage_health_percent: 50,
            duel_min_health: 0,
            attacker_wins_uncontested_ties: true,
        }
    }
}
