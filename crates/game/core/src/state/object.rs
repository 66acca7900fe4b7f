//! Live objects exposed by a world snapshot.
//!
//! Every object is described by a closed [`ObjectKind`] instead of runtime
//! type tests. Per-kind behaviour (what a kind may attack, whether it
//! threatens units, how attractive it is as a target) comes from
//! [`ObjectKind::profile`]; numeric stats travel with each object in
//! [`Capabilities`] and default from the rules' capability table.

use bitflags::bitflags;

use super::common::{EntityId, Location, Side};

// ============================================================================
// Kinds
// ============================================================================

/// Summonable creature kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CreatureKind {
    /// Melee guard; locks onto one target and chases it.
    IceTroll,
    /// Siege creature that only attacks castles.
    LavaGiant,
    /// Area creature that only attacks non-castle buildings.
    Tornado,
}

/// Stationary building kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StructureKind {
    /// Produces creatures.
    Portal,
    /// Raises mana income.
    ManaFountain,
    /// Win-condition base.
    Castle,
}

/// Closed sum over everything a snapshot can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    /// A controllable mobile agent (an elf).
    Unit,
    Creature(CreatureKind),
    Structure(StructureKind),
}

impl ObjectKind {
    pub const PORTAL: Self = Self::Structure(StructureKind::Portal);
    pub const FOUNTAIN: Self = Self::Structure(StructureKind::ManaFountain);
    pub const CASTLE: Self = Self::Structure(StructureKind::Castle);
    pub const ICE_TROLL: Self = Self::Creature(CreatureKind::IceTroll);
    pub const LAVA_GIANT: Self = Self::Creature(CreatureKind::LavaGiant);
    pub const TORNADO: Self = Self::Creature(CreatureKind::Tornado);

    /// Target class used when matching against [`TargetMask`].
    pub const fn class(self) -> TargetMask {
        match self {
            ObjectKind::Unit => TargetMask::UNITS,
            ObjectKind::Creature(_) => TargetMask::CREATURES,
            ObjectKind::Structure(StructureKind::Castle) => TargetMask::CASTLE,
            ObjectKind::Structure(_) => TargetMask::BUILDINGS,
        }
    }

    /// Static behaviour table keyed by kind.
    pub const fn profile(self) -> KindProfile {
        match self {
            ObjectKind::Unit => KindProfile {
                attacks: TargetMask::all(),
                threatens_units: true,
                target_priority: Some(0),
                locks_target: false,
            },
            ObjectKind::Creature(CreatureKind::IceTroll) => KindProfile {
                attacks: TargetMask::UNITS.union(TargetMask::CREATURES),
                threatens_units: true,
                target_priority: None,
                locks_target: true,
            },
            ObjectKind::Creature(CreatureKind::LavaGiant) => KindProfile {
                attacks: TargetMask::CASTLE,
                threatens_units: false,
                target_priority: None,
                locks_target: false,
            },
            ObjectKind::Creature(CreatureKind::Tornado) => KindProfile {
                attacks: TargetMask::BUILDINGS,
                threatens_units: false,
                target_priority: Some(2),
                locks_target: true,
            },
            ObjectKind::Structure(StructureKind::Portal) => KindProfile {
                attacks: TargetMask::empty(),
                threatens_units: false,
                target_priority: Some(1),
                locks_target: false,
            },
            ObjectKind::Structure(StructureKind::ManaFountain) => KindProfile {
                attacks: TargetMask::empty(),
                threatens_units: false,
                target_priority: Some(3),
                locks_target: false,
            },
            ObjectKind::Structure(StructureKind::Castle) => KindProfile {
                attacks: TargetMask::empty(),
                threatens_units: false,
                target_priority: Some(4),
                locks_target: false,
            },
        }
    }

    pub const fn is_structure(self) -> bool {
        matches!(self, ObjectKind::Structure(_))
    }
}

bitflags! {
    /// Classes of objects a kind is able to attack.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TargetMask: u8 {
        const UNITS     = 1 << 0;
        const CREATURES = 1 << 1;
        const BUILDINGS = 1 << 2;
        const CASTLE    = 1 << 3;
    }
}

bitflags! {
    /// Active spell effects on a unit.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusEffects: u8 {
        const SPEED_UP     = 1 << 0;
        const INVISIBILITY = 1 << 1;
    }
}

/// Behavioural traits of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindProfile {
    /// Which target classes this kind can strike.
    pub attacks: TargetMask,
    /// Whether this kind is considered by one-tick threat prediction.
    pub threatens_units: bool,
    /// Rank when chosen as an attack target (lower first); `None` means the
    /// kind is never picked as a direct attack target.
    pub target_priority: Option<u8>,
    /// Commits to one target and ignores everything else.
    pub locks_target: bool,
}

// ============================================================================
// Capabilities
// ============================================================================

/// Numeric combat and movement stats.
///
/// Kinds without a capability carry zero for it (structures have no attack
/// range, units have no suffocation), so queries never fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Capabilities {
    pub max_health: i32,
    pub attack_range: i32,
    pub attack_multiplier: i32,
    pub max_speed: i32,
    pub suffocation_per_turn: i32,
    /// Footprint radius; zero for mobile objects.
    pub size: i32,
}

// ============================================================================
// GameObject
// ============================================================================

/// Read-only view of one live object for the current turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameObject {
    pub id: EntityId,
    pub kind: ObjectKind,
    pub side: Side,
    pub location: Location,
    pub current_health: i32,
    pub stats: Capabilities,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: StatusEffects,
    /// Structure a unit is currently constructing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub building: Option<StructureKind>,
    /// Target an ice troll or tornado has locked onto.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<EntityId>,
    /// Creature a portal is currently summoning.
    #[cfg_attr(feature = "serde", serde(default))]
    pub summoning: Option<CreatureKind>,
}

impl GameObject {
    /// Creates an object at full health.
    pub fn new(id: EntityId, kind: ObjectKind, side: Side, location: Location, stats: Capabilities) -> Self {
        Self {
            id,
            kind,
            side,
            location,
            current_health: stats.max_health,
            stats,
            effects: StatusEffects::empty(),
            building: None,
            target: None,
            summoning: None,
        }
    }

    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.current_health = health;
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: StatusEffects) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_building(mut self, structure: StructureKind) -> Self {
        self.building = Some(structure);
        self
    }

    #[must_use]
    pub fn with_summoning(mut self, creature: CreatureKind) -> Self {
        self.summoning = Some(creature);
        self
    }

    // ===== kind queries =====

    pub fn is_unit(&self) -> bool {
        self.kind == ObjectKind::Unit
    }

    pub fn is_structure(&self) -> bool {
        self.kind.is_structure()
    }

    pub fn is_kind(&self, kind: ObjectKind) -> bool {
        self.kind == kind
    }

    pub fn is_mine(&self) -> bool {
        self.side == Side::Mine
    }

    // ===== stats =====

    pub fn max_health(&self) -> i32 {
        self.stats.max_health
    }

    pub fn attack_range(&self) -> i32 {
        self.stats.attack_range
    }

    pub fn attack_multiplier(&self) -> i32 {
        self.stats.attack_multiplier
    }

    pub fn max_speed(&self) -> i32 {
        self.stats.max_speed
    }

    pub fn suffocation(&self) -> i32 {
        self.stats.suffocation_per_turn
    }

    pub fn size(&self) -> i32 {
        self.stats.size
    }

    // ===== state =====

    pub fn is_building(&self) -> bool {
        self.building.is_some()
    }

    pub fn is_summoning(&self) -> bool {
        self.summoning.is_some()
    }

    pub fn is_sped_up(&self) -> bool {
        self.effects.contains(StatusEffects::SPEED_UP)
    }

    /// True when passive decay alone kills this object before it can act.
    pub fn dies_this_tick(&self) -> bool {
        self.current_health <= self.suffocation()
    }

    /// True when this object's kind is able to strike `other`.
    pub fn can_attack(&self, other: &GameObject) -> bool {
        self.attack_multiplier() > 0 && self.kind.profile().attacks.intersects(other.kind.class())
    }

    // ===== geometry =====

    pub fn distance(&self, location: Location) -> i32 {
        self.location.distance(location)
    }

    /// Returns true if this object can strike `other` from where it stands.
    pub fn in_attack_range(&self, other: &GameObject) -> bool {
        self.location.in_range(other.location, self.attack_range() + other.size())
    }

    /// Point `reach` units in front of `other`, on the segment toward this object.
    ///
    /// Used as the spot a unit must reach to strike `other`.
    pub fn attack_location(&self, other: &GameObject) -> Location {
        other.location.towards(self.location, other.size() + self.attack_range())
    }
}
