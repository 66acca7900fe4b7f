//! Game constants supplied by the external simulation.
//!
//! The simulation publishes these values with every match; the bot never
//! changes them. Defaults mirror the standard ruleset so tests and replays
//! can run without a rules file.

use crate::state::{Capabilities, CreatureKind, ObjectKind, StructureKind};

/// Spells a unit can cast on itself.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpellKind {
    SpeedUp,
    Invisibility,
}

/// Anything that costs mana.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Creatable {
    Structure(StructureKind),
    Creature(CreatureKind),
    Spell(SpellKind),
}

impl From<StructureKind> for Creatable {
    fn from(kind: StructureKind) -> Self {
        Creatable::Structure(kind)
    }
}

impl From<CreatureKind> for Creatable {
    fn from(kind: CreatureKind) -> Self {
        Creatable::Creature(kind)
    }
}

impl From<SpellKind> for Creatable {
    fn from(kind: SpellKind) -> Self {
        Creatable::Spell(kind)
    }
}

/// Mana price list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostTable {
    pub portal: i32,
    pub mana_fountain: i32,
    pub ice_troll: i32,
    pub lava_giant: i32,
    pub tornado: i32,
    pub speed_up: i32,
    pub invisibility: i32,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            portal: 90,
            mana_fountain: 120,
            ice_troll: 100,
            lava_giant: 55,
            tornado: 150,
            speed_up: 40,
            invisibility: 40,
        }
    }
}

/// Default stats per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CapabilityTable {
    pub unit: Capabilities,
    pub ice_troll: Capabilities,
    pub lava_giant: Capabilities,
    pub tornado: Capabilities,
    pub portal: Capabilities,
    pub mana_fountain: Capabilities,
    pub castle: Capabilities,
}

impl CapabilityTable {
    pub fn get(&self, kind: ObjectKind) -> Capabilities {
        match kind {
            ObjectKind::Unit => self.unit,
            ObjectKind::Creature(CreatureKind::IceTroll) => self.ice_troll,
            ObjectKind::Creature(CreatureKind::LavaGiant) => self.lava_giant,
            ObjectKind::Creature(CreatureKind::Tornado) => self.tornado,
            ObjectKind::Structure(StructureKind::Portal) => self.portal,
            ObjectKind::Structure(StructureKind::ManaFountain) => self.mana_fountain,
            ObjectKind::Structure(StructureKind::Castle) => self.castle,
        }
    }
}

impl Default for CapabilityTable {
    fn default() -> Self {
        let mobile = |max_health, attack_range, attack_multiplier, max_speed, suffocation_per_turn| {
            Capabilities {
                max_health,
                attack_range,
                attack_multiplier,
                max_speed,
                suffocation_per_turn,
                size: 0,
            }
        };
        let building = |max_health, size| Capabilities {
            max_health,
            size,
            ..Capabilities::default()
        };

        Self {
            unit: mobile(15, 200, 1, 100, 0),
            ice_troll: mobile(30, 50, 1, 50, 1),
            lava_giant: mobile(40, 200, 3, 100, 2),
            tornado: mobile(30, 150, 1, 100, 1),
            portal: building(20, 300),
            mana_fountain: building(20, 300),
            castle: building(80, 400),
        }
    }
}

/// Build, summon and spell durations in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Durations {
    pub portal_building: i32,
    pub fountain_building: i32,
    pub ice_troll_summoning: i32,
    pub lava_giant_summoning: i32,
    pub tornado_summoning: i32,
    pub speed_up_expiration: i32,
    pub invisibility_expiration: i32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            portal_building: 15,
            fountain_building: 15,
            ice_troll_summoning: 5,
            lava_giant_summoning: 3,
            tornado_summoning: 5,
            speed_up_expiration: 5,
            invisibility_expiration: 5,
        }
    }
}

/// Complete set of match constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameRules {
    pub costs: CostTable,
    pub capabilities: CapabilityTable,
    pub durations: Durations,
    pub speed_up_multiplier: i32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            costs: CostTable::default(),
            capabilities: CapabilityTable::default(),
            durations: Durations::default(),
            speed_up_multiplier: 2,
        }
    }
}

impl GameRules {
    pub fn cost(&self, item: impl Into<Creatable>) -> i32 {
        let costs = &self.costs;
        match item.into() {
            Creatable::Structure(StructureKind::Portal) => costs.portal,
            Creatable::Structure(StructureKind::ManaFountain) => costs.mana_fountain,
            // castles are never bought
            Creatable::Structure(StructureKind::Castle) => 0,
            Creatable::Creature(CreatureKind::IceTroll) => costs.ice_troll,
            Creatable::Creature(CreatureKind::LavaGiant) => costs.lava_giant,
            Creatable::Creature(CreatureKind::Tornado) => costs.tornado,
            Creatable::Spell(SpellKind::SpeedUp) => costs.speed_up,
            Creatable::Spell(SpellKind::Invisibility) => costs.invisibility,
        }
    }

    pub fn capabilities(&self, kind: ObjectKind) -> Capabilities {
        self.capabilities.get(kind)
    }

    pub fn building_duration(&self, structure: StructureKind) -> i32 {
        match structure {
            StructureKind::Portal => self.durations.portal_building,
            StructureKind::ManaFountain => self.durations.fountain_building,
            StructureKind::Castle => 0,
        }
    }

    pub fn summoning_duration(&self, creature: CreatureKind) -> i32 {
        match creature {
            CreatureKind::IceTroll => self.durations.ice_troll_summoning,
            CreatureKind::LavaGiant => self.durations.lava_giant_summoning,
            CreatureKind::Tornado => self.durations.tornado_summoning,
        }
    }

    /// Distance a sped-up unit covers before the spell wears off.
    pub fn speed_up_reach(&self, base_speed: i32) -> i32 {
        self.speed_up_multiplier * base_speed * self.durations.speed_up_expiration
    }
}
