//! Scenario loader.
//!
//! A scenario is a recorded (or hand-written) match: a sequence of turn
//! snapshots that the replay client feeds to the engine one by one. Objects
//! are written compactly; stats default from the scenario's rules unless an
//! object overrides them.

use std::path::Path;

use game_core::{
    Capabilities, CreatureKind, EntityId, GameObject, GameRules, Location, MapBounds, ObjectKind,
    Side, StatusEffects, StructureKind, WorldSnapshot, WorldState,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Scenario file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioRon {
    #[serde(default)]
    name: String,
    #[serde(default)]
    rules: Option<GameRules>,
    turns: Vec<TurnRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TurnRon {
    #[serde(default)]
    turn: Option<u32>,
    bounds: (i32, i32), // (rows, cols)
    #[serde(default)]
    mana: i32,
    #[serde(default)]
    mana_per_turn: i32,
    objects: Vec<ObjectRon>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectRon {
    id: u32,
    kind: ObjectKind,
    side: Side,
    at: (i32, i32), // (row, col)
    #[serde(default)]
    health: Option<i32>,
    #[serde(default)]
    stats: Option<Capabilities>,
    #[serde(default)]
    effects: StatusEffects,
    #[serde(default)]
    building: Option<StructureKind>,
    #[serde(default)]
    target: Option<u32>,
    #[serde(default)]
    summoning: Option<CreatureKind>,
}

impl ObjectRon {
    fn into_object(self, rules: &GameRules) -> GameObject {
        let stats = self.stats.unwrap_or_else(|| rules.capabilities(self.kind));
        let mut object = GameObject::new(
            EntityId(self.id),
            self.kind,
            self.side,
            Location::new(self.at.0, self.at.1),
            stats,
        )
        .with_effects(self.effects);

        if let Some(health) = self.health {
            object = object.with_health(health);
        }
        object.building = self.building;
        object.target = self.target.map(EntityId);
        object.summoning = self.summoning;
        object
    }
}

/// A named sequence of turn snapshots.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub turns: Vec<WorldState>,
}

impl Scenario {
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Loader for scenario RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario, using the rules embedded in the file (or defaults).
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        Self::load_with_rules(path, None)
    }

    /// Load a scenario; `rules` takes precedence over rules embedded in the file.
    pub fn load_with_rules(path: &Path, rules: Option<GameRules>) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let mut scenario =
            Self::parse(&content, rules).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(scenario)
    }

    /// Parse scenario text and validate every turn.
    pub fn parse(content: &str, rules: Option<GameRules>) -> LoadResult<Scenario> {
        let data: ScenarioRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let rules = rules.or(data.rules).unwrap_or_default();
        let mut turns = Vec::with_capacity(data.turns.len());

        for (index, turn) in data.turns.into_iter().enumerate() {
            let mut world = WorldState::new(MapBounds::new(turn.bounds.0, turn.bounds.1))
                .with_rules(rules)
                .with_mana(turn.mana, turn.mana_per_turn)
                .with_turn(turn.turn.unwrap_or(index as u32));

            for object in turn.objects {
                world.insert(object.into_object(&rules));
            }

            world
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid snapshot at turn index {}: {}", index, e))?;
            turns.push(world);
        }

        Ok(Scenario { name: data.name, turns })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const TWO_TURNS: &str = r#"(
        name: "opening",
        turns: [
            (
                bounds: (4000, 7000),
                mana: 200,
                mana_per_turn: 5,
                objects: [
                    (id: 0, kind: Structure(Castle), side: Mine, at: (2000, 500)),
                    (id: 1, kind: Structure(Castle), side: Enemy, at: (2000, 6500)),
                    (id: 2, kind: Unit, side: Mine, at: (2000, 1000), health: Some(9)),
                ],
            ),
            (
                turn: Some(7),
                bounds: (4000, 7000),
                objects: [
                    (id: 0, kind: Structure(Castle), side: Mine, at: (2000, 500)),
                    (id: 1, kind: Structure(Castle), side: Enemy, at: (2000, 6500)),
                    (id: 5, kind: Creature(IceTroll), side: Enemy, at: (2000, 1200), target: Some(2)),
                ],
            ),
        ],
    )"#;

    #[test]
    fn parses_turns_with_rule_defaults() {
        let scenario = ScenarioLoader::parse(TWO_TURNS, None).unwrap();

        assert_eq!(scenario.name, "opening");
        assert_eq!(scenario.len(), 2);

        let first = &scenario.turns[0];
        assert_eq!(first.turn(), 0);
        assert_eq!(first.mana(), 200);
        let elf = first.object(EntityId(2)).unwrap();
        assert_eq!(elf.current_health, 9);
        assert_eq!(elf.stats, GameRules::default().capabilities.unit);

        let second = &scenario.turns[1];
        assert_eq!(second.turn(), 7);
        let troll = second.object(EntityId(5)).unwrap();
        assert_eq!(troll.target, Some(EntityId(2)));
        assert_eq!(troll.current_health, troll.max_health());
    }

    #[test]
    fn explicit_rules_override_embedded() {
        let mut rules = GameRules::default();
        rules.capabilities.unit.max_speed = 321;

        let scenario = ScenarioLoader::parse(TWO_TURNS, Some(rules)).unwrap();
        let elf = scenario.turns[0].object(EntityId(2)).unwrap();
        assert_eq!(elf.max_speed(), 321);
        assert_eq!(scenario.turns[0].rules().capabilities.unit.max_speed, 321);
    }

    #[test]
    fn rejects_snapshot_without_castles() {
        let err = ScenarioLoader::parse(
            r#"(turns: [(bounds: (100, 100), objects: [])])"#,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("turn index 0"));
    }

    #[test]
    fn name_falls_back_to_file_stem() {
        let mut file = tempfile::Builder::new().prefix("skirmish").suffix(".ron").tempfile().unwrap();
        write!(
            file,
            r#"(turns: [(bounds: (100, 100), objects: [
                (id: 0, kind: Structure(Castle), side: Mine, at: (50, 10)),
                (id: 1, kind: Structure(Castle), side: Enemy, at: (50, 90)),
            ])])"#
        )
        .unwrap();

        let scenario = ScenarioLoader::load(file.path()).unwrap();
        assert!(scenario.name.starts_with("skirmish"));
    }
}
