//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use game_core::{GameRules, TacticsConfig};

use crate::loaders::{ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads engine data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── tactics.toml
/// ├── rules.toml
/// └── scenarios/
///     ├── opening.ron
///     └── portal_rush.ron
/// ```
///
/// Missing `tactics.toml` / `rules.toml` fall back to defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load strategy tuning from `tactics.toml`, or defaults if absent.
    pub fn load_tactics(&self) -> LoadResult<TacticsConfig> {
        let path = self.data_dir.join("tactics.toml");
        if !path.exists() {
            return Ok(TacticsConfig::default());
        }
        ConfigLoader::load_tactics(&path)
    }

    /// Load match rules from `rules.toml`, or defaults if absent.
    pub fn load_rules(&self) -> LoadResult<GameRules> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            return Ok(GameRules::default());
        }
        ConfigLoader::load_rules(&path)
    }

    /// Load `scenarios/{name}.ron` with this directory's rules.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        let rules = self.load_rules()?;
        ScenarioLoader::load_with_rules(&path, Some(rules))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_tactics().unwrap(), TacticsConfig::default());
        assert_eq!(factory.load_rules().unwrap(), GameRules::default());
        assert!(factory.load_scenario("absent").is_err());
    }

    #[test]
    fn scenario_uses_directory_rules() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rules.toml"), "[capabilities.castle]\nmax_health = 99\nsize = 400\n")
            .unwrap();
        std::fs::create_dir(dir.path().join("scenarios")).unwrap();
        std::fs::write(
            dir.path().join("scenarios").join("duel.ron"),
            r#"(turns: [(bounds: (1000, 1000), objects: [
                (id: 0, kind: Structure(Castle), side: Mine, at: (500, 100)),
                (id: 1, kind: Structure(Castle), side: Enemy, at: (500, 900)),
            ])])"#,
        )
        .unwrap();

        let scenario = ContentFactory::new(dir.path()).load_scenario("duel").unwrap();
        assert_eq!(scenario.name, "duel");
        assert_eq!(scenario.turns[0].objects[0].max_health(), 99);
    }
}
