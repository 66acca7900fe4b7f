//! Rules and tactics configuration loader.

use std::path::Path;

use game_core::{GameRules, TacticsConfig};

use crate::loaders::{LoadResult, read_file};

/// Loader for TOML configuration files.
///
/// Both file kinds are partial: any field left out keeps its default value.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load strategy tuning from a TOML file.
    pub fn load_tactics(path: &Path) -> LoadResult<TacticsConfig> {
        let content = read_file(path)?;
        Self::parse_tactics(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Load match rules from a TOML file.
    pub fn load_rules(path: &Path) -> LoadResult<GameRules> {
        let content = read_file(path)?;
        Self::parse_rules(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse_tactics(content: &str) -> LoadResult<TacticsConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse tactics TOML: {}", e))
    }

    pub fn parse_rules(content: &str) -> LoadResult<GameRules> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))
    }

    /// Render a tactics configuration back to TOML.
    pub fn tactics_to_toml(config: &TacticsConfig) -> LoadResult<String> {
        toml::to_string_pretty(config)
            .map_err(|e| anyhow::anyhow!("Failed to serialize tactics config: {}", e))
    }

    pub fn rules_to_toml(rules: &GameRules) -> LoadResult<String> {
        toml::to_string_pretty(rules)
            .map_err(|e| anyhow::anyhow!("Failed to serialize rules: {}", e))
    }
}
