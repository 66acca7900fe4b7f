//! Client configuration from the process environment.
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use game_content::ConfigLoader;
use game_core::{GameRules, TacticsConfig};

use crate::dirs;

/// Where the client finds its tuning files and writes its logs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub tactics_path: Option<PathBuf>,
    pub rules_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_CONFIG` - Tactics tuning TOML (default: built-in tuning)
    /// - `SKIRMISH_RULES` - Match rules TOML (default: scenario rules, then built-in)
    /// - `SKIRMISH_LOG_DIR` - Log directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self {
            tactics_path: read_path("SKIRMISH_CONFIG"),
            rules_path: read_path("SKIRMISH_RULES"),
            log_dir: read_path("SKIRMISH_LOG_DIR"),
        }
    }

    /// Command-line paths win over the environment.
    #[must_use]
    pub fn with_overrides(mut self, tactics: Option<PathBuf>, rules: Option<PathBuf>) -> Self {
        if tactics.is_some() {
            self.tactics_path = tactics;
        }
        if rules.is_some() {
            self.rules_path = rules;
        }
        self
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(dirs::log_dir)
    }

    pub fn load_tactics(&self) -> Result<TacticsConfig> {
        match &self.tactics_path {
            Some(path) => load_logged(path, ConfigLoader::load_tactics),
            None => Ok(TacticsConfig::default()),
        }
    }

    /// Rules from `rules_path`, or `None` to let the scenario decide.
    pub fn load_rules(&self) -> Result<Option<GameRules>> {
        self.rules_path
            .as_deref()
            .map(|path| load_logged(path, ConfigLoader::load_rules))
            .transpose()
    }
}

fn load_logged<T>(path: &Path, load: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
    let value = load(path)?;
    tracing::info!("Loaded {}", path.display());
    Ok(value)
}

fn read_path(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_given_paths() {
        let config = ClientConfig {
            tactics_path: Some("env.toml".into()),
            rules_path: Some("env_rules.toml".into()),
            log_dir: None,
        }
        .with_overrides(Some("cli.toml".into()), None);

        assert_eq!(config.tactics_path, Some(PathBuf::from("cli.toml")));
        assert_eq!(config.rules_path, Some(PathBuf::from("env_rules.toml")));
    }

    #[test]
    fn missing_paths_mean_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.load_tactics().unwrap(), TacticsConfig::default());
        assert_eq!(config.load_rules().unwrap(), None);
    }

    #[test]
    fn tuning_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tactics.toml");
        std::fs::write(&path, "excess_mana = 350\n").unwrap();

        let config = ClientConfig::default().with_overrides(Some(path), None);
        assert_eq!(config.load_tactics().unwrap().excess_mana, 350);
    }

    #[test]
    fn unreadable_rules_are_an_error() {
        let config = ClientConfig::default().with_overrides(None, Some("/nonexistent/rules.toml".into()));
        assert!(config.load_rules().is_err());
    }
}
