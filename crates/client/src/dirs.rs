//! Platform-specific directories.

use std::path::PathBuf;

/// Default log directory for the replay client.
///
/// - macOS: `~/Library/Caches/skirmish/logs`
/// - Linux: `~/.cache/skirmish/logs` (or `$XDG_CACHE_HOME/skirmish/logs`)
/// - Windows: `%LOCALAPPDATA%\skirmish\cache\logs`
/// - Fallback: `<tmp>/skirmish/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "skirmish")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("skirmish"))
        .join("logs")
}
