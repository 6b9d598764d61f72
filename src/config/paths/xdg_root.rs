//! XDG Base Directory utilities for configuration lookup.

use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`.
/// Returns `None` when neither variable is available.
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Get the global config file path
///
/// Returns `$XDG_CONFIG_HOME/rover/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|dir| dir.join("rover").join("config.toml"))
}
