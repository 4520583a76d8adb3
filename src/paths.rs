//! Config directory resolution.

use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "ALIASDECK_CONFIG_DIR";

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "aliasdeck";

/// File name of the persisted alias store
pub const ALIASES_FILE: &str = "aliases.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Resolve the directory holding the alias file.
///
/// `ALIASDECK_CONFIG_DIR` wins when set and non-empty; otherwise the platform
/// config directory (e.g. `~/.config/aliasdeck`) is used.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(PathError::NoConfigDir)
}

#[cfg(test)]
#[path = "paths_test.rs"]
mod tests;
