//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::RoverConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, `<root_dir>/rover.toml` and environment.
    pub fn load(root_dir: &Path) -> Result<RoverConfig, ConfigError> {
        MergeService::load(root_dir, None)
    }

    /// Load configuration with an explicit file layered above the workspace file.
    pub fn load_with_file(root_dir: &Path, path: &Path) -> Result<RoverConfig, ConfigError> {
        MergeService::load(root_dir, Some(path))
    }
}
