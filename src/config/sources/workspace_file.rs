//! Workspace config file source: <root_dir>/rover.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "rover.toml";

/// Add `<root_dir>/rover.toml` when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    root_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = root_dir.join(WORKSPACE_CONFIG_FILE);
    Ok(builder.add_source(File::from(path).required(false)))
}
