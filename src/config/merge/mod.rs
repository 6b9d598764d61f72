//! Source merging for configuration.

pub mod service;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Empty builder; struct-level `#[serde(default)]` supplies every default.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(config::Config::builder())
}
