//! MergeService: orchestrates sources, applies merge policy, deserializes to RoverConfig.

use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::RoverConfig;
use config::{ConfigError, File};
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: global file (lowest) -> workspace file -> explicit file -> environment (highest).
    pub fn load(root_dir: &Path, explicit: Option<&Path>) -> Result<RoverConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, root_dir)?;
        let builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
