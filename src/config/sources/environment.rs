//! Environment variable source: ROVER__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses ROVER prefix and __ as separator for nested keys, e.g. `ROVER__SERVER__PORT`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("ROVER")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
