//! Core TOML config loading: read from path or platform default.

use crate::schema::EasydietConfig;
use crate::validation;
use easydiet_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields,
/// then validates. Validation failures are hard errors here: the key
/// pool must be usable before the first request is served.
pub fn load_from_path(path: &Path) -> Result<EasydietConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: EasydietConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/easydiet/config.toml`
/// On Linux: `~/.config/easydiet/config.toml`
///
/// If the file does not exist, a commented template is written there
/// and a `ValidationError` is returned: the template ships with an
/// empty key pool, which is unusable until the operator fills it in.
pub fn load_default() -> Result<EasydietConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::ParseError(msg)) if msg.contains("failed to read") => {
            info!("no config found at {}, creating template", path.display());
            create_default_config(&path)?;
            Err(ConfigError::ValidationError(format!(
                "created config template at {}; add at least one entry to ai.api_keys",
                path.display()
            )))
        }
        Err(e) => Err(e),
    }
}
