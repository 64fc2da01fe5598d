//! Config path resolution and default file creation.

use easydiet_common::ConfigError;
use std::path::Path;
use tracing::info;

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("easydiet").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = default_config_toml();

    std::fs::write(path, content).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

fn default_config_toml() -> &'static str {
    r#"# EasyDiet backend configuration.
# Only override what you want to change; missing fields use defaults.

[ai]
# Ordered pool of Gemini API keys. Requests rotate across the pool and
# fail over when a key is rate-limited or rejected. At least one key
# is required.
api_keys = []
model = "gemini-2.5-flash"
max_output_tokens = 4096
temperature = 0.7

[history]
# Newest user+model pairs kept per conversation for model context.
max_turn_pairs = 30
"#
}
