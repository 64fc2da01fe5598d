//! Configuration for the EasyDiet backend.
//!
//! TOML-based with serde defaults, so a partial config file works and
//! an absent one falls back to defaults. The one hard requirement is
//! the Gemini key pool: an empty `ai.api_keys` is a fatal startup
//! error, not something to discover per-request.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AiConfig, EasydietConfig, HistoryConfig};
pub use toml_loader::{default_config_path, load_default, load_from_path};
pub use validation::validate;
