//! Configuration schema types for EasyDiet.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Root configuration for the EasyDiet backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EasydietConfig {
    pub ai: AiConfig,
    pub history: HistoryConfig,
}

/// Upstream Gemini settings, including the rotating key pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Ordered pool of API keys. Rotation walks this list with a
    /// wrapping cursor; the list is fixed for the process lifetime.
    pub api_keys: Vec<String>,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            model: "gemini-2.5-flash".to_string(),
            max_output_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Conversation history retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Retention bound in user+model pairs; the window keeps at most
    /// `2 * max_turn_pairs` turns per conversation.
    pub max_turn_pairs: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_turn_pairs: 30 }
    }
}
