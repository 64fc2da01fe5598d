//! Gemini API client struct, request building, and response parsing.

use std::sync::Arc;

use easydiet_common::Turn;
use easydiet_config::AiConfig;

use crate::{AiError, ClientFactory, GenerateClient, ResponseFormat};

use super::config::GeminiConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.config.model)
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(
        &self,
        turns: &[Turn],
        system_instruction: &str,
        format: ResponseFormat,
    ) -> serde_json::Value {
        let contents: Vec<_> = turns
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role.as_str(),
                    "parts": [{ "text": turn.text }]
                })
            })
            .collect();

        serde_json::json!({
            "contents": contents,
            "systemInstruction": {
                "parts": [{ "text": system_instruction }]
            },
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens,
                "temperature": self.config.temperature,
                "responseMimeType": format.mime_type(),
            }
        })
    }

    /// Extract the reply text from a Gemini response.
    ///
    /// Concatenates the text parts of the first candidate. A candidate
    /// with no text parts yields an empty string, which is a valid
    /// (degenerate) success.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<String, AiError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ParseError("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::ParseError("empty candidates".to_string()))?;

        let parts = first["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut content = String::new();
        for part in &parts {
            if let Some(text) = part["text"].as_str() {
                content.push_str(text);
            }
        }

        Ok(content)
    }
}

/// Builds a `GeminiClient` per pool key, sharing one HTTP connection
/// pool across all of them.
pub struct GeminiFactory {
    config: AiConfig,
    http: reqwest::Client,
}

impl GeminiFactory {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

impl ClientFactory for GeminiFactory {
    fn for_key(&self, api_key: &str) -> Arc<dyn GenerateClient> {
        Arc::new(GeminiClient {
            config: GeminiConfig::from_ai_config(&self.config, api_key),
            http: self.http.clone(),
        })
    }
}
