//! GenerateClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use easydiet_common::Turn;

use crate::{AiError, GenerateClient, ResponseFormat};

use super::client::GeminiClient;

#[async_trait]
impl GenerateClient for GeminiClient {
    async fn generate(
        &self,
        turns: &[Turn],
        system_instruction: &str,
        format: ResponseFormat,
    ) -> Result<String, AiError> {
        let body = self.build_request_body(turns, system_instruction, format);
        let url = self.api_url();

        debug!(model = %self.config.model, turns = turns.len(), "Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout
                } else {
                    AiError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Unauthorized(format!("HTTP {status}: {text}")));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }
}
