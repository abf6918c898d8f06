// src/provider/google.rs — Google Generative AI (Gemini) completion client

use async_trait::async_trait;
use std::time::Duration;

use super::CompletionService;
use crate::infra::config::ProviderConfig;
use crate::infra::errors::{CompletionError, SynapseError};

const PROVIDER: &str = "google";

/// Models the service is tuned for. Other ids are passed through untouched.
pub const KNOWN_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-2.0-flash-lite", "gemini-2.5-flash"];

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport {
                provider: PROVIDER.into(),
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Build a client from config, reading the API key from the environment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, SynapseError> {
        let api_key = config.api_key()?;
        if !KNOWN_MODELS.contains(&config.model.as_str()) {
            tracing::warn!(model = %config.model, "Unrecognized Gemini model id, using as-is");
        }
        Ok(Self::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

/// Single-turn `generateContent` request body.
pub fn build_request_body(prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            { "parts": [{ "text": prompt }] }
        ]
    })
}

/// Text of the first part of the first candidate, or "" when the response
/// carries none (e.g. a safety block).
pub fn extract_text(resp: &serde_json::Value) -> String {
    resp["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl CompletionService for GeminiClient {
    fn id(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .json(&build_request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                // reqwest errors can embed the URL, and the URL carries the key.
                let message = e.without_url().to_string();
                tracing::error!(model = %self.model, "Gemini request failed: {message}");
                CompletionError::Transport {
                    provider: PROVIDER.into(),
                    message,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(model = %self.model, status = status.as_u16(), "Gemini API error: {body}");
            return Err(CompletionError::Status {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                body,
            });
        }

        let resp: serde_json::Value = response.json().await.map_err(|e| {
            let message = e.without_url().to_string();
            tracing::error!(model = %self.model, "Gemini response unreadable: {message}");
            CompletionError::Payload {
                provider: PROVIDER.into(),
                message: format!("Failed to parse response: {message}"),
            }
        })?;

        let text = extract_text(&resp);
        tracing::debug!(model = %self.model, chars = text.len(), "Gemini completion received");
        Ok(text)
    }
}
