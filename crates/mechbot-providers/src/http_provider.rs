//! HTTP adapter for OpenAI-compatible chat completion APIs.
//!
//! Talks to any `/chat/completions` endpoint via `reqwest`; the default
//! base URL targets Groq. One request per turn, no streaming, no retries.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use mechbot_core::config::ProviderConfig;
use mechbot_core::types::{ChatCompletionRequest, ChatCompletionResponse, Message};

use crate::error::ProviderError;
use crate::traits::{CompletionProvider, GenerationParams};

/// Default API base when none is configured.
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Upper bound on a single provider call, so a hung upstream cannot park a
/// request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ─────────────────────────────────────────────
// HttpProvider
// ─────────────────────────────────────────────

/// A completion provider that talks to an OpenAI-compatible HTTP API.
pub struct HttpProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.groq.com/openai/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Generation parameters, fixed for the process lifetime.
    params: GenerationParams,
}

impl std::fmt::Debug for HttpProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProvider")
            .field("api_base", &self.api_base)
            .field("model", &self.params.model)
            .finish()
    }
}

impl HttpProvider {
    /// Create a provider.
    ///
    /// Fails with [`ProviderError::MissingApiKey`] when no credential is
    /// given — callers treat this as fatal at startup.
    pub fn new(
        api_key: impl Into<String>,
        api_base: Option<String>,
        params: GenerationParams,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(HttpProvider {
            client,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key,
            params,
        })
    }

    /// Build a provider from the `provider` section of the service config.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::new(
            config.api_key.clone(),
            config.api_base.clone(),
            GenerationParams {
                model: config.model.clone(),
                max_tokens: config.max_tokens,
                temperature: config.temperature,
            },
        )
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl CompletionProvider for HttpProvider {
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        debug!(
            model = %self.params.model,
            messages = messages.len(),
            "calling completion API"
        );

        let request_body = ChatCompletionRequest {
            model: self.params.model.clone(),
            messages: messages.to_vec(),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            error!(%status, body = %body, "completion API error");
            return Err(ProviderError::Api { status, body });
        }

        let parsed: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion received"
            );
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }

    fn model(&self) -> &str {
        &self.params.model
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
