//! Completion provider trait — the seam between the HTTP layer and the
//! hosted model API, so route tests can substitute a stub.

use async_trait::async_trait;

use mechbot_core::types::Message;

use crate::error::ProviderError;

/// Generation parameters, fixed when the provider is constructed.
///
/// Per-request overrides are deliberately not supported — every turn of
/// every session runs with the same model and sampling settings.
#[derive(Clone, Debug)]
pub struct GenerationParams {
    /// Completion model identifier.
    pub model: String,
    /// Maximum tokens to generate per reply.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: "llama3-8b-8192".to_string(),
            max_tokens: 400,
            temperature: 0.2,
        }
    }
}

/// Trait implemented by completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the full ordered transcript and return the reply text.
    ///
    /// Blocks until the provider answers or the request fails; errors
    /// surface directly, with no retries.
    async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
