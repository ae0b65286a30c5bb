//! Completion provider layer for Mechbot.
//!
//! # Architecture
//!
//! - [`traits::CompletionProvider`] — trait the HTTP layer depends on
//! - [`http_provider::HttpProvider`] — OpenAI-compatible HTTP client
//!   (Groq by default)
//! - [`error::ProviderError`] — the failure taxonomy surfaced to callers

pub mod error;
pub mod http_provider;
pub mod traits;

// Re-export main types for convenience
pub use error::ProviderError;
pub use http_provider::HttpProvider;
pub use traits::{CompletionProvider, GenerationParams};
