//! Provider failure taxonomy.

use thiserror::Error;

/// Errors surfaced by a completion provider call.
///
/// There is no retry logic anywhere: a single failed call propagates to
/// the HTTP layer, where it maps to a 500.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure: connect, TLS, timeout, or an unreadable body.
    #[error("request to completion API failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status (rate limit, bad
    /// credentials, provider outage).
    #[error("completion API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The API answered 200 but carried no usable reply text.
    #[error("completion API returned no reply content")]
    EmptyResponse,

    /// No credential configured. The service cannot function without one,
    /// so construction fails and startup aborts.
    #[error("no API key configured for the completion provider")]
    MissingApiKey,
}
