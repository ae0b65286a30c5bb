//! API error taxonomy and HTTP mapping.
//!
//! Response bodies use a `detail` key and the service's Arabic
//! client-facing strings. Provider failures are logged in full server-side
//! and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use mechbot_providers::ProviderError;

/// Client-facing detail strings.
pub const DETAIL_SESSION_NOT_FOUND: &str = "الجلسة غير موجودة";
pub const DETAIL_INVALID_INPUT: &str = "مدخلات غير صحيحة";
pub const DETAIL_INTERNAL: &str = "خطأ داخلي في الخادم";

/// Errors a request handler can surface.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The referenced session id was never issued or was deleted.
    #[error("session not found")]
    SessionNotFound,

    /// Malformed request body.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The completion provider call failed.
    #[error("provider call failed: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::SessionNotFound => (StatusCode::NOT_FOUND, DETAIL_SESSION_NOT_FOUND),
            ApiError::InvalidInput(reason) => {
                tracing::warn!(reason = %reason, "rejected request input");
                (StatusCode::BAD_REQUEST, DETAIL_INVALID_INPUT)
            }
            ApiError::Provider(e) => {
                tracing::error!(error = %e, "provider call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, DETAIL_INTERNAL)
            }
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
