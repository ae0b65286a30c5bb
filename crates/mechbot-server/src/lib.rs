//! HTTP endpoint layer for Mechbot — axum routes over the session store
//! and the completion provider.
//!
//! # Architecture
//!
//! - [`state::AppState`] — store + provider, shared across handlers
//! - [`routes`] — the five-endpoint surface + router builder
//! - [`chat`] — one chat turn, with per-session linearization
//! - [`error::ApiError`] — HTTP error mapping
//! - [`sweeper`] — background removal of idle sessions

pub mod chat;
pub mod error;
pub mod routes;
pub mod state;
pub mod sweeper;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
