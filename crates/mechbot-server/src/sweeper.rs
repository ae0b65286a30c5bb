//! Background removal of idle sessions.
//!
//! Runs alongside the HTTP server and calls
//! [`SessionStore::sweep_idle`](mechbot_core::session::SessionStore::sweep_idle)
//! on a fixed interval until shut down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing::debug;

use crate::state::AppState;

/// Periodically drop sessions idle past the configured timeout.
///
/// Returns when `shutdown` is notified.
pub async fn run(state: Arc<AppState>, interval: Duration, shutdown: Arc<Notify>) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; skip it so startup isn't a sweep.
    ticker.tick().await;

    debug!(interval_s = interval.as_secs(), "session sweeper running");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                state.store.sweep_idle();
            }
            _ = shutdown.notified() => {
                debug!("session sweeper stopping");
                break;
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
