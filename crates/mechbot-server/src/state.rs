//! Shared application state.

use std::sync::Arc;

use mechbot_core::session::SessionStore;
use mechbot_providers::CompletionProvider;

/// State shared by every request handler.
///
/// The store and provider are injected by the composition root (`serve`
/// command); handlers never reach for globals.
pub struct AppState {
    pub store: SessionStore,
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(store: SessionStore, provider: Arc<dyn CompletionProvider>) -> Arc<Self> {
        Arc::new(AppState { store, provider })
    }
}
