//! One chat turn.
//!
//! A turn resolves (or implicitly creates) the session, locks its
//! transcript, appends the user message, calls the provider with the full
//! history, and appends the reply on success. The transcript lock is held
//! across the provider call, so turns on one session are linearized while
//! other sessions proceed concurrently — the store's map lock is released
//! before any await.

use tracing::info;

use mechbot_core::prompts;

use crate::error::ApiError;
use crate::state::AppState;

/// Outcome of a successful chat turn.
#[derive(Debug)]
pub struct ChatTurn {
    pub session_id: String,
    pub response: String,
}

/// Run one chat turn.
///
/// An absent or unknown `session_id` silently creates a fresh session
/// seeded with the bilingual instruction. On provider failure the user
/// message stays in the transcript but no assistant entry is appended.
pub async fn run_turn(
    state: &AppState,
    session_id: Option<String>,
    message: &str,
) -> Result<ChatTurn, ApiError> {
    if message.trim().is_empty() {
        return Err(ApiError::InvalidInput("empty message".to_string()));
    }

    let session = session_id
        .and_then(|id| state.store.get(&id))
        .unwrap_or_else(|| state.store.create(prompts::IMPLICIT_SESSION_SEED));

    let mut transcript = session.transcript().lock().await;
    transcript.push_user(message);

    let reply = state.provider.complete(transcript.messages()).await?;
    transcript.push_assistant(reply.clone());

    info!(
        session = %session.id(),
        history_len = transcript.len(),
        "chat turn completed"
    );

    Ok(ChatTurn {
        session_id: session.id().to_string(),
        response: reply,
    })
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use mechbot_core::session::{SessionLimits, SessionStore};
    use mechbot_core::types::Message;
    use mechbot_providers::{CompletionProvider, ProviderError};

    /// Stub provider: replies with a canned string, counting calls.
    struct StubProvider {
        reply: String,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn complete(&self, _messages: &[Message]) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    /// Stub provider that always fails.
    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _messages: &[Message]) -> Result<String, ProviderError> {
            Err(ProviderError::EmptyResponse)
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    /// Stub provider that yields before answering, to widen race windows.
    struct SlowProvider;

    #[async_trait]
    impl CompletionProvider for SlowProvider {
        async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            // Echo the latest user message so interleaving would be visible.
            let last_user = messages
                .iter()
                .rev()
                .find(|m| m.role() == "user")
                .map(|m| m.content().to_string())
                .unwrap_or_default();
            Ok(format!("reply to: {last_user}"))
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    fn make_state(provider: Arc<dyn CompletionProvider>) -> Arc<AppState> {
        AppState::new(SessionStore::new(SessionLimits::default()), provider)
    }

    #[tokio::test]
    async fn test_turn_grows_history_by_two() {
        let state = make_state(Arc::new(StubProvider::new("أهلاً بك")));
        let session = state.store.create("seed");
        let id = session.id().to_string();

        let turn = run_turn(&state, Some(id.clone()), "مرحبا").await.unwrap();

        assert_eq!(turn.session_id, id);
        assert_eq!(turn.response, "أهلاً بك");

        let transcript = session.transcript().lock().await;
        assert_eq!(transcript.len(), 3);
        let roles: Vec<&str> = transcript.messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant"]);
        assert_eq!(transcript.messages()[1].content(), "مرحبا");
        assert_eq!(transcript.messages()[2].content(), "أهلاً بك");
    }

    #[tokio::test]
    async fn test_absent_session_id_creates_session() {
        let state = make_state(Arc::new(StubProvider::new("hello")));

        let turn = run_turn(&state, None, "hi").await.unwrap();

        let session = state.store.get(&turn.session_id).expect("session exists");
        let transcript = session.transcript().lock().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(
            transcript.messages()[0].content(),
            prompts::IMPLICIT_SESSION_SEED
        );
    }

    #[tokio::test]
    async fn test_unknown_session_id_creates_session() {
        let state = make_state(Arc::new(StubProvider::new("hello")));

        let turn = run_turn(&state, Some("never-issued".to_string()), "hi")
            .await
            .unwrap();

        // A fresh id is minted, not the unknown one.
        assert_ne!(turn.session_id, "never-issued");
        assert!(state.store.get(&turn.session_id).is_some());
    }

    #[tokio::test]
    async fn test_provider_failure_appends_no_assistant() {
        let state = make_state(Arc::new(FailingProvider));
        let session = state.store.create("seed");
        let id = session.id().to_string();

        let err = run_turn(&state, Some(id), "مرحبا").await.unwrap_err();
        assert!(matches!(err, ApiError::Provider(_)));

        // User message stays, no empty assistant slot appears.
        let transcript = session.transcript().lock().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[1].role(), "user");
    }

    #[tokio::test]
    async fn test_empty_message_rejected_without_provider_call() {
        let provider = Arc::new(StubProvider::new("hello"));
        let state = make_state(provider.clone());

        let err = run_turn(&state, None, "   ").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        // No session was created either.
        assert!(state.store.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_turns_on_one_session_are_linearized() {
        let state = make_state(Arc::new(SlowProvider));
        let session = state.store.create("seed");
        let id = session.id().to_string();

        let (a, b) = tokio::join!(
            run_turn(&state, Some(id.clone()), "first"),
            run_turn(&state, Some(id.clone()), "second"),
        );
        a.unwrap();
        b.unwrap();

        // Both turns committed whole: strict user/assistant alternation,
        // each reply paired with its own user message.
        let transcript = session.transcript().lock().await;
        assert_eq!(transcript.len(), 5);
        let messages = transcript.messages();
        for pair in messages[1..].chunks(2) {
            assert_eq!(pair[0].role(), "user");
            assert_eq!(pair[1].role(), "assistant");
            assert_eq!(
                pair[1].content(),
                format!("reply to: {}", pair[0].content())
            );
        }
    }

    #[tokio::test]
    async fn test_turns_on_different_sessions_run_concurrently() {
        let state = make_state(Arc::new(SlowProvider));
        let a = state.store.create("seed").id().to_string();
        let b = state.store.create("seed").id().to_string();

        let (ra, rb) = tokio::join!(
            run_turn(&state, Some(a.clone()), "from a"),
            run_turn(&state, Some(b.clone()), "from b"),
        );

        assert_eq!(ra.unwrap().session_id, a);
        assert_eq!(rb.unwrap().session_id, b);
    }
}
