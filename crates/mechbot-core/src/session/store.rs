//! Session registry — id allocation, lookup, deletion, and eviction.
//!
//! Locking discipline:
//! - The store's map lock (`RwLock`) is held only for lookups and
//!   insertions, never across an `.await`.
//! - Each session's transcript sits behind its own `tokio::sync::Mutex`;
//!   a chat turn holds it across the provider call, so turns on one
//!   session are linearized while other sessions stay fully concurrent.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SessionsConfig;
use crate::types::Transcript;

// ─────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────

/// Capacity and expiry bounds for the store.
#[derive(Clone, Copy, Debug)]
pub struct SessionLimits {
    /// Maximum live sessions. Creating past this evicts the longest-idle
    /// session first.
    pub max_sessions: usize,
    /// Sessions idle longer than this are dropped by [`SessionStore::sweep_idle`].
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 1024,
            idle_timeout: Duration::minutes(60),
        }
    }
}

impl From<&SessionsConfig> for SessionLimits {
    fn from(config: &SessionsConfig) -> Self {
        Self {
            max_sessions: config.max_sessions,
            idle_timeout: Duration::minutes(config.idle_timeout_minutes as i64),
        }
    }
}

// ─────────────────────────────────────────────
// SessionEntry
// ─────────────────────────────────────────────

/// One live session: its transcript behind a per-session lock, plus the
/// bookkeeping timestamps the eviction policy reads.
pub struct SessionEntry {
    id: String,
    transcript: tokio::sync::Mutex<Transcript>,
    created_at: DateTime<Utc>,
    last_active: RwLock<DateTime<Utc>>,
}

impl SessionEntry {
    fn new(id: String, seed: &str) -> Self {
        let now = Utc::now();
        SessionEntry {
            id,
            transcript: tokio::sync::Mutex::new(Transcript::seeded(seed)),
            created_at: now,
            last_active: RwLock::new(now),
        }
    }

    /// Opaque session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        *self.last_active.read().unwrap()
    }

    /// Record activity. Called on every lookup so idle time measures real
    /// client silence, not time since creation.
    pub fn touch(&self) {
        *self.last_active.write().unwrap() = Utc::now();
    }

    /// The per-session transcript lock.
    pub fn transcript(&self) -> &tokio::sync::Mutex<Transcript> {
        &self.transcript
    }
}

impl std::fmt::Debug for SessionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEntry")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

// ─────────────────────────────────────────────
// SessionStore
// ─────────────────────────────────────────────

/// Process-wide session registry.
///
/// Thread-safe via `RwLock` — multiple readers, exclusive writer. Owned by
/// the composition root and injected into the HTTP state; there is no
/// global session map.
pub struct SessionStore {
    limits: SessionLimits,
    sessions: RwLock<HashMap<String, Arc<SessionEntry>>>,
}

impl SessionStore {
    pub fn new(limits: SessionLimits) -> Self {
        SessionStore {
            limits,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new session whose transcript is seeded with one `system`
    /// message, and register it under a fresh UUID.
    ///
    /// At capacity, the longest-idle session is evicted to make room.
    pub fn create(&self, seed: &str) -> Arc<SessionEntry> {
        let id = Uuid::new_v4().to_string();
        let entry = Arc::new(SessionEntry::new(id.clone(), seed));

        let mut sessions = self.sessions.write().unwrap();
        if sessions.len() >= self.limits.max_sessions {
            evict_longest_idle(&mut sessions);
        }
        sessions.insert(id.clone(), entry.clone());
        debug!(session = %id, total = sessions.len(), "session created");

        entry
    }

    /// Look up a session. `None` for ids never issued or already deleted —
    /// a deleted id is indistinguishable from one that never existed.
    pub fn get(&self, id: &str) -> Option<Arc<SessionEntry>> {
        let entry = self.sessions.read().unwrap().get(id).cloned();
        if let Some(ref e) = entry {
            e.touch();
        }
        entry
    }

    /// Remove a session. Returns `false` for unknown ids, including ids
    /// that were already deleted — deletion is terminal, never
    /// idempotent-success.
    pub fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().unwrap().remove(id).is_some();
        if removed {
            debug!(session = %id, "session deleted");
        }
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every session idle longer than the configured timeout. Returns
    /// how many were removed.
    pub fn sweep_idle(&self) -> usize {
        let cutoff = Utc::now() - self.limits.idle_timeout;

        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_active() > cutoff);
        let swept = before - sessions.len();

        if swept > 0 {
            info!(swept, remaining = sessions.len(), "idle sessions removed");
        }
        swept
    }
}

/// Evict the session with the oldest `last_active`. Caller holds the write
/// lock.
fn evict_longest_idle(sessions: &mut HashMap<String, Arc<SessionEntry>>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, entry)| entry.last_active())
        .map(|(id, _)| id.clone());

    if let Some(id) = oldest {
        sessions.remove(&id);
        warn!(session = %id, "store at capacity, evicted longest-idle session");
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_store() -> SessionStore {
        SessionStore::new(SessionLimits::default())
    }

    #[tokio::test]
    async fn test_create_seeds_single_system_message() {
        let store = make_store();
        let session = store.create("seed instruction");

        let transcript = session.transcript().lock().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role(), "system");
        assert_eq!(transcript.messages()[0].content(), "seed instruction");
    }

    #[test]
    fn test_create_issues_unique_ids() {
        let store = make_store();
        let a = store.create("seed");
        let b = store.create("seed");

        assert_ne!(a.id(), b.id());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_returns_registered_session() {
        let store = make_store();
        let created = store.create("seed");

        let fetched = store.get(created.id()).expect("session should exist");
        assert_eq!(fetched.id(), created.id());
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = make_store();
        assert!(store.get("never-issued").is_none());
    }

    #[test]
    fn test_remove_known_session() {
        let store = make_store();
        let session = store.create("seed");

        assert!(store.remove(session.id()));
        assert!(store.get(session.id()).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_remove_is_terminal_not_idempotent() {
        let store = make_store();
        let session = store.create("seed");
        let id = session.id().to_string();

        assert!(store.remove(&id));
        // Second delete of the same id reports not-found, not success.
        assert!(!store.remove(&id));
        // The id is never resurrected.
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_remove_unknown_id() {
        let store = make_store();
        assert!(!store.remove("never-issued"));
    }

    #[test]
    fn test_capacity_evicts_longest_idle() {
        let store = SessionStore::new(SessionLimits {
            max_sessions: 2,
            idle_timeout: Duration::minutes(60),
        });

        let first = store.create("seed");
        let second = store.create("seed");
        // Touch the first so the second becomes the longest-idle.
        first.touch();

        let third = store.create("seed");

        assert_eq!(store.len(), 2);
        assert!(store.get(second.id()).is_none());
        assert!(store.get(first.id()).is_some());
        assert!(store.get(third.id()).is_some());
    }

    #[test]
    fn test_sweep_removes_idle_sessions() {
        let store = SessionStore::new(SessionLimits {
            max_sessions: 16,
            idle_timeout: Duration::zero(),
        });
        store.create("seed");
        store.create("seed");

        // Zero timeout: everything created before the sweep counts as idle.
        let swept = store.sweep_idle();
        assert_eq!(swept, 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_keeps_active_sessions() {
        let store = make_store();
        store.create("seed");

        let swept = store.sweep_idle();
        assert_eq!(swept, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_limits_from_config() {
        let config = SessionsConfig {
            max_sessions: 7,
            idle_timeout_minutes: 15,
            sweep_interval_seconds: 30,
        };

        let limits = SessionLimits::from(&config);
        assert_eq!(limits.max_sessions, 7);
        assert_eq!(limits.idle_timeout, Duration::minutes(15));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = make_store();
        let a = store.create("seed");
        let b = store.create("seed");

        a.transcript().lock().await.push_user("hello a");
        b.transcript().lock().await.push_user("hello b");
        b.transcript().lock().await.push_assistant("reply b");

        assert_eq!(a.transcript().lock().await.len(), 2);
        assert_eq!(b.transcript().lock().await.len(), 3);
    }
}
