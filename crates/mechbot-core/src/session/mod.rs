//! In-memory session store.
//!
//! Sessions live for the process lifetime unless deleted explicitly or
//! removed by the eviction policy (capacity bound + idle timeout). There is
//! no persistence — a restart forgets every conversation.

pub mod store;

pub use store::{SessionEntry, SessionLimits, SessionStore};
