//! Configuration — typed schema + JSON/env loader.
//!
//! Loading precedence: compiled defaults → `~/.mechbot/config.json` →
//! `MECHBOT_<SECTION>__<FIELD>` environment variables.

pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, save_config};
pub use schema::{Config, ProviderConfig, ServerConfig, SessionsConfig};
