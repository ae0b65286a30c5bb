//! Config loader — reads `~/.mechbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.mechbot/config.json`
//! 3. Environment variables `MECHBOT_<SECTION>__<FIELD>` (override JSON)
//!
//! The provider credential additionally falls back to `GROQ_API_KEY` when
//! nothing else sets it.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `MECHBOT_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `MECHBOT_SERVER__HOST` / `MECHBOT_SERVER__PORT`
/// - `MECHBOT_PROVIDER__API_KEY` / `API_BASE` / `MODEL` / `MAX_TOKENS` /
///   `TEMPERATURE`
/// - `MECHBOT_SESSIONS__MAX_SESSIONS` / `IDLE_TIMEOUT_MINUTES` /
///   `SWEEP_INTERVAL_SECONDS`
/// - `GROQ_API_KEY` — provider credential fallback when nothing else set it
fn apply_env_overrides(mut config: Config) -> Config {
    // Server
    if let Ok(val) = std::env::var("MECHBOT_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("MECHBOT_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }

    // Provider
    if let Ok(val) = std::env::var("MECHBOT_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("MECHBOT_PROVIDER__API_BASE") {
        config.provider.api_base = Some(val);
    }
    if let Ok(val) = std::env::var("MECHBOT_PROVIDER__MODEL") {
        config.provider.model = val;
    }
    if let Ok(val) = std::env::var("MECHBOT_PROVIDER__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.provider.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("MECHBOT_PROVIDER__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.provider.temperature = t;
        }
    }

    // Credential fallback for the common deployment shape.
    if config.provider.api_key.is_empty() {
        if let Ok(val) = std::env::var("GROQ_API_KEY") {
            config.provider.api_key = val;
        }
    }

    // Sessions
    if let Ok(val) = std::env::var("MECHBOT_SESSIONS__MAX_SESSIONS") {
        if let Ok(n) = val.parse::<usize>() {
            config.sessions.max_sessions = n;
        }
    }
    if let Ok(val) = std::env::var("MECHBOT_SESSIONS__IDLE_TIMEOUT_MINUTES") {
        if let Ok(n) = val.parse::<u64>() {
            config.sessions.idle_timeout_minutes = n;
        }
    }
    if let Ok(val) = std::env::var("MECHBOT_SESSIONS__SWEEP_INTERVAL_SECONDS") {
        if let Ok(n) = val.parse::<u64>() {
            config.sessions.sweep_interval_seconds = n;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
