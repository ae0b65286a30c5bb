//! Path helpers.

use std::path::PathBuf;

/// Get the Mechbot data directory (e.g. `~/.mechbot/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".mechbot")
}
