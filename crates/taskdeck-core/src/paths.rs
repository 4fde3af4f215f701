//! Filesystem locations for persisted state.

use std::env;
use std::path::PathBuf;

/// The user's home directory.
///
/// Uses HOME on Unix-like systems and USERPROFILE on Windows.
pub fn home_dir() -> Option<PathBuf> {
    for var in ["HOME", "USERPROFILE"] {
        if let Ok(value) = env::var(var) {
            if !value.is_empty() {
                return Some(PathBuf::from(value));
            }
        }
    }
    None
}

/// Default data directory: `~/.config/taskdeck`.
pub fn default_data_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".config").join("taskdeck"))
}
