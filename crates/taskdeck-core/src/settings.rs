//! Device-local UI preferences, sharing the sync store's data directory.
//!
//! Settings are not part of the session: logout leaves them alone.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::{self, StoreError};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,
}

pub fn load_settings(dir: &Path) -> Result<Settings, StoreError> {
    match store::load_string(dir, SETTINGS_FILE)? {
        Some(contents) => Ok(serde_json::from_str(&contents)?),
        None => Ok(Settings::default()),
    }
}

pub fn save_settings(dir: &Path, settings: &Settings) -> Result<(), StoreError> {
    store::save_string(dir, SETTINGS_FILE, &serde_json::to_string_pretty(settings)?)
}
