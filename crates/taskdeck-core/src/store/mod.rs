//! Local persisted state.
//!
//! # File Locations
//!
//! Everything lives under one data directory:
//!
//! ```text
//! ~/.config/taskdeck/
//! ├── token            # raw token string
//! ├── user.json        # account record for the signed-in user
//! ├── todos.json       # ordered todo list
//! └── settings.json    # UI preferences
//! ```
//!
//! # Design
//!
//! Saves are atomic: write to `<name>.tmp`, then rename into place. Loads
//! of missing files return `None`, so first-run state is indistinguishable
//! from cleared state.
//!
//! Logout removes the session slice (`token`, `user.json`, `todos.json`);
//! `settings.json` belongs to the device, not the session, and survives.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::api::types::{Todo, User};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";
const TODOS_FILE: &str = "todos.json";

/// Error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write a file atomically under the data directory.
pub(crate) fn save_string(dir: &Path, name: &str, contents: &str) -> Result<(), StoreError> {
    fs::create_dir_all(dir)?;

    let file_path = dir.join(name);
    let temp_path = dir.join(format!("{name}.tmp"));

    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, &file_path)?;

    Ok(())
}

/// Read a file under the data directory; `None` if it does not exist.
pub(crate) fn load_string(dir: &Path, name: &str) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(dir.join(name)) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn remove_if_present(dir: &Path, name: &str) -> Result<(), StoreError> {
    match fs::remove_file(dir.join(name)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

// ============================================================================
// Session slice
// ============================================================================

pub fn save_token(dir: &Path, token: &str) -> Result<(), StoreError> {
    save_string(dir, TOKEN_FILE, token)
}

pub fn load_token(dir: &Path) -> Result<Option<String>, StoreError> {
    Ok(load_string(dir, TOKEN_FILE)?.map(|raw| raw.trim_end().to_string()))
}

pub fn save_user(dir: &Path, user: &User) -> Result<(), StoreError> {
    save_string(dir, USER_FILE, &serde_json::to_string_pretty(user)?)
}

pub fn load_user(dir: &Path) -> Result<Option<User>, StoreError> {
    match load_string(dir, USER_FILE)? {
        Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        None => Ok(None),
    }
}

/// Remove token, user, and todos together. Settings stay.
pub fn clear_session(dir: &Path) -> Result<(), StoreError> {
    remove_if_present(dir, TOKEN_FILE)?;
    remove_if_present(dir, USER_FILE)?;
    remove_if_present(dir, TODOS_FILE)?;
    Ok(())
}

// ============================================================================
// Todo snapshot
// ============================================================================

pub fn save_todos(dir: &Path, todos: &[Todo]) -> Result<(), StoreError> {
    save_string(dir, TODOS_FILE, &serde_json::to_string_pretty(todos)?)
}

/// The last persisted list, or `None` if no snapshot was ever written.
pub fn load_todos(dir: &Path) -> Result<Option<Vec<Todo>>, StoreError> {
    match load_string(dir, TODOS_FILE)? {
        Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
        None => Ok(None),
    }
}

// ============================================================================
// TESTS
// ============================================================================
