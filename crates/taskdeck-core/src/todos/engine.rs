//! Local-first todo mutations with best-effort remote mirroring.
//!
//! Every mutation runs in two visible phases: commit the change to the
//! in-memory list and persist it, then fire the matching remote call and
//! discard its result. The persisted local copy is what the user sees;
//! a failed remote call is logged at debug level and nothing else.
//!
//! The one exception to local-first is `add`: the remote create runs
//! before the append so that the service-assigned id can be stored when
//! the call succeeds. Exactly one item is kept either way.

use std::path::PathBuf;

use chrono::Utc;

use crate::api::types::Todo;
use crate::api::ApiClient;
use crate::store::{self, StoreError};

/// The authoritative local todo list for the current session.
///
/// One instance per signed-in session; logout discards the persisted list
/// out from under it via the session manager.
pub struct TodoSync {
    data_dir: PathBuf,
    client: ApiClient,
    token: String,
    todos: Vec<Todo>,
}

impl TodoSync {
    pub fn new(data_dir: PathBuf, client: ApiClient, token: String) -> Self {
        Self {
            data_dir,
            client,
            token,
            todos: Vec::new(),
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Fetch the full list from the service, replacing the local copy on
    /// success. On failure fall back to the last persisted snapshot, or
    /// an empty list if none exists. Strictly either-or; no merge.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.client.list_todos(&self.token) {
            Ok(remote) => {
                self.todos = remote;
                store::save_todos(&self.data_dir, &self.todos)?;
            }
            Err(err) => {
                log::debug!("todo list fetch failed, using local copy: {err}");
                self.todos = store::load_todos(&self.data_dir)?.unwrap_or_default();
            }
        }
        Ok(())
    }

    /// Append a new item. A blank title is a silent no-op.
    ///
    /// The provisional item is built first so its id and timestamp
    /// predate the remote attempt; if the create succeeds the service's
    /// item is appended instead.
    pub fn add(&mut self, title: &str) -> Result<(), StoreError> {
        if title.trim().is_empty() {
            return Ok(());
        }

        let provisional = Todo {
            id: Utc::now().timestamp_millis().to_string(),
            title: title.to_string(),
            completed: false,
            created_at: Some(Utc::now()),
        };

        let item = match self.client.create_todo(&self.token, title) {
            Ok(created) => created,
            Err(err) => {
                log::debug!("todo create failed, keeping local item: {err}");
                provisional
            }
        };

        self.todos.push(item);
        store::save_todos(&self.data_dir, &self.todos)
    }

    /// Flip completion on the matching item.
    ///
    /// The service only exposes a mark-complete route; it is called on
    /// every toggle, un-completing included, and the response is
    /// discarded.
    pub fn toggle(&mut self, id: &str) -> Result<(), StoreError> {
        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.completed = !todo.completed;
        }
        store::save_todos(&self.data_dir, &self.todos)?;

        if let Err(err) = self.client.complete_todo(&self.token, id) {
            log::debug!("todo complete call failed: {err}");
        }
        Ok(())
    }

    /// Replace the matching item's title. A blank title is a silent no-op.
    pub fn edit(&mut self, id: &str, new_title: &str) -> Result<(), StoreError> {
        if new_title.trim().is_empty() {
            return Ok(());
        }

        if let Some(todo) = self.todos.iter_mut().find(|t| t.id == id) {
            todo.title = new_title.to_string();
        }
        store::save_todos(&self.data_dir, &self.todos)?;

        if let Err(err) = self.client.update_todo(&self.token, id, new_title) {
            log::debug!("todo update call failed: {err}");
        }
        Ok(())
    }

    /// Remove the matching item.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        self.todos.retain(|t| t.id != id);
        store::save_todos(&self.data_dir, &self.todos)?;

        if let Err(err) = self.client.delete_todo(&self.token, id) {
            log::debug!("todo delete call failed: {err}");
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A base URL whose connections are refused immediately.
    fn refused_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn offline_engine(dir: &std::path::Path) -> TodoSync {
        TodoSync::new(
            dir.to_path_buf(),
            ApiClient::new(refused_url()),
            "offline_0".to_string(),
        )
    }

    mod add {
        use super::*;

        #[test]
        fn blank_title_is_a_noop() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());

            engine.add("").unwrap();
            engine.add("   ").unwrap();

            assert!(engine.todos().is_empty());
            // Nothing was persisted either.
            assert!(store::load_todos(dir.path()).unwrap().is_none());
        }

        #[test]
        fn offline_item_gets_timestamp_id() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());

            engine.add("Buy milk").unwrap();

            let todo = &engine.todos()[0];
            assert!(todo.id.chars().all(|c| c.is_ascii_digit()));
            assert!(!todo.completed);
            assert!(todo.created_at.is_some());
        }

        #[test]
        fn title_is_stored_untrimmed() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());

            engine.add("  Buy milk ").unwrap();
            assert_eq!(engine.todos()[0].title, "  Buy milk ");
        }
    }

    mod toggle {
        use super::*;

        #[test]
        fn unknown_id_persists_list_unchanged() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());
            engine.add("Buy milk").unwrap();
            let before = engine.todos().to_vec();

            engine.toggle("no-such-id").unwrap();

            assert_eq!(engine.todos(), &before[..]);
            assert_eq!(store::load_todos(dir.path()).unwrap(), Some(before));
        }

        #[test]
        fn flips_both_directions() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());
            engine.add("Buy milk").unwrap();
            let id = engine.todos()[0].id.clone();

            engine.toggle(&id).unwrap();
            assert!(engine.todos()[0].completed);

            engine.toggle(&id).unwrap();
            assert!(!engine.todos()[0].completed);
        }
    }

    mod edit {
        use super::*;

        #[test]
        fn blank_title_is_a_noop() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());
            engine.add("Buy milk").unwrap();
            let id = engine.todos()[0].id.clone();

            engine.edit(&id, "   ").unwrap();
            assert_eq!(engine.todos()[0].title, "Buy milk");
        }
    }

    mod load {
        use super::*;

        #[test]
        fn no_snapshot_means_empty_list() {
            let dir = tempdir().unwrap();
            let mut engine = offline_engine(dir.path());
            engine.load().unwrap();
            assert!(engine.todos().is_empty());
        }
    }
}
