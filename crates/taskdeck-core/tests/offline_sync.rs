//! Behavior with the service unreachable: every operation degrades to the
//! persisted local copy, and authentication fabricates a session.

use taskdeck_core::api::ApiClient;
use taskdeck_core::session::{LoginOutcome, SessionManager, SignupOutcome};
use taskdeck_core::todos::TodoSync;
use taskdeck_core::{settings, store};
use tempfile::tempdir;

/// A base URL whose connections are refused immediately.
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn engine(dir: &std::path::Path) -> TodoSync {
    TodoSync::new(
        dir.to_path_buf(),
        ApiClient::new(refused_url()),
        "offline_0".to_string(),
    )
}

#[test]
fn login_fabricates_offline_session() {
    let dir = tempdir().unwrap();
    let mut sessions = SessionManager::new(dir.path().to_path_buf(), ApiClient::new(refused_url()));

    let outcome = sessions.login("a@b.com", "x").unwrap();

    assert_eq!(outcome, LoginOutcome::Offline);
    let token = sessions.session().token.clone().unwrap();
    let digits = token.strip_prefix("offline_").expect("offline_ prefix");
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(sessions.session().user.as_ref().unwrap().email, "a@b.com");
}

#[test]
fn signup_failure_installs_session_without_login_step() {
    let dir = tempdir().unwrap();
    let mut sessions = SessionManager::new(dir.path().to_path_buf(), ApiClient::new(refused_url()));

    let outcome = sessions.signup("Ada", "ada@b.com", "pw").unwrap();

    assert_eq!(outcome, SignupOutcome::Offline);
    assert!(sessions.session().is_offline());
    assert_eq!(sessions.session().user.as_ref().unwrap().name, "Ada");
}

#[test]
fn load_twice_reads_the_same_snapshot() {
    let dir = tempdir().unwrap();

    let mut writer = engine(dir.path());
    writer.add("Buy milk").unwrap();
    writer.add("Walk dog").unwrap();

    let mut first = engine(dir.path());
    first.load().unwrap();
    let mut second = engine(dir.path());
    second.load().unwrap();

    assert_eq!(first.todos(), second.todos());
    assert_eq!(first.todos().len(), 2);
}

#[test]
fn every_mutation_survives_remote_failure() {
    let dir = tempdir().unwrap();
    let mut todos = engine(dir.path());

    todos.add("Buy milk").unwrap();
    let id = todos.todos()[0].id.clone();

    todos.toggle(&id).unwrap();
    assert!(todos.todos()[0].completed);

    todos.edit(&id, "Buy oat milk").unwrap();
    assert_eq!(todos.todos()[0].title, "Buy oat milk");

    // Each step landed on disk, not just in memory.
    let mut reader = engine(dir.path());
    reader.load().unwrap();
    assert_eq!(reader.todos()[0].title, "Buy oat milk");
    assert!(reader.todos()[0].completed);

    todos.delete(&id).unwrap();
    let mut reader = engine(dir.path());
    reader.load().unwrap();
    assert!(reader.todos().is_empty());
}

#[test]
fn blank_titles_change_nothing() {
    let dir = tempdir().unwrap();
    let mut todos = engine(dir.path());

    todos.add("").unwrap();
    todos.add("   ").unwrap();

    assert!(todos.todos().is_empty());
}

#[test]
fn logout_clears_token_user_and_todos() {
    let dir = tempdir().unwrap();
    let mut sessions = SessionManager::new(dir.path().to_path_buf(), ApiClient::new(refused_url()));
    sessions.login("a@b.com", "x").unwrap();

    let mut todos = engine(dir.path());
    todos.add("Buy milk").unwrap();

    sessions.logout().unwrap();

    assert!(store::load_token(dir.path()).unwrap().is_none());
    assert!(store::load_user(dir.path()).unwrap().is_none());
    assert!(store::load_todos(dir.path()).unwrap().is_none());
}

#[test]
fn logout_leaves_device_settings_alone() {
    let dir = tempdir().unwrap();
    settings::save_settings(dir.path(), &settings::Settings { dark_mode: true }).unwrap();

    let mut sessions = SessionManager::new(dir.path().to_path_buf(), ApiClient::new(refused_url()));
    sessions.login("a@b.com", "x").unwrap();
    sessions.logout().unwrap();

    assert!(settings::load_settings(dir.path()).unwrap().dark_mode);
}

#[test]
fn session_restores_across_managers() {
    let dir = tempdir().unwrap();
    let mut first = SessionManager::new(dir.path().to_path_buf(), ApiClient::new(refused_url()));
    first.login("a@b.com", "x").unwrap();
    let expected = first.session().clone();

    let mut second = SessionManager::new(dir.path().to_path_buf(), ApiClient::new(refused_url()));
    second.restore().unwrap();

    assert_eq!(second.session(), &expected);
}
