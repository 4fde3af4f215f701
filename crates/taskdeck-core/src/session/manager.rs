//! SessionManager - owns the session and its persistence lifecycle.
//!
//! Authentication never fails from the caller's point of view: when the
//! service is unreachable or rejects the call, a local session is
//! fabricated instead, and the outcome enum tells the frontend to show
//! its offline notice. Once a session is offline it stays offline; no
//! path re-attempts the remote call before the next login.

use std::path::PathBuf;

use chrono::Utc;

use super::state::Session;
use crate::api::types::User;
use crate::api::ApiClient;
use crate::store::{self, StoreError};

/// Outcome of a login attempt. Both variants leave a usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The service accepted the credentials.
    Online,
    /// A local session was fabricated; the frontend should tell the user.
    Offline,
}

/// Outcome of a signup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Account created remotely. No session was established - the caller
    /// is expected to continue to the login flow.
    Registered,
    /// A local session was fabricated directly from the submitted
    /// details; the frontend should tell the user.
    Offline,
}

/// Owns the current session and the persisted token/user slice.
///
/// Construct one per process, `restore()` at startup, and hand the
/// resulting token to whatever needs authenticated calls. `logout()` also
/// discards the persisted todo list, since todos belong to the session.
pub struct SessionManager {
    data_dir: PathBuf,
    client: ApiClient,
    session: Session,
}

impl SessionManager {
    pub fn new(data_dir: PathBuf, client: ApiClient) -> Self {
        Self {
            data_dir,
            client,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read the persisted token and user back into memory.
    ///
    /// A token restores on its own; the user record is filled in when one
    /// was persisted. No expiry or signature check happens here - a stale
    /// token is treated as valid until a protected call rejects it.
    pub fn restore(&mut self) -> Result<(), StoreError> {
        let token = store::load_token(&self.data_dir)?;
        let user = store::load_user(&self.data_dir)?;
        if token.is_some() {
            self.session = Session { token, user };
        }
        Ok(())
    }

    /// Authenticate against the service, falling back to a fabricated
    /// offline session on any remote failure.
    pub fn login(&mut self, email: &str, password: &str) -> Result<LoginOutcome, StoreError> {
        match self.client.login(email, password) {
            Ok(response) => {
                store::save_token(&self.data_dir, &response.token)?;
                if let Some(user) = &response.user {
                    store::save_user(&self.data_dir, user)?;
                }
                self.session = Session {
                    token: Some(response.token),
                    user: response.user,
                };
                Ok(LoginOutcome::Online)
            }
            Err(err) => {
                log::debug!("login failed, entering offline mode: {err}");
                let user = User {
                    id: "1".to_string(),
                    email: email.to_string(),
                    name: "Offline User".to_string(),
                };
                self.install_offline_session(user)?;
                Ok(LoginOutcome::Offline)
            }
        }
    }

    /// Create an account. On success the caller is sent back to the login
    /// flow; on failure a session is fabricated directly from the
    /// submitted details - unlike `login`, no second step is needed.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SignupOutcome, StoreError> {
        match self.client.signup(name, email, password) {
            Ok(()) => Ok(SignupOutcome::Registered),
            Err(err) => {
                log::debug!("signup failed, entering offline mode: {err}");
                let user = User {
                    id: Utc::now().timestamp_millis().to_string(),
                    email: email.to_string(),
                    name: name.to_string(),
                };
                self.install_offline_session(user)?;
                Ok(SignupOutcome::Offline)
            }
        }
    }

    /// Clear the session and everything persisted under it, including the
    /// todo list.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        store::clear_session(&self.data_dir)?;
        self.session = Session::default();
        Ok(())
    }

    fn install_offline_session(&mut self, user: User) -> Result<(), StoreError> {
        let token = format!("offline_{}", Utc::now().timestamp_millis());
        store::save_token(&self.data_dir, &token)?;
        store::save_user(&self.data_dir, &user)?;
        self.session = Session {
            token: Some(token),
            user: Some(user),
        };
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
