//! The authenticated identity context.

use crate::api::types::User;

/// Token plus account record for the signed-in user.
///
/// `user` can be `None` while `token` is set: the service's login response
/// is not guaranteed to carry a user record, and a restored session may
/// predate one being persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// True for sessions fabricated locally while the service was
    /// unreachable.
    pub fn is_offline(&self) -> bool {
        self.token
            .as_deref()
            .is_some_and(|token| token.starts_with("offline_"))
    }
}
