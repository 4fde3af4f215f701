//! Request and response records for the remote service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account record as returned by the service.
///
/// The document store behind the service spells the identifier `_id`;
/// both spellings are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Service-assigned on the remote path, client-generated
    /// epoch-millisecond string on the offline path.
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub completed: bool,

    /// Always set for locally created items; service responses are not
    /// guaranteed to carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a successful authentication call.
///
/// The service is only guaranteed to return the token; the user record
/// may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,

    #[serde(default)]
    pub user: Option<User>,
}

// ============================================================================
// TESTS
// ============================================================================
