//! Blocking HTTP client for the todo service.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use super::types::{LoginResponse, Todo, User};

/// Outbound calls are bounded by a fixed timeout; a timed-out call
/// surfaces as a transport error and takes the same path as an
/// unreachable host.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors returned by remote calls.
///
/// Transport problems and application rejections are separate variants,
/// but the sync core treats them the same way: fall back to local state.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_json::<serde_json::Value>()
                    .ok()
                    .and_then(|body| {
                        body.get("message")
                            .or_else(|| body.get("error"))
                            .and_then(|m| m.as_str())
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| "request rejected".to_string());
                ApiError::Status { status, message }
            }
            ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
        }
    }
}

/// Client for the remote todo service.
///
/// Authenticated calls take the session token explicitly and send it as a
/// bearer credential; the service scopes todo queries and mutations to the
/// identity inside the token.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, method: &str, path: &str, token: &str) -> ureq::Request {
        self.agent
            .request(method, &self.url(path))
            .set("Authorization", &format!("Bearer {token}"))
    }

    /// POST /auth/login
    pub fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .agent
            .post(&self.url("/auth/login"))
            .send_json(json!({ "email": email, "password": password }))?;
        parse_json(response)
    }

    /// POST /auth/signup - the success body is ignored.
    pub fn signup(&self, name: &str, email: &str, password: &str) -> Result<(), ApiError> {
        self.agent
            .post(&self.url("/auth/signup"))
            .send_json(json!({ "name": name, "email": email, "password": password }))?;
        Ok(())
    }

    /// GET /todos
    pub fn list_todos(&self, token: &str) -> Result<Vec<Todo>, ApiError> {
        parse_json(self.authed("GET", "/todos", token).call()?)
    }

    /// POST /todos
    pub fn create_todo(&self, token: &str, title: &str) -> Result<Todo, ApiError> {
        let response = self
            .authed("POST", "/todos", token)
            .send_json(json!({ "title": title }))?;
        parse_json(response)
    }

    /// PATCH /todos/{id}/complete
    ///
    /// The only completion route the service exposes; there is no inverse.
    pub fn complete_todo(&self, token: &str, id: &str) -> Result<Todo, ApiError> {
        let path = format!("/todos/{id}/complete");
        parse_json(self.authed("PATCH", &path, token).call()?)
    }

    /// PATCH /todos/{id}
    pub fn update_todo(&self, token: &str, id: &str, title: &str) -> Result<Todo, ApiError> {
        let path = format!("/todos/{id}");
        let response = self
            .authed("PATCH", &path, token)
            .send_json(json!({ "title": title }))?;
        parse_json(response)
    }

    /// DELETE /todos/{id} - the success body is ignored.
    pub fn delete_todo(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let path = format!("/todos/{id}");
        self.authed("DELETE", &path, token).call()?;
        Ok(())
    }

    /// GET /profile
    pub fn profile(&self, token: &str) -> Result<User, ApiError> {
        parse_json(self.authed("GET", "/profile", token).call()?)
    }
}

fn parse_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T, ApiError> {
    response
        .into_json()
        .map_err(|err| ApiError::InvalidBody(err.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
