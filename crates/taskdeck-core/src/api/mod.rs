//! Typed client for the remote todo service.
//!
//! Response bodies are validated into explicit records at this boundary;
//! nothing duck-typed crosses into the rest of the crate.

mod client;
pub mod types;

pub use client::{ApiClient, ApiError};
