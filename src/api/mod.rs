//! Client for the remote snippet backend.

mod client;
mod types;

pub use client::ApiClient;
pub use types::{ApiError, AuthResponse, CreateSnippetRequest, Credentials, Snippet};
