//! Wire types for the snippet backend, plus the client-side error type.
//!
//! The backend speaks camelCase JSON; everything here renames accordingly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Login request body. Transient input; never persisted anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Successful login reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    /// Advisory lifetime string (e.g. `"24h"`); carried but not interpreted.
    pub expires_in: String,
}

/// A stored unit of input text plus its backend-generated summary.
///
/// Owned entirely by the backend; this side only ever holds read-only copies
/// fetched per page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub text: String,
    pub summary: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of the snippet creation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnippetRequest {
    pub text: String,
}

/// Client-side failure taxonomy.
///
/// `Status` displays as the bare resolved message: callers match on message
/// text rather than structured codes, so the text is the contract.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status; the message was resolved from the body.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// A 2xx response whose body was not valid JSON.
    #[error("Invalid JSON response")]
    InvalidBody,
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),
}

impl ApiError {
    /// The HTTP status code, for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
