//! HTTP client for the snippet backend.
//!
//! Every call goes through one request path: JSON content type by default,
//! caller-supplied headers winning on conflict, and non-success responses
//! normalized through [`resolve_error_message`] so the surfaced text matches
//! whichever of the backend's error shapes was used. Downstream code matches
//! on that text, so the resolution order here is load-bearing.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{ApiError, AuthResponse, CreateSnippetRequest, Credentials, Snippet};

/// Client for the remote snippet backend.
///
/// Cheap to clone; all clones share one connection pool. No timeouts are
/// configured: a hung backend hangs the corresponding user action.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url`. A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.request(
            Method::POST,
            "/auth/login",
            HeaderMap::new(),
            Some(to_body(credentials)?),
        )
        .await
    }

    /// Submits text for summarization and returns the stored snippet.
    pub async fn create_snippet(
        &self,
        request: &CreateSnippetRequest,
        token: &str,
    ) -> Result<Snippet, ApiError> {
        self.request(
            Method::POST,
            "/snippets",
            bearer(token)?,
            Some(to_body(request)?),
        )
        .await
    }

    /// Lists all snippets. An empty collection is a valid result.
    pub async fn get_snippets(&self, token: &str) -> Result<Vec<Snippet>, ApiError> {
        self.request(Method::GET, "/snippets", bearer(token)?, None)
            .await
    }

    /// Fetches a single snippet by id.
    pub async fn get_snippet(&self, id: &str, token: &str) -> Result<Snippet, ApiError> {
        self.request(Method::GET, &format!("/snippets/{id}"), bearer(token)?, None)
            .await
    }

    /// Deletes a snippet. Success is any OK status including no-content; the
    /// body, if any, is discarded.
    pub async fn delete_snippet(&self, id: &str, token: &str) -> Result<(), ApiError> {
        self.execute(
            Method::DELETE,
            &format!("/snippets/{id}"),
            bearer(token)?,
            None,
        )
        .await?;
        Ok(())
    }

    /// Sends a request and returns the raw body text of a successful
    /// response. Non-success responses become [`ApiError::Status`] carrying
    /// the resolved message.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<String, ApiError> {
        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        merged.extend(headers);

        let mut request = self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .headers(merged);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: resolve_error_message(status.as_u16(), &text),
            });
        }
        Ok(text)
    }

    /// Sends a request and parses the successful body as JSON.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<T, ApiError> {
        let text = self.execute(method, path, headers, body).await?;
        parse_success_body(&text)
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|e| ApiError::Request(e.to_string()))
}

fn bearer(token: &str) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|e| ApiError::Request(e.to_string()))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Parses a successful response body. An empty body stands in for `{}`, so
/// object-returning calls tolerate no-content replies; anything else must be
/// valid JSON or the call fails with [`ApiError::InvalidBody`] rather than
/// returning partial data.
pub(crate) fn parse_success_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.is_empty() {
        return serde_json::from_value(Value::Object(serde_json::Map::new()))
            .map_err(|_| ApiError::InvalidBody);
    }
    serde_json::from_str(text).map_err(|_| ApiError::InvalidBody)
}

// =============================================================================
// ERROR BODY RESOLUTION
// =============================================================================

/// The closed set of error-body shapes the backend is known to produce,
/// tried in the order listed.
#[derive(Debug, PartialEq)]
enum ErrorBodyShape<'a> {
    /// `{"error": "..."}`
    FlatError(&'a str),
    /// `{"error": {"message": "..."}}`
    NestedMessage(&'a str),
    /// `{"error": {"error": "..."}}`
    NestedError(&'a str),
    /// `{"error": <any other non-null value>}`, stringified verbatim.
    OpaqueError(&'a Value),
    /// `{"message": "..."}` with no usable `error` field.
    TopLevelMessage(&'a str),
    /// Nothing recognizable; the whole body gets stringified.
    Unknown,
}

fn classify_error_body(body: &Value) -> ErrorBodyShape<'_> {
    match body.get("error") {
        Some(Value::String(message)) => ErrorBodyShape::FlatError(message),
        Some(error @ Value::Object(fields)) => {
            if let Some(Value::String(message)) = fields.get("message") {
                ErrorBodyShape::NestedMessage(message)
            } else if let Some(Value::String(message)) = fields.get("error") {
                ErrorBodyShape::NestedError(message)
            } else {
                ErrorBodyShape::OpaqueError(error)
            }
        }
        Some(error) if !error.is_null() => ErrorBodyShape::OpaqueError(error),
        _ => match body.get("message") {
            Some(Value::String(message)) => ErrorBodyShape::TopLevelMessage(message),
            _ => ErrorBodyShape::Unknown,
        },
    }
}

/// Resolves the human-readable message for a non-success response.
///
/// Empty bodies get the generic status line; unparseable bodies are used
/// verbatim; JSON bodies fall through [`classify_error_body`]. The result is
/// exactly what callers see, so its wording must stay stable.
pub(crate) fn resolve_error_message(status: u16, body: &str) -> String {
    if body.is_empty() {
        return format!("HTTP error! status: {status}");
    }
    let Ok(parsed) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    match classify_error_body(&parsed) {
        ErrorBodyShape::FlatError(message)
        | ErrorBodyShape::NestedMessage(message)
        | ErrorBodyShape::NestedError(message)
        | ErrorBodyShape::TopLevelMessage(message) => message.to_string(),
        ErrorBodyShape::OpaqueError(error) => error.to_string(),
        ErrorBodyShape::Unknown => parsed.to_string(),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
