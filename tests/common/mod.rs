//! Common test infrastructure
//!
//! Spawns the real app against an in-process stub of the snippet backend,
//! plus a cookie-keeping HTTP client. Tests should only import from this
//! module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{StubBackend, TestApp, TestClient};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_dashboard_requires_login() {
//!     let backend = StubBackend::spawn().await;
//!     let app = TestApp::spawn(&backend.base_url).await;
//!     let client = TestClient::new(&app.base_url);
//!
//!     let response = client.get("/dashboard").await;
//!     assert_eq!(response.status(), StatusCode::SEE_OTHER);
//! }
//! ```

// Each test binary compiles this module separately and uses a different
// subset of it.
#![allow(dead_code)]

mod backend;

// Public API - this is what tests import
pub use backend::StubBackend;
pub use client::TestClient;
pub use constants::*;
pub use server::TestApp;

/// Returns the `Location` header of a redirect response, or `""`.
pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Returns the first `Set-Cookie` header of a response, or `""`.
pub fn set_cookie(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
