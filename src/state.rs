//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. All
//! of it is immutable after startup: the API client, the cookie key, and the
//! secure-cookie flag. Session state lives in the request's cookie jar and
//! snippet data in the backend, so there is no mutable store to share.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::services::session;

/// Shared application state. Clone is required by Axum; every field is
/// cheaply clonable.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub cookie_key: Key,
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(&config.api_base_url),
            cookie_key: session::derive_key(&config.session_secret),
            cookie_secure: config.cookie_secure,
        }
    }
}

// Required by the PrivateCookieJar extractor.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
