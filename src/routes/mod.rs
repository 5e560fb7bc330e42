//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Four paths make up the whole surface: the root redirect, a health probe,
//! and the login and dashboard pages. Everything renders server-side; the
//! only state a request carries is its session cookie.

use axum::Router;
use axum::response::{Json, Redirect};
use axum::routing::get;
use axum_extra::extract::cookie::PrivateCookieJar;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tower_http::trace::TraceLayer;

use crate::services::session;
use crate::state::AppState;

mod dashboard;
mod login;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", get(login::page).post(login::submit))
        .route("/dashboard", get(dashboard::page).post(dashboard::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Entry point: forwards to the dashboard or the login form by session state.
async fn root(jar: PrivateCookieJar) -> Redirect {
    if session::read_session(&jar).is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

async fn health() -> Json<serde_json::Value> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "service": "snipdash",
    }))
}
