//! Login page: form rendering and credential submission.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

use crate::api::Credentials;
use crate::services::session::{self, User};
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login. Authenticated users go straight to the dashboard.
pub async fn page(jar: PrivateCookieJar) -> Response {
    if session::read_session(&jar).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(views::login_page(None)).into_response()
}

/// POST /login.
///
/// Missing fields never reach the backend. A backend rejection renders a
/// fixed message: the raw backend text is intentionally not forwarded here.
pub async fn submit(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let Some(credentials) = parse_credentials(&form) else {
        return (
            StatusCode::BAD_REQUEST,
            Html(views::login_page(Some("Username and password are required"))),
        )
            .into_response();
    };

    match state.api.login(&credentials).await {
        Ok(auth) => {
            let user = User {
                username: credentials.username,
                token: auth.token,
            };
            let (jar, redirect) = session::create_session(jar, user, state.cookie_secure);
            (jar, redirect).into_response()
        }
        Err(error) => {
            tracing::warn!(%error, "login rejected");
            (
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(Some("Invalid username or password"))),
            )
                .into_response()
        }
    }
}

/// Both fields must be present and non-empty. Values are passed through
/// untrimmed.
fn parse_credentials(form: &LoginForm) -> Option<Credentials> {
    if form.username.is_empty() || form.password.is_empty() {
        return None;
    }
    Some(Credentials {
        username: form.username.clone(),
        password: form.password.clone(),
    })
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
