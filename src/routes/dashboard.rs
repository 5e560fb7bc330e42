//! Dashboard: snippet list, editor, and the intent-dispatched actions.
//!
//! Selection is plain request state (`?selected=<id>`), and a successful
//! create or delete answers with a redirect back here, so the refreshed list
//! is only ever rendered after the backend call has completed.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;

use crate::api::{CreateSnippetRequest, Snippet};
use crate::services::session::{self, User};
use crate::state::AppState;
use crate::views::{self, DashboardView};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub selected: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardForm {
    #[serde(default)]
    pub intent: String,
    pub text: Option<String>,
    pub id: Option<String>,
}

/// GET /dashboard.
pub async fn page(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let user = match session::require_user(&jar) {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    let snippets = load_snippets(&state, &user).await;
    let selected = resolve_selection(&state, &user, &snippets, query.selected.as_deref()).await;
    let text_buffer = selected
        .as_ref()
        .map(|snippet| snippet.text.clone())
        .unwrap_or_default();

    Html(views::dashboard_page(&DashboardView {
        user: &user,
        snippets: &snippets,
        selected: selected.as_ref(),
        error: None,
        text_buffer: &text_buffer,
    }))
    .into_response()
}

/// POST /dashboard. Dispatches on the `intent` form field.
pub async fn submit(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<DashboardForm>,
) -> Response {
    let user = match session::require_user(&jar) {
        Ok(user) => user,
        Err(redirect) => return redirect.into_response(),
    };

    match form.intent.as_str() {
        "logout" => {
            let (jar, redirect) = session::destroy_session(jar, state.cookie_secure);
            (jar, redirect).into_response()
        }
        "create" => create(&state, &user, &form.text.unwrap_or_default()).await,
        "delete" => delete(&state, &user, &form.id.unwrap_or_default()).await,
        other => {
            tracing::warn!(intent = other, "unknown dashboard intent");
            error_page(&state, &user, StatusCode::BAD_REQUEST, "Invalid intent", "").await
        }
    }
}

async fn create(state: &AppState, user: &User, text: &str) -> Response {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return error_page(state, user, StatusCode::BAD_REQUEST, "Text is required", "").await;
    }

    let request = CreateSnippetRequest {
        text: trimmed.to_string(),
    };
    match state.api.create_snippet(&request, &user.token).await {
        Ok(_) => Redirect::to("/dashboard").into_response(),
        Err(error) => {
            tracing::error!(%error, "snippet creation failed");
            error_page(
                state,
                user,
                StatusCode::INTERNAL_SERVER_ERROR,
                &error.to_string(),
                text,
            )
            .await
        }
    }
}

async fn delete(state: &AppState, user: &User, id: &str) -> Response {
    match state.api.delete_snippet(id, &user.token).await {
        Ok(()) => Redirect::to("/dashboard").into_response(),
        Err(error) => {
            tracing::error!(%error, id, "snippet deletion failed");
            error_page(
                state,
                user,
                StatusCode::INTERNAL_SERVER_ERROR,
                &error.to_string(),
                "",
            )
            .await
        }
    }
}

/// Re-renders the dashboard with an inline error. Action failures surface
/// their message verbatim; the submitted text rides along so the user does
/// not lose their draft.
async fn error_page(
    state: &AppState,
    user: &User,
    status: StatusCode,
    message: &str,
    text_buffer: &str,
) -> Response {
    let snippets = load_snippets(state, user).await;
    (
        status,
        Html(views::dashboard_page(&DashboardView {
            user,
            snippets: &snippets,
            selected: None,
            error: Some(message),
            text_buffer,
        })),
    )
        .into_response()
}

/// A failed list fetch degrades to an empty list instead of failing the
/// whole page.
async fn load_snippets(state: &AppState, user: &User) -> Vec<Snippet> {
    match state.api.get_snippets(&user.token).await {
        Ok(snippets) => snippets,
        Err(error) => {
            tracing::error!(%error, "failed to load snippets");
            Vec::new()
        }
    }
}

/// Looks the selection up in the already-fetched list first and only then
/// asks the backend; an id that resolves nowhere drops the selection.
async fn resolve_selection(
    state: &AppState,
    user: &User,
    snippets: &[Snippet],
    selected: Option<&str>,
) -> Option<Snippet> {
    let id = selected?;
    if let Some(snippet) = snippets.iter().find(|snippet| snippet.id == id) {
        return Some(snippet.clone());
    }
    match state.api.get_snippet(id, &user.token).await {
        Ok(snippet) => Some(snippet),
        Err(error) => {
            tracing::warn!(%error, id, "selected snippet unavailable");
            None
        }
    }
}
