//! Cookie-backed session store and auth guard.
//!
//! ARCHITECTURE
//! ============
//! The whole session is one signed+encrypted cookie holding the logged-in
//! user and an absolute expiry; there is no server-side session table. The
//! jar arrives with the request and leaves with the response, so handlers
//! thread session state through as a value.
//!
//! TRADE-OFFS
//! ==========
//! A cookie that is absent, fails decryption, fails to parse, or has
//! expired all read the same way: no session. The guard stays a single
//! `Option`, but nobody can be told why they were logged out.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use time::{Duration, OffsetDateTime};

pub const SESSION_COOKIE: &str = "__snipdash_session";

/// Sessions last seven days from login.
pub const SESSION_MAX_AGE: Duration = Duration::days(7);

/// The authenticated principal, exactly as stored in the session cookie.
///
/// The token is assumed valid for backend calls until the backend rejects
/// it; nothing here re-validates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionPayload {
    user: User,
    /// Unix seconds. Checked on read, so expiry does not depend on the
    /// browser honoring Max-Age.
    expires_at: i64,
}

/// Derives the 64-byte cookie key from the configured secret.
#[must_use]
pub fn derive_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Stores `user` in the jar and redirects to the dashboard. A prior session,
/// if any, is overwritten.
pub fn create_session(
    jar: PrivateCookieJar,
    user: User,
    secure: bool,
) -> (PrivateCookieJar, Redirect) {
    let payload = SessionPayload {
        user,
        expires_at: (OffsetDateTime::now_utc() + SESSION_MAX_AGE).unix_timestamp(),
    };
    let jar = jar.add(session_cookie(&payload, secure));
    (jar, Redirect::to("/dashboard"))
}

/// Reads the current user from the jar, or `None` when there is no usable
/// session (absent, unreadable, unparseable, or expired).
#[must_use]
pub fn read_session(jar: &PrivateCookieJar) -> Option<User> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let payload: SessionPayload = serde_json::from_str(cookie.value()).ok()?;
    if payload.expires_at <= OffsetDateTime::now_utc().unix_timestamp() {
        return None;
    }
    Some(payload.user)
}

/// Auth guard for protected pages.
///
/// # Errors
///
/// Returns the login redirect the caller must answer with when there is no
/// usable session. It is control flow, not a failure; callers branch on it
/// explicitly.
pub fn require_user(jar: &PrivateCookieJar) -> Result<User, Redirect> {
    read_session(jar).ok_or_else(|| Redirect::to("/login"))
}

/// Clears the session cookie and redirects to the login page. Safe to call
/// without an active session.
pub fn destroy_session(jar: PrivateCookieJar, secure: bool) -> (PrivateCookieJar, Redirect) {
    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build();
    (jar.remove(removal), Redirect::to("/login"))
}

fn session_cookie(payload: &SessionPayload, secure: bool) -> Cookie<'static> {
    // Plain strings and an integer; serialization cannot fail.
    let value = serde_json::to_string(payload).expect("session payload serializes");
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(SESSION_MAX_AGE)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
