//! Environment configuration.
//!
//! Everything is read once at startup. The only hard requirement is
//! `SESSION_SECRET` in production: without it the cookie key would fall back
//! to a value anyone can look up, so startup refuses instead.

use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PORT: u16 = 8080;

/// Development-only fallback secret. Production startup fails rather than
/// sign cookies with this.
const DEV_SESSION_SECRET: &str = "snipdash-dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SESSION_SECRET is required when APP_ENV=production")]
    MissingSessionSecret,
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the snippet backend, without a trailing slash requirement.
    pub api_base_url: String,
    /// Port the page server listens on.
    pub port: u16,
    /// Secret the session cookie key is derived from.
    pub session_secret: String,
    /// True when `APP_ENV=production`.
    pub production: bool,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails when production mode lacks a session secret or `PORT` is not a
    /// valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let production = is_production(std::env::var("APP_ENV").ok().as_deref());
        let session_secret =
            resolve_session_secret(std::env::var("SESSION_SECRET").ok().as_deref(), production)?;

        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => parse_port(&raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or(production);

        Ok(Self {
            api_base_url,
            port,
            session_secret,
            production,
            cookie_secure,
        })
    }
}

fn is_production(raw: Option<&str>) -> bool {
    raw.is_some_and(|value| value.trim().eq_ignore_ascii_case("production"))
}

fn resolve_session_secret(raw: Option<&str>, production: bool) -> Result<String, ConfigError> {
    match raw {
        Some(secret) if !secret.trim().is_empty() => Ok(secret.to_string()),
        _ if production => Err(ConfigError::MissingSessionSecret),
        _ => {
            tracing::warn!("SESSION_SECRET not set; using the development fallback");
            Ok(DEV_SESSION_SECRET.to_string())
        }
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
