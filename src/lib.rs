//! snipdash: a small authenticated web front-end for a text summarization API.
//!
//! One user logs in against a remote REST backend, submits text to be
//! summarized, and browses or deletes the stored results ("snippets"). The
//! session lives entirely in a signed+encrypted cookie; the backend owns all
//! snippet data. Modules are public so the end-to-end tests can drive the
//! real router against a stub backend.

pub mod api;
pub mod config;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;

pub use api::ApiClient;
pub use state::AppState;
