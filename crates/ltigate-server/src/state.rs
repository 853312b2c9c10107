//! Application state.
//!
//! Shared state for all request handlers. Collaborators are injected as
//! trait objects so tests can substitute them.

use std::sync::Arc;

use ltigate_core::CredentialStore;

use crate::session::SessionStore;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Consumer credential lookup.
    pub(crate) credentials: Arc<dyn CredentialStore>,
    /// Per-browser-session launch context store.
    pub(crate) sessions: Arc<dyn SessionStore>,
    /// Default tool path for launches without a valid `custom_tool`.
    pub(crate) tools_path: String,
}
