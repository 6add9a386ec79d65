//! chatshell
//!
//! A server-hosted chat widget: axum serves an HTML-first chat interface
//! (Leptos SSR + HTMX + Alpine.js) whose send and clear actions are relayed
//! to an external chat backend over HTTP. Conversation state is ephemeral,
//! in-memory, and keyed by a session cookie.
//!
//! # Modules
//!
//! - [`config`]: layered configuration (defaults, file, env, CLI)
//! - [`markup`]: pure message-text-to-HTML formatter
//! - [`session`]: conversation state and session store
//! - [`ui`]: server-rendered widget markup
//! - [`upstream`]: typed client for the external chat backend
//! - [`server`]: router and request handlers

pub mod config;
pub mod markup;
pub mod server;
pub mod session;
pub mod ui;
pub mod upstream;

use std::sync::Arc;

use config::AppConfig;
use session::SessionStore;
use upstream::ChatBackend;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Session store for conversation state.
    pub sessions: SessionStore,
    /// Client for the external chat backend.
    pub backend: Arc<dyn ChatBackend>,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
