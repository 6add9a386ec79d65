//! Axum server and request handlers.
//!
//! Routes:
//!
//! - `GET /`: full chat page for the cookie-bound session
//! - `POST /chat/send`: append the user message, call the upstream
//!   backend, append the reply (or an error bubble), return the re-rendered
//!   message list fragment
//! - `POST /chat/clear`: clear upstream and local history, return the
//!   welcome fragment; on failure return 502 and change nothing
//! - `GET /api/history`: JSON dump of the session's messages
//!
//! Send-path failures are never HTTP errors: the widget always gets a 200
//! with the error rendered as an assistant bubble, and ends up back in its
//! idle state.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::session::{Message, Session, SessionStore};
use crate::ui::chat::render_message_list;
use crate::ui::page::render_index;
use crate::upstream::ChatBackend;

/// Session cookie name.
const SESSION_COOKIE: &str = "chatshell_session";

/// Start the server with the provided configuration and backend client.
pub async fn start_server(
    config: Arc<AppConfig>,
    backend: Arc<dyn ChatBackend>,
) -> anyhow::Result<()> {
    let state = AppState {
        sessions: SessionStore::new(),
        backend,
        config: Arc::clone(&config),
    };

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the application router.
///
/// Public so integration tests can drive the real routes with a scripted
/// backend.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat/send", post(send_message))
        .route("/chat/clear", post(clear_conversation))
        .route("/api/history", get(api_history))
        .nest_service("/static", ServeDir::new("static"))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Look up the cookie-bound session, minting a cookie on first contact.
///
/// Expired sessions are swept opportunistically here.
fn resolve_session(state: &AppState, jar: CookieJar) -> (CookieJar, Session) {
    state.sessions.cleanup_expired();

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let session = state.sessions.get_or_create(cookie.value());
        return (jar, session);
    }

    let session = state.sessions.create();
    let cookie = Cookie::build((SESSION_COOKIE, session.id().to_string()))
        .path("/")
        .http_only(true)
        .build();
    (jar.add(cookie), session)
}

/// GET / - chat page.
async fn index_handler(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, session) = resolve_session(&state, jar);
    let html = render_index(&state.config.ui.title, &session.messages());
    (jar, Html(html))
}

/// Form body for the send route.
#[derive(Debug, Deserialize)]
struct SendForm {
    message: String,
}

/// POST /chat/send - send one message through the upstream backend.
async fn send_message(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SendForm>,
) -> Response {
    let text = form.message.trim();
    if text.is_empty() {
        return (StatusCode::BAD_REQUEST, "Message cannot be empty").into_response();
    }

    let (jar, session) = resolve_session(&state, jar);
    session.add_user_message(text);

    info!(
        name: "chat.message.received",
        session_id = %session.id(),
        chars = text.len(),
        "Chat message received"
    );

    let reply = match state.backend.send(text).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(
                session_id = %session.id(),
                error = %e,
                "Upstream send failed"
            );
            format!("Error: {e}")
        }
    };
    session.add_assistant_message(reply);

    (jar, Html(render_message_list(&session.messages()))).into_response()
}

/// POST /chat/clear - clear the conversation.
///
/// The upstream backend is asked first; local state is only dropped once it
/// confirms, so a failed clear leaves the view untouched.
async fn clear_conversation(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, session) = resolve_session(&state, jar);

    match state.backend.clear().await {
        Ok(()) => {
            session.clear();
            info!(
                name: "chat.cleared",
                session_id = %session.id(),
                "Conversation cleared"
            );
            (jar, Html(render_message_list(&[]))).into_response()
        }
        Err(e) => {
            tracing::error!(
                session_id = %session.id(),
                error = %e,
                "Upstream clear failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                format!("Failed to clear conversation: {e}"),
            )
                .into_response()
        }
    }
}

/// History payload: the conversation as JSON.
#[derive(Debug, Serialize)]
struct HistoryResponse {
    history: Vec<Message>,
}

/// GET /api/history - session messages as JSON.
///
/// Read-only: no session or cookie is created for a browser that has none.
async fn api_history(State(state): State<AppState>, jar: CookieJar) -> Json<HistoryResponse> {
    let history = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.get(cookie.value()))
        .map(|session| session.messages())
        .unwrap_or_default();

    Json(HistoryResponse { history })
}
