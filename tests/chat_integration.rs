//! Integration tests for the chat widget routes.
//!
//! The real router runs under `axum-test` with a scripted in-process
//! backend, so every test exercises the same handlers, session plumbing,
//! and rendering the binary uses — without a network.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::http::StatusCode;
use axum_test::TestServer;
use chatshell::config::{AppConfig, ServerConfig, UiConfig, UpstreamConfig};
use chatshell::session::SessionStore;
use chatshell::upstream::{BackendError, ChatBackend, GENERIC_FAILURE};
use chatshell::{AppState, server::router};

/// What the scripted backend does with a send call.
#[derive(Clone)]
enum SendScript {
    Reply(String),
    Reject(String),
    Fail(String),
}

/// Scripted [`ChatBackend`] recording what it was asked.
struct ScriptedBackend {
    send: SendScript,
    clear_ok: bool,
    send_calls: AtomicUsize,
    last_message: Mutex<Option<String>>,
}

impl ScriptedBackend {
    fn new(send: SendScript, clear_ok: bool) -> Arc<Self> {
        Arc::new(Self {
            send,
            clear_ok,
            send_calls: AtomicUsize::new(0),
            last_message: Mutex::new(None),
        })
    }
}

#[async_trait::async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, message: &str) -> Result<String, BackendError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_message.lock().unwrap() = Some(message.to_string());
        match &self.send {
            SendScript::Reply(text) => Ok(text.clone()),
            SendScript::Reject(reason) => Err(BackendError::Rejected(reason.clone())),
            SendScript::Fail(desc) => Err(BackendError::Transport(desc.clone())),
        }
    }

    async fn clear(&self) -> Result<(), BackendError> {
        if self.clear_ok {
            Ok(())
        } else {
            Err(BackendError::Rejected(GENERIC_FAILURE.to_string()))
        }
    }
}

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        upstream: UpstreamConfig {
            base_url: "http://127.0.0.1:9".to_string(),
        },
        ui: UiConfig {
            title: "Chat".to_string(),
        },
    })
}

/// Test server over the real router; cookies persist across requests so a
/// test behaves like one browser session.
fn test_server(backend: Arc<ScriptedBackend>) -> TestServer {
    let state = AppState {
        sessions: SessionStore::new(),
        backend,
        config: test_config(),
    };
    let mut server = TestServer::new(router(state)).expect("test server starts");
    server.save_cookies();
    server
}

async fn history(server: &TestServer) -> serde_json::Value {
    server.get("/api/history").await.json::<serde_json::Value>()
}

#[tokio::test]
async fn index_renders_widget_with_welcome_placeholder() {
    let server = test_server(ScriptedBackend::new(
        SendScript::Reply("unused".into()),
        true,
    ));

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("welcome-message"));
    assert!(html.contains(r#"hx-post="/chat/send""#));
    assert!(html.contains(r#"hx-post="/chat/clear""#));
    assert!(html.contains("hx-confirm="));
}

#[tokio::test]
async fn successful_send_appends_user_then_assistant() {
    let backend = ScriptedBackend::new(SendScript::Reply("hi".into()), true);
    let server = test_server(Arc::clone(&backend));

    let response = server
        .post("/chat/send")
        .form(&[("message", "hello")])
        .await;
    response.assert_status_ok();

    let fragment = response.text();
    let user = fragment.find("hello").expect("user bubble rendered");
    let assistant = fragment
        .find("assistant-message")
        .expect("assistant bubble rendered");
    assert!(fragment.contains("hi"));
    assert!(user < assistant);
    assert!(!fragment.contains("welcome-message"));

    let history = history(&server).await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["role"], "user");
    assert_eq!(entries[0]["text"], "hello");
    assert_eq!(entries[1]["role"], "assistant");
    assert_eq!(entries[1]["text"], "hi");
}

#[tokio::test]
async fn backend_rejection_renders_error_bubble() {
    let backend = ScriptedBackend::new(SendScript::Reject("rate limited".into()), true);
    let server = test_server(backend);

    let response = server
        .post("/chat/send")
        .form(&[("message", "hello")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Error: rate limited"));

    let history = history(&server).await;
    assert_eq!(history["history"][1]["text"], "Error: rate limited");
}

#[tokio::test]
async fn transport_failure_renders_error_bubble() {
    let backend = ScriptedBackend::new(SendScript::Fail("network down".into()), true);
    let server = test_server(backend);

    let response = server
        .post("/chat/send")
        .form(&[("message", "hello")])
        .await;
    response.assert_status_ok();

    let history = history(&server).await;
    let entries = history["history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["text"], "Error: network down");
}

#[tokio::test]
async fn whitespace_only_message_is_rejected_without_a_backend_call() {
    let backend = ScriptedBackend::new(SendScript::Reply("unused".into()), true);
    let server = test_server(Arc::clone(&backend));

    let response = server
        .post("/chat/send")
        .form(&[("message", "   \n  ")])
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(backend.send_calls.load(Ordering::SeqCst), 0);
    assert!(history(&server).await["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn message_is_trimmed_before_sending() {
    let backend = ScriptedBackend::new(SendScript::Reply("ok".into()), true);
    let server = test_server(Arc::clone(&backend));

    server
        .post("/chat/send")
        .form(&[("message", "  hello  ")])
        .await
        .assert_status_ok();

    assert_eq!(
        backend.last_message.lock().unwrap().as_deref(),
        Some("hello")
    );
}

#[tokio::test]
async fn confirmed_clear_resets_to_welcome_placeholder() {
    let backend = ScriptedBackend::new(SendScript::Reply("hi".into()), true);
    let server = test_server(backend);

    server
        .post("/chat/send")
        .form(&[("message", "hello")])
        .await
        .assert_status_ok();

    let response = server.post("/chat/clear").await;
    response.assert_status_ok();
    assert!(response.text().contains("welcome-message"));

    assert!(history(&server).await["history"].as_array().unwrap().is_empty());

    let page = server.get("/").await.text();
    assert!(page.contains("welcome-message"));
}

#[tokio::test]
async fn failed_clear_leaves_conversation_untouched() {
    let backend = ScriptedBackend::new(SendScript::Reply("hi".into()), false);
    let server = test_server(backend);

    server
        .post("/chat/send")
        .form(&[("message", "hello")])
        .await
        .assert_status_ok();

    let response = server.post("/chat/clear").await;
    response.assert_status(StatusCode::BAD_GATEWAY);

    let entries = history(&server).await;
    assert_eq!(entries["history"].as_array().unwrap().len(), 2);

    let page = server.get("/").await.text();
    assert!(page.contains("hello"));
    assert!(!page.contains("welcome-message"));
}

#[tokio::test]
async fn separate_browsers_get_separate_conversations() {
    let backend = ScriptedBackend::new(SendScript::Reply("hi".into()), true);
    let state = AppState {
        sessions: SessionStore::new(),
        backend,
        config: test_config(),
    };
    let app = router(state);

    let mut first = TestServer::new(app.clone()).unwrap();
    first.save_cookies();
    let mut second = TestServer::new(app).unwrap();
    second.save_cookies();

    first
        .post("/chat/send")
        .form(&[("message", "from first")])
        .await
        .assert_status_ok();

    let other = second.get("/api/history").await.json::<serde_json::Value>();
    assert!(other["history"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn history_without_a_session_is_empty() {
    let server = test_server(ScriptedBackend::new(
        SendScript::Reply("unused".into()),
        true,
    ));

    let history = history(&server).await;
    assert!(history["history"].as_array().unwrap().is_empty());
}
