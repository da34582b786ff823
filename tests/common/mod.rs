//! Shared fixtures: a scripted stand-in for the Hugging Face Inference API
//! and a helper to run the relay on an ephemeral port.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use mateai::{AppConfig, Container};

/// One scripted upstream response.
#[derive(Clone, Debug)]
pub struct Reply {
    status: u16,
    body: String,
    delay: Duration,
}

impl Reply {
    pub fn generated(text: &str) -> Self {
        Self::raw(200, serde_json::json!([{ "generated_text": text }]).to_string())
    }

    pub fn status(status: u16) -> Self {
        Self::raw(status, r#"{"error": "scripted failure"}"#)
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the stub upstream.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

struct Script {
    replies: Mutex<VecDeque<Reply>>,
    hits: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
}

/// Replies are served in order; the last one repeats forever.
pub struct StubUpstream {
    pub base_url: String,
    script: Arc<Script>,
}

impl StubUpstream {
    pub async fn start(replies: Vec<Reply>) -> Self {
        let script = Arc::new(Script {
            replies: Mutex::new(replies.into()),
            hits: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(respond).with_state(Arc::clone(&script));
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server");
        });

        Self {
            base_url: format!("http://{addr}"),
            script,
        }
    }

    pub fn hits(&self) -> usize {
        self.script.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.requests.lock().expect("lock").clone()
    }
}

async fn respond(
    State(script): State<Arc<Script>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    script.hits.fetch_add(1, Ordering::SeqCst);
    script.requests.lock().expect("lock").push(Recorded {
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    });

    let reply = {
        let mut replies = script.replies.lock().expect("lock");
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    }
    .unwrap_or_else(|| Reply::status(500));

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    let status = StatusCode::from_u16(reply.status).expect("valid status");
    (status, reply.body)
}

/// Configuration pointing at `upstream`, with prompts and rate limiting off.
pub fn test_config(upstream: &StubUpstream) -> AppConfig {
    let mut config = AppConfig::default();
    config.huggingface.api_url = upstream.base_url.clone();
    config.huggingface.model = "test/model".to_string();
    config.huggingface.api_key = "test-key".to_string();
    config.prompts.system_path = None;
    config.prompts.style_path = None;
    config.prompts.safety_path = None;
    config.rate_limiting.enabled = false;
    config
}

/// Serve the relay on an ephemeral port and return its base URL.
pub async fn spawn_app(config: AppConfig) -> String {
    spawn_container(Arc::new(Container::new(config).expect("container"))).await
}

/// Serve an already wired container on an ephemeral port.
pub async fn spawn_container(container: Arc<Container>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind app");
    let addr = listener.local_addr().expect("app addr");
    tokio::spawn(mateai::serve(listener, container, std::future::pending()));
    format!("http://{addr}")
}
