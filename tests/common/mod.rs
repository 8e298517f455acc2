//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use org_gateway::config::GatewayConfig;
use org_gateway::http::HttpServer;
use org_gateway::lifecycle::Shutdown;
use org_gateway::upstream::UpstreamClient;
use serde_json::Value;
use tokio::net::TcpListener;

/// One request as the mock upstream saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub raw_body: Bytes,
    pub request_id: Option<String>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    calls: Arc<Mutex<Vec<Captured>>>,
}

/// A mock upstream that answers every request with a fixed reply and
/// records what it received.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> Vec<Captured> {
        self.calls.lock().unwrap().clone()
    }
}

async fn capture(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.calls.lock().unwrap().push(Captured {
        method,
        path: uri.path().to_string(),
        body: serde_json::from_slice(&body).ok(),
        raw_body: body,
        request_id: headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

/// Start a programmable upstream on an ephemeral port.
pub async fn start_upstream(status: u16, body: &'static str) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        calls: calls.clone(),
    };

    let app = Router::new().fallback(capture).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockUpstream { addr, calls }
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// HTTP client that ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub fn test_config(upstream_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.listener.internal_base_url = "http://127.0.0.1".into();
    config.upstream.base_url = upstream_url.to_string();
    config
}

/// A running gateway; shuts down when dropped.
pub struct Gateway {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Gateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the gateway on an ephemeral port in front of `upstream_url`.
pub async fn start_gateway(upstream_url: &str) -> Gateway {
    let config = test_config(upstream_url);
    let upstream = UpstreamClient::with_client(client(), &config.upstream).unwrap();
    let server = HttpServer::with_upstream(config, upstream);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Gateway { addr, shutdown }
}

pub fn valid_job() -> Value {
    serde_json::json!({
        "title": "Backend Engineer",
        "scope": "Payments platform",
        "prerequisite": ["Rust", "SQL"],
        "workplace": "remote",
        "work_type": "fulltime",
        "career_stage": "senior",
        "period": "12 months",
        "description": "Own the settlement pipeline",
        "hours_per_day": "8",
        "qualifications": "5 years backend experience",
        "benefits": "Health insurance",
        "quantity": 2,
        "salary": 85000,
    })
}
