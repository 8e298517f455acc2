//! Turning an upstream reply into what the caller sees.
//!
//! - 2xx: body relayed byte-for-byte with the upstream status, once it is
//!   known to be JSON
//! - anything else: the body's `message` relayed under `errors` with the
//!   upstream status, or a per-route fallback when `message` is missing
//!   or falsy
//! - a body that is not JSON is a malformed reply in either case

use axum::body::Bytes;
use axum::http::StatusCode;
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::upstream::client::UpstreamReply;

#[derive(Debug, Clone, PartialEq)]
pub enum Relay {
    /// Upstream accepted the request.
    Success { status: StatusCode, body: Bytes },
    /// Upstream reported a failure of its own.
    Rejected { status: StatusCode, message: Value },
}

pub fn classify(reply: UpstreamReply, fallback: &str) -> Result<Relay, serde_json::Error> {
    let UpstreamReply { status, body } = reply;

    if status.is_success() {
        serde_json::from_slice::<IgnoredAny>(&body)?;
        return Ok(Relay::Success { status, body });
    }

    let parsed: Value = serde_json::from_slice(&body)?;
    let message = match parsed.get("message") {
        Some(m) if truthy(m) => m.clone(),
        _ => Value::String(fallback.to_string()),
    };
    Ok(Relay::Rejected { status, message })
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
