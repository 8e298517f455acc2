//! Route handlers.
//!
//! Every write handler follows the same three steps: check the path ids and
//! body, build the upstream payload, forward once and relay. The read
//! handler skips the first step.

pub mod health;
pub mod jobs;
pub mod members;

use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::http::request::RequestIdExt;
use crate::http::response::{ApiError, ApiResult};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::schema::FieldErrors;
use crate::upstream::{classify, Endpoint, Relay};

/// Parse the raw body as JSON; anything unparseable is an unexpected error.
fn json_body(body: &Bytes) -> ApiResult<Value> {
    Ok(serde_json::from_slice(body)?)
}

/// Combine two checks so the caller sees every field error at once.
fn both<A, B>(a: Result<A, FieldErrors>, b: Result<B, FieldErrors>) -> Result<(A, B), FieldErrors> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(mut left), Err(right)) => {
            left.merge(right);
            Err(left)
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

/// Send one request upstream and turn the reply into the caller's response.
async fn forward<T: Serialize + ?Sized>(
    state: &AppState,
    endpoint: Endpoint,
    payload: Option<&T>,
    headers: &HeaderMap,
    fallback: &str,
) -> ApiResult<Response> {
    let reply = state
        .upstream
        .send(endpoint, payload, headers.request_id())
        .await
        .inspect_err(|_| metrics::record_upstream(endpoint.name(), "transport_error"))?;

    let relay = classify(reply, fallback)
        .inspect_err(|_| metrics::record_upstream(endpoint.name(), "malformed"))?;

    match relay {
        Relay::Success { status, body } => {
            metrics::record_upstream(endpoint.name(), "success");
            Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        Relay::Rejected { status, message } => {
            tracing::warn!(
                endpoint = endpoint.name(),
                status = %status,
                message = %message,
                "Upstream rejected request"
            );
            metrics::record_upstream(endpoint.name(), "rejected");
            Err(ApiError::Rejected { status, message })
        }
    }
}
