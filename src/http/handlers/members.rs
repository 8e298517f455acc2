//! Member routes.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use super::{both, forward, json_body};
use crate::domain::{object_body, path_id, MemberInput, UpstreamMember};
use crate::http::response::ApiResult;
use crate::http::server::AppState;
use crate::upstream::Endpoint;

pub const ADD_FALLBACK: &str = "Failed to add member";

/// `POST /api/org/{org_id}/add-member`
pub async fn add_member(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let body = json_body(&body)?;
    let (organization_id, member) = both(
        path_id("orgId", &org_id),
        object_body(&body).and_then(MemberInput::validate),
    )?;

    let payload = UpstreamMember { organization_id, member };
    forward(&state, Endpoint::AddMember, Some(&payload), &headers, ADD_FALLBACK).await
}
