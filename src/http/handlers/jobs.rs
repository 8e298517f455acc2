//! Job routes: create, update, list.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use super::{both, forward, json_body};
use crate::domain::{object_body, path_id, JobInput, UpstreamJob};
use crate::http::response::ApiResult;
use crate::http::server::AppState;
use crate::upstream::Endpoint;

pub const CREATE_FALLBACK: &str = "Failed to add job";
pub const UPDATE_FALLBACK: &str = "Failed to update job";
pub const LIST_FALLBACK: &str = "Failed to fetch jobs";

/// `POST /api/org/{org_id}/add-job`
pub async fn create_job(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let body = json_body(&body)?;
    let (org_id, job) = both(
        path_id("orgId", &org_id),
        object_body(&body).and_then(JobInput::validate),
    )?;

    let payload = UpstreamJob::for_create(org_id, job);
    forward(
        &state,
        Endpoint::CreateJob { org_id },
        Some(&payload),
        &headers,
        CREATE_FALLBACK,
    )
    .await
}

/// `PUT /api/org/{org_id}/update-job/{job_id}`
pub async fn update_job(
    State(state): State<AppState>,
    Path((org_id, job_id)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let body = json_body(&body)?;
    let ((org_id, job_id), job) = both(
        both(path_id("orgId", &org_id), path_id("jobId", &job_id)),
        object_body(&body).and_then(JobInput::validate),
    )?;

    let payload = UpstreamJob::for_update(org_id, job_id, job);
    forward(
        &state,
        Endpoint::UpdateJob { org_id, job_id },
        Some(&payload),
        &headers,
        UPDATE_FALLBACK,
    )
    .await
}

/// `GET /api/org/{org_id}/get-jobs`
pub async fn list_jobs(
    State(state): State<AppState>,
    Path(org_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let org_id = path_id("orgId", &org_id)?;
    forward::<()>(
        &state,
        Endpoint::ListJobs { org_id },
        None,
        &headers,
        LIST_FALLBACK,
    )
    .await
}
