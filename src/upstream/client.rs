//! Outbound HTTP client for the upstream backend.
//!
//! # Responsibilities
//! - Resolve path templates against the upstream base URL
//! - Send one JSON request per call and buffer the reply
//! - Propagate the inbound request id
//!
//! # Design Decisions
//! - A single attempt per call: no retries, no client-side timeout
//! - Reply bodies are buffered; every relay path needs the whole body

use axum::body::Bytes;
use axum::http::{header, HeaderValue, Method, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::{UpstreamConfig, UpstreamPaths};
use crate::http::X_REQUEST_ID;

/// Error type for upstream calls.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Upstream endpoints the gateway knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CreateJob { org_id: u64 },
    UpdateJob { org_id: u64, job_id: u64 },
    ListJobs { org_id: u64 },
    AddMember,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CreateJob { .. } | Endpoint::AddMember => Method::POST,
            Endpoint::UpdateJob { .. } => Method::PUT,
            Endpoint::ListJobs { .. } => Method::GET,
        }
    }

    /// Label used for metrics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::CreateJob { .. } => "create_job",
            Endpoint::UpdateJob { .. } => "update_job",
            Endpoint::ListJobs { .. } => "list_jobs",
            Endpoint::AddMember => "add_member",
        }
    }

    /// Fill the configured template for this endpoint.
    pub fn path(&self, paths: &UpstreamPaths) -> String {
        match *self {
            Endpoint::CreateJob { org_id } => fill(&paths.create_job, org_id, None),
            Endpoint::UpdateJob { org_id, job_id } => fill(&paths.update_job, org_id, Some(job_id)),
            Endpoint::ListJobs { org_id } => fill(&paths.list_jobs, org_id, None),
            Endpoint::AddMember => paths.add_member.clone(),
        }
    }
}

fn fill(template: &str, org_id: u64, job_id: Option<u64>) -> String {
    let path = template.replace("{org_id}", &org_id.to_string());
    match job_id {
        Some(id) => path.replace("{job_id}", &id.to_string()),
        None => path,
    }
}

/// A buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Client bound to one upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    paths: UpstreamPaths,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            http,
            base_url: Url::parse(&config.base_url)?,
            paths: config.paths.clone(),
        })
    }

    /// Absolute URL for `endpoint`; an absolute template path replaces the
    /// base URL's path.
    pub fn url(&self, endpoint: Endpoint) -> Result<Url, UpstreamError> {
        Ok(self.base_url.join(&endpoint.path(&self.paths))?)
    }

    /// Send `payload` (if any) as JSON to `endpoint` and buffer the reply.
    pub async fn send<T: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        payload: Option<&T>,
        request_id: Option<&HeaderValue>,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = self.url(endpoint)?;
        tracing::debug!(endpoint = endpoint.name(), url = %url, "Forwarding to upstream");

        let mut request = self
            .http
            .request(endpoint.method(), url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id.clone());
        }
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base.to_string(),
            paths: UpstreamPaths::default(),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_methods() {
        assert_eq!(Endpoint::CreateJob { org_id: 1 }.method(), Method::POST);
        assert_eq!(Endpoint::UpdateJob { org_id: 1, job_id: 2 }.method(), Method::PUT);
        assert_eq!(Endpoint::ListJobs { org_id: 1 }.method(), Method::GET);
        assert_eq!(Endpoint::AddMember.method(), Method::POST);
    }

    #[test]
    fn test_default_templates_resolve() {
        let c = client("http://backend:8000");
        assert_eq!(
            c.url(Endpoint::CreateJob { org_id: 5 }).unwrap().as_str(),
            "http://backend:8000/org/5/open-job"
        );
        assert_eq!(
            c.url(Endpoint::UpdateJob { org_id: 5, job_id: 9 }).unwrap().as_str(),
            "http://backend:8000/org/5/update-job/9"
        );
        assert_eq!(
            c.url(Endpoint::ListJobs { org_id: 5 }).unwrap().as_str(),
            "http://backend:8000/org/5/list-jobs"
        );
        assert_eq!(
            c.url(Endpoint::AddMember).unwrap().as_str(),
            "http://backend:8000/api/org/add-member"
        );
    }

    #[test]
    fn test_absolute_template_replaces_base_path() {
        let c = client("http://backend:8000/v1/");
        assert_eq!(
            c.url(Endpoint::ListJobs { org_id: 2 }).unwrap().as_str(),
            "http://backend:8000/org/2/list-jobs"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = UpstreamClient::new(&UpstreamConfig {
            base_url: "not a url".into(),
            paths: UpstreamPaths::default(),
        });
        assert!(matches!(result, Err(UpstreamError::InvalidUrl(_))));
    }
}
