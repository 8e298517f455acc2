use std::collections::BTreeMap;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A job posting as the console submits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub title: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisite: Vec<String>,
    pub workplace: String, // "remote", "onsite" or "hybrid"
    pub work_type: String, // "fulltime", "parttime", "volunteer" or "internship"
    pub career_stage: String, // "entrylevel", "midlevel" or "senior"
    pub period: String,
    pub description: String,
    pub hours_per_day: String,
    pub qualifications: String,
    pub benefits: String,
    pub quantity: u64,
    pub salary: f64,
}

/// A job posting as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(alias = "ID")]
    pub id: u64,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub draft: JobDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub email: String,
    pub role: String, // "Admin" or "User"
}

#[derive(Debug)]
pub enum ClientError {
    /// The gateway rejected the body; field name → message.
    Validation(BTreeMap<String, String>),
    /// The gateway or the backend behind it reported a failure.
    Rejected { status: StatusCode, errors: Value },
    /// The request never completed or the reply was not understood.
    Transport(reqwest::Error),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Validation(fields) => {
                write!(f, "validation failed: ")?;
                for (i, (field, message)) in fields.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}: {}", field, message)?;
                }
                Ok(())
            }
            ClientError::Rejected { status, errors } => write!(f, "gateway returned {}: {}", status, errors),
            ClientError::Transport(e) => write!(f, "transport error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e)
    }
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(Client::new(), gateway_url)
    }

    pub fn with_client(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_jobs(&self, org_id: u64) -> Result<Vec<Job>, ClientError> {
        let resp = self.client
            .get(format!("{}/api/org/{}/get-jobs", self.gateway_url, org_id))
            .send()
            .await?;
        decode(resp).await
    }

    /// Create a job. The backend's reply is returned as-is.
    pub async fn create_job(&self, org_id: u64, draft: &JobDraft) -> Result<Value, ClientError> {
        let resp = self.client
            .post(format!("{}/api/org/{}/add-job", self.gateway_url, org_id))
            .json(draft)
            .send()
            .await?;
        decode(resp).await
    }

    /// Replace a job. The backend's reply is returned as-is.
    pub async fn update_job(&self, org_id: u64, job_id: u64, draft: &JobDraft) -> Result<Value, ClientError> {
        let resp = self.client
            .put(format!("{}/api/org/{}/update-job/{}", self.gateway_url, org_id, job_id))
            .json(draft)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn add_member(&self, org_id: u64, member: &Member) -> Result<Value, ClientError> {
        let resp = self.client
            .post(format!("{}/api/org/{}/add-member", self.gateway_url, org_id))
            .json(member)
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let body: Value = resp.json().await?;
    let errors = body.get("errors").cloned().unwrap_or(Value::Null);
    if status == StatusCode::BAD_REQUEST {
        if let Ok(fields) = serde_json::from_value::<BTreeMap<String, String>>(errors.clone()) {
            return Err(ClientError::Validation(fields));
        }
    }
    Err(ClientError::Rejected { status, errors })
}
