//! Job postings: inbound input, checked fields, and the upstream payload.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::schema::{is_whole, Field, FieldErrors, Schema};

/// Where the work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workplace {
    Remote,
    Onsite,
    Hybrid,
}

impl Workplace {
    pub const VALUES: &'static [&'static str] = &["remote", "onsite", "hybrid"];
}

/// Employment type, sent upstream as `work_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Fulltime,
    Parttime,
    Volunteer,
    Internship,
}

impl WorkType {
    pub const VALUES: &'static [&'static str] = &["fulltime", "parttime", "volunteer", "internship"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerStage {
    Entrylevel,
    Midlevel,
    Senior,
}

impl CareerStage {
    pub const VALUES: &'static [&'static str] = &["entrylevel", "midlevel", "senior"];
}

/// Field rules for a job create or update body.
const JOB_FIELDS: &[Field] = &[
    Field::optional_number("ID"),
    Field::text("title", "Title is required"),
    Field::text("scope", "Scope is required"),
    Field::text_list("prerequisite", false),
    Field::one_of("workplace", Workplace::VALUES, "Invalid workplace type"),
    Field::one_of("work_type", WorkType::VALUES, "Invalid work type"),
    Field::one_of("career_stage", CareerStage::VALUES, "Invalid career stage"),
    Field::text("period", "Period is required"),
    Field::text("description", "Description is required"),
    Field::numeric_text(
        "hours_per_day",
        1.0,
        24.0,
        "Hours per day must be a number between 1 and 24",
    ),
    Field::text("qualifications", "Qualifications is required"),
    Field::text("benefits", "Benefits is required"),
    Field::integer("quantity", 1.0, "Quantity is required"),
    Field::number("salary", 1.0, "Salary is required"),
];

pub const JOB_SCHEMA: Schema = Schema::new(JOB_FIELDS);

/// A job body that passed [`JOB_SCHEMA`].
///
/// Field order here is the order the upstream receives them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    pub title: String,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<Vec<String>>,
    pub workplace: Workplace,
    pub work_type: WorkType,
    pub career_stage: CareerStage,
    pub period: String,
    pub description: String,
    pub hours_per_day: String,
    pub qualifications: String,
    pub benefits: String,
    #[serde(deserialize_with = "whole_number")]
    pub quantity: u64,
    /// Kept as the caller's JSON number so it is forwarded unchanged.
    pub salary: Number,
}

impl JobInput {
    pub fn validate(input: &Map<String, Value>) -> Result<Self, FieldErrors> {
        JOB_SCHEMA.parse(input)
    }
}

/// Accepts `2` as well as `2.0`.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let n = Number::deserialize(deserializer)?;
    if let Some(v) = n.as_u64() {
        return Ok(v);
    }
    match n.as_f64() {
        Some(v) if is_whole(&n) && v >= 0.0 => Ok(v as u64),
        _ => Err(de::Error::custom(format!("expected a whole number, found {}", n))),
    }
}

/// The body sent to the upstream create/update endpoints.
///
/// Identifiers always come from the inbound path, never from the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub organization_id: u64,
    #[serde(flatten)]
    pub job: JobInput,
}

impl UpstreamJob {
    pub fn for_create(organization_id: u64, job: JobInput) -> Self {
        Self { id: None, organization_id, job }
    }

    pub fn for_update(organization_id: u64, job_id: u64, job: JobInput) -> Self {
        Self { id: Some(job_id), organization_id, job }
    }
}
