//! Records that cross the gateway and the rules their inbound bodies follow.
//!
//! # Data Flow
//! ```text
//! untyped JSON body + path ids
//!     → object_body / path_id (shape of the envelope)
//!     → <Record>Input::validate (schema check, typed parse)
//!     → Upstream<Record> (renamed/reordered payload with path ids injected)
//! ```

pub mod job;
pub mod member;
pub mod organization;

pub use job::{CareerStage, JobInput, UpstreamJob, WorkType, Workplace};
pub use member::{MemberInput, Role, UpstreamMember};
pub use organization::{validate_organization, OrganizationInput};

use serde_json::{Map, Value};

use crate::schema::FieldErrors;

/// Parse a numeric path segment such as `orgId`.
pub fn path_id(field: &str, raw: &str) -> Result<u64, FieldErrors> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| FieldErrors::single(field, format!("{} must be a non-negative integer", field)))
}

/// Require the body to be a JSON object.
pub fn object_body(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object()
        .ok_or_else(|| FieldErrors::single("body", "Expected object"))
}
