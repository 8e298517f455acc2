//! Organization members.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{Field, FieldErrors, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const VALUES: &'static [&'static str] = &["Admin", "User"];
}

const MEMBER_FIELDS: &[Field] = &[
    Field::text("name", "Name is required"),
    Field::email("email", "Invalid email address"),
    Field::one_of("role", Role::VALUES, "Invalid role"),
];

pub const MEMBER_SCHEMA: Schema = Schema::new(MEMBER_FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl MemberInput {
    pub fn validate(input: &Map<String, Value>) -> Result<Self, FieldErrors> {
        MEMBER_SCHEMA.parse(input)
    }
}

/// Body for the upstream add-member endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamMember {
    pub organization_id: u64,
    #[serde(flatten)]
    pub member: MemberInput,
}
