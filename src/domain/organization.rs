//! Organization profile validation.
//!
//! No upstream route accepts organizations yet; the schema is kept so callers
//! can check a profile before it is submitted elsewhere.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{Field, FieldErrors, Schema};

const ORGANIZATION_FIELDS: &[Field] = &[
    Field::object("orgPic", "Organization picture is required"),
    Field::text("bgPic", "Background Picture URL is required"),
    Field::text("name", "Name is required"),
    Field::text_list("goal", true),
    Field::text("expertise", "Expertise is required"),
    Field::text("location", "Location is required"),
    Field::text("subdistrict", "Subdistrict is required"),
    Field::text("province", "Province is required"),
    Field::text("postalCode", "Postal Code is required"),
    Field::text("latitude", "Latitude is required"),
    Field::text("longitude", "Longitude is required"),
    Field::text("email", "Email is required"),
    Field::text("phone", "Phone is required"),
    Field::object_list("orgContract", &["media", "mediaLink"]),
    Field::object_list("industry", &["industry"]),
];

pub const ORGANIZATION_SCHEMA: Schema = Schema::new(ORGANIZATION_FIELDS);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    pub org_pic: Map<String, Value>,
    pub bg_pic: String,
    pub name: String,
    pub goal: Vec<String>,
    pub expertise: String,
    pub location: String,
    pub subdistrict: String,
    pub province: String,
    pub postal_code: String,
    pub latitude: String,
    pub longitude: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub org_contract: Vec<ContactChannel>,
    #[serde(default)]
    pub industry: Vec<Industry>,
}

/// A way to reach the organization (e.g. a social profile).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactChannel {
    pub media: String,
    pub media_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub industry: String,
}

pub fn validate_organization(input: &Map<String, Value>) -> Result<OrganizationInput, FieldErrors> {
    ORGANIZATION_SCHEMA.parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> Map<String, Value> {
        json!({
            "orgPic": {},
            "bgPic": "https://cdn.example.com/bg.png",
            "name": "Green Earth",
            "goal": ["Reforestation"],
            "expertise": "Ecology",
            "location": "12 Main Rd",
            "subdistrict": "Old Town",
            "province": "North",
            "postalCode": "10200",
            "latitude": "13.75",
            "longitude": "100.50",
            "email": "hello@greenearth.org",
            "phone": "+66 2 000 0000",
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_complete_profile_passes() {
        let org = validate_organization(&profile()).unwrap();
        assert_eq!(org.postal_code, "10200");
        assert_eq!(org.goal, vec!["Reforestation".to_string()]);
    }

    #[test]
    fn test_missing_fields_are_reported_by_wire_name() {
        let mut input = profile();
        input.remove("postalCode");
        input.remove("goal");
        input.insert("orgPic".into(), json!("pic.png"));
        let errors = validate_organization(&input).unwrap_err();
        assert_eq!(errors.get("postalCode"), Some("Postal Code is required"));
        assert_eq!(errors.get("goal"), Some("Required"));
        assert_eq!(errors.get("orgPic"), Some("Expected object, received string"));
    }

    #[test]
    fn test_contacts_and_industry_tags_are_optional() {
        let org = validate_organization(&profile()).unwrap();
        assert!(org.org_contract.is_empty());

        let mut input = profile();
        input.insert(
            "orgContract".into(),
            json!([{"media": "line", "mediaLink": "https://line.me/x"}]),
        );
        input.insert("industry".into(), json!([{"industry": "Agriculture"}]));
        let org = validate_organization(&input).unwrap();
        assert_eq!(org.org_contract[0].media_link, "https://line.me/x");
        assert_eq!(org.industry[0].industry, "Agriculture");
    }

    #[test]
    fn test_malformed_contact_is_keyed_by_its_field() {
        let mut input = profile();
        input.insert("orgContract".into(), json!([{"media": 1}]));
        input.insert("industry".into(), json!("Agriculture"));
        let errors = validate_organization(&input).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("orgContract"),
            Some("media: Expected string, received number")
        );
        assert_eq!(errors.get("industry"), Some("Expected array, received string"));
        assert!(errors.get("body").is_none());
    }
}
