//! Declarative field validation for untyped JSON bodies.
//!
//! # Responsibilities
//! - Describe an input shape as a static list of field rules
//! - Check a JSON object against that list without touching the web layer
//! - Report one human-readable message per invalid field
//!
//! # Design Decisions
//! - Returns all field errors, not just the first
//! - Validation is a pure function: `&Map → FieldErrors`
//! - Type mismatches get a generic message; every other failure uses the
//!   message declared next to the rule
//! - Unknown fields are ignored (they are dropped when the checked map is
//!   deserialized into a typed input)
//! - An explicit `null` is a type mismatch, not an absent field

mod errors;

pub use errors::FieldErrors;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// What a single field must look like.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// A string with at least one character.
    Text,
    /// A string drawn from a fixed value set.
    OneOf(&'static [&'static str]),
    /// A string containing an `@`.
    Email,
    /// A string that parses as a number within `min..=max`.
    NumericText { min: f64, max: f64 },
    /// A number no smaller than `min`, optionally restricted to whole values
    /// (`2` and `2.0` are both whole).
    Number { min: f64, integer: bool },
    /// A number, or absent.
    OptionalNumber,
    /// An array of strings.
    TextList { required: bool },
    /// An optional array of objects whose listed keys all hold strings.
    ObjectList(&'static [&'static str]),
    /// Any JSON object.
    Object,
}

/// A named field, its rule, and the message reported when the rule fails.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub rule: Rule,
    pub message: &'static str,
}

impl Field {
    pub const fn text(name: &'static str, message: &'static str) -> Self {
        Self { name, rule: Rule::Text, message }
    }

    pub const fn one_of(
        name: &'static str,
        values: &'static [&'static str],
        message: &'static str,
    ) -> Self {
        Self { name, rule: Rule::OneOf(values), message }
    }

    pub const fn email(name: &'static str, message: &'static str) -> Self {
        Self { name, rule: Rule::Email, message }
    }

    pub const fn numeric_text(name: &'static str, min: f64, max: f64, message: &'static str) -> Self {
        Self { name, rule: Rule::NumericText { min, max }, message }
    }

    pub const fn number(name: &'static str, min: f64, message: &'static str) -> Self {
        Self { name, rule: Rule::Number { min, integer: false }, message }
    }

    pub const fn integer(name: &'static str, min: f64, message: &'static str) -> Self {
        Self { name, rule: Rule::Number { min, integer: true }, message }
    }

    pub const fn optional_number(name: &'static str) -> Self {
        Self { name, rule: Rule::OptionalNumber, message: "" }
    }

    pub const fn text_list(name: &'static str, required: bool) -> Self {
        Self { name, rule: Rule::TextList { required }, message: "" }
    }

    pub const fn object_list(name: &'static str, keys: &'static [&'static str]) -> Self {
        Self { name, rule: Rule::ObjectList(keys), message: "" }
    }

    pub const fn object(name: &'static str, message: &'static str) -> Self {
        Self { name, rule: Rule::Object, message }
    }

    /// Check this field against `input`, returning the failure message if any.
    fn check(&self, input: &Map<String, Value>) -> Option<String> {
        let value = match input.get(self.name) {
            None => return self.missing(),
            Some(Value::Null) => return Some(mismatch(self.rule.expected(), &Value::Null)),
            Some(v) => v,
        };

        match self.rule {
            Rule::Text => match value {
                Value::String(s) if s.is_empty() => Some(self.message.to_string()),
                Value::String(_) => None,
                other => Some(mismatch("string", other)),
            },
            Rule::OneOf(values) => match value {
                Value::String(s) if values.contains(&s.as_str()) => None,
                _ => Some(self.message.to_string()),
            },
            Rule::Email => match value {
                Value::String(s) if s.contains('@') => None,
                Value::String(_) => Some(self.message.to_string()),
                other => Some(mismatch("string", other)),
            },
            Rule::NumericText { min, max } => match value {
                Value::String(s) => match parse_number(s) {
                    Some(n) if n >= min && n <= max => None,
                    _ => Some(self.message.to_string()),
                },
                other => Some(mismatch("string", other)),
            },
            Rule::Number { min, integer } => match value {
                Value::Number(n) => {
                    let whole = is_whole(n);
                    let below = n.as_f64().map_or(true, |v| v < min);
                    if below {
                        Some(self.message.to_string())
                    } else if integer && !whole {
                        Some(format!("{} must be a whole number", label(self.name)))
                    } else {
                        None
                    }
                }
                other => Some(mismatch("number", other)),
            },
            Rule::OptionalNumber => match value {
                Value::Number(_) => None,
                other => Some(mismatch("number", other)),
            },
            Rule::TextList { .. } => match value {
                Value::Array(items) => items
                    .iter()
                    .find(|item| !item.is_string())
                    .map(|item| mismatch("string", item)),
                other => Some(mismatch("array", other)),
            },
            Rule::ObjectList(keys) => match value {
                Value::Array(items) => items.iter().find_map(|item| check_entry(item, keys)),
                other => Some(mismatch("array", other)),
            },
            Rule::Object => match value {
                Value::Object(_) => None,
                other => Some(mismatch("object", other)),
            },
        }
    }

    fn missing(&self) -> Option<String> {
        match self.rule {
            Rule::OptionalNumber | Rule::TextList { required: false } | Rule::ObjectList(_) => None,
            Rule::TextList { required: true } => Some("Required".to_string()),
            _ => Some(self.message.to_string()),
        }
    }
}

impl Rule {
    /// JSON kind named in a type-mismatch message.
    fn expected(&self) -> &'static str {
        match self {
            Rule::Text | Rule::OneOf(_) | Rule::Email | Rule::NumericText { .. } => "string",
            Rule::Number { .. } | Rule::OptionalNumber => "number",
            Rule::TextList { .. } | Rule::ObjectList(_) => "array",
            Rule::Object => "object",
        }
    }
}

/// A static list of field rules describing one input shape.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Check every field, collecting one message per invalid field.
    pub fn check(&self, input: &Map<String, Value>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for field in self.fields {
            if let Some(message) = field.check(input) {
                errors.insert(field.name, message);
            }
        }
        errors
    }

    /// Check `input` and, when it passes, deserialize it into `T`.
    ///
    /// A serde failure after a clean check means the schema and `T` disagree;
    /// it is reported as a `body` field error rather than a panic.
    pub fn parse<T: DeserializeOwned>(&self, input: &Map<String, Value>) -> Result<T, FieldErrors> {
        let errors = self.check(input);
        if !errors.is_empty() {
            return Err(errors);
        }
        serde_json::from_value(Value::Object(input.clone())).map_err(|e| {
            tracing::warn!(error = %e, "Checked input failed to deserialize");
            FieldErrors::single("body", e.to_string())
        })
    }
}

/// Parse a numeric string the way a lenient form field would (surrounding
/// whitespace allowed, empty rejected).
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Whether `n` holds a whole value that fits a `u64` or `i64`.
pub fn is_whole(n: &serde_json::Number) -> bool {
    if n.is_u64() || n.is_i64() {
        return true;
    }
    n.as_f64()
        .is_some_and(|v| v.fract() == 0.0 && v >= i64::MIN as f64 && v < u64::MAX as f64)
}

fn check_entry(item: &Value, keys: &[&str]) -> Option<String> {
    let Value::Object(entry) = item else {
        return Some(mismatch("object", item));
    };
    keys.iter().find_map(|key| match entry.get(*key) {
        None => Some(format!("{} is required", key)),
        Some(Value::String(_)) => None,
        Some(other) => Some(format!("{}: {}", key, mismatch("string", other))),
    })
}

fn mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {}, received {}", expected, kind_of(received))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `hours_per_day` → `Hours per day`.
fn label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE_FIELDS: &[Field] = &[
        Field::text("title", "Title is required"),
        Field::one_of("mode", &["a", "b"], "Invalid mode"),
        Field::numeric_text("hours", 1.0, 24.0, "Hours must be between 1 and 24"),
        Field::integer("quantity", 1.0, "Quantity is required"),
        Field::number("salary", 1.0, "Salary is required"),
        Field::text_list("tags", false),
        Field::optional_number("ID"),
        Field::email("email", "Invalid email address"),
        Field::object_list("links", &["label", "href"]),
    ];

    const SAMPLE: Schema = Schema::new(SAMPLE_FIELDS);

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn valid() -> Map<String, Value> {
        object(json!({
            "title": "Engineer",
            "mode": "a",
            "hours": "8",
            "quantity": 2,
            "salary": 1500.5,
            "email": "dev@example.com",
        }))
    }

    #[test]
    fn test_valid_input_has_no_errors() {
        assert!(SAMPLE.check(&valid()).is_empty());
    }

    #[test]
    fn test_missing_and_empty_text_use_declared_message() {
        let mut input = valid();
        input.insert("title".into(), json!(""));
        let errors = SAMPLE.check(&input);
        assert_eq!(errors.get("title"), Some("Title is required"));

        input.remove("title");
        let errors = SAMPLE.check(&input);
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_type_mismatch_reports_kinds() {
        let mut input = valid();
        input.insert("title".into(), json!(42));
        input.insert("hours".into(), json!(8));
        let errors = SAMPLE.check(&input);
        assert_eq!(errors.get("title"), Some("Expected string, received number"));
        assert_eq!(errors.get("hours"), Some("Expected string, received number"));
    }

    #[test]
    fn test_enum_outside_value_set() {
        let mut input = valid();
        input.insert("mode".into(), json!("c"));
        assert_eq!(SAMPLE.check(&input).get("mode"), Some("Invalid mode"));
    }

    #[test]
    fn test_numeric_text_bounds() {
        for (raw, ok) in [("1", true), ("24", true), (" 7.5 ", true), ("0", false), ("25", false), ("", false), ("abc", false)] {
            let mut input = valid();
            input.insert("hours".into(), json!(raw));
            assert_eq!(SAMPLE.check(&input).is_empty(), ok, "hours = {:?}", raw);
        }
    }

    #[test]
    fn test_integer_rule_rejects_fractions_and_small_values() {
        let mut input = valid();
        input.insert("quantity".into(), json!(0));
        assert_eq!(SAMPLE.check(&input).get("quantity"), Some("Quantity is required"));

        input.insert("quantity".into(), json!(2.5));
        assert_eq!(
            SAMPLE.check(&input).get("quantity"),
            Some("Quantity must be a whole number")
        );
    }

    #[test]
    fn test_optional_fields_may_be_absent_but_not_mistyped() {
        let mut input = valid();
        assert!(SAMPLE.check(&input).is_empty());

        input.insert("tags".into(), json!(["rust", 3]));
        input.insert("ID".into(), json!("7"));
        let errors = SAMPLE.check(&input);
        assert_eq!(errors.get("tags"), Some("Expected string, received number"));
        assert_eq!(errors.get("ID"), Some("Expected number, received string"));
    }

    #[test]
    fn test_collects_every_invalid_field() {
        let errors = SAMPLE.check(&Map::new());
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_integer_rule_accepts_whole_floats() {
        let mut input = valid();
        input.insert("quantity".into(), json!(2.0));
        assert!(SAMPLE.check(&input).is_empty());

        input.insert("quantity".into(), json!(1e300));
        assert_eq!(
            SAMPLE.check(&input).get("quantity"),
            Some("Quantity must be a whole number")
        );
    }

    #[test]
    fn test_explicit_null_is_a_type_mismatch() {
        let mut input = valid();
        input.insert("title".into(), json!(null));
        input.insert("mode".into(), json!(null));
        input.insert("tags".into(), json!(null));
        input.insert("ID".into(), json!(null));
        let errors = SAMPLE.check(&input);
        assert_eq!(errors.get("title"), Some("Expected string, received null"));
        assert_eq!(errors.get("mode"), Some("Expected string, received null"));
        assert_eq!(errors.get("tags"), Some("Expected array, received null"));
        assert_eq!(errors.get("ID"), Some("Expected number, received null"));
    }

    #[test]
    fn test_email_rule() {
        let mut input = valid();
        input.insert("email".into(), json!("dev.example.com"));
        assert_eq!(SAMPLE.check(&input).get("email"), Some("Invalid email address"));

        input.insert("email".into(), json!(7));
        assert_eq!(SAMPLE.check(&input).get("email"), Some("Expected string, received number"));
    }

    #[test]
    fn test_object_list_entries_are_checked_by_key() {
        let mut input = valid();
        input.insert("links".into(), json!([{"label": "site", "href": "https://x.io"}]));
        assert!(SAMPLE.check(&input).is_empty());

        input.insert("links".into(), json!([{"label": 1, "href": "https://x.io"}]));
        assert_eq!(
            SAMPLE.check(&input).get("links"),
            Some("label: Expected string, received number")
        );

        input.insert("links".into(), json!([{"label": "site"}]));
        assert_eq!(SAMPLE.check(&input).get("links"), Some("href is required"));

        input.insert("links".into(), json!(["site"]));
        assert_eq!(
            SAMPLE.check(&input).get("links"),
            Some("Expected object, received string")
        );
    }

    #[test]
    fn test_label_formatting() {
        assert_eq!(label("hours_per_day"), "Hours per day");
        assert_eq!(label(""), "");
    }
}
