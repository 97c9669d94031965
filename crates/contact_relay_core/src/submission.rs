use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ClientInputError, RelayError, UnexpectedFault};

pub const REQUIRED_FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

/// A contact form submission whose required fields are all present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl SubmissionInput {
    /// Extracts a submission from a decoded request body.
    ///
    /// A JSON `null` body is a fault. Any other non-object body simply has no
    /// fields and is rejected as missing input.
    pub fn from_body(body: &Value) -> Result<Self, RelayError> {
        let empty = Map::new();
        let fields = match body {
            Value::Null => return Err(UnexpectedFault::NullBody.into()),
            Value::Object(fields) => fields,
            _ => &empty,
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|name| field_text(fields, name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ClientInputError::MissingRequiredFields { missing }.into());
        }

        let required = |name: &str| field_text(fields, name).unwrap_or_default();
        Ok(Self {
            name: required("name"),
            email: required("email"),
            phone: field_text(fields, "phone"),
            subject: required("subject"),
            message: required("message"),
        })
    }
}

/// Text of a field that counts as present.
///
/// `null`, `false`, `0`, `""` and missing keys are absent. Strings are used
/// as-is (no trimming), other present values as their JSON text.
fn field_text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    match fields.get(name)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
