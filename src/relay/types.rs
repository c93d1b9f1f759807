use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub user: String,
    pub message: String,
    /// `Some("")` is an explicit empty prepend and suppresses the configured default.
    pub prepend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub user: String,
    pub response: Vec<String>,
}

impl ChatRequest {
    /// Validates an untrusted request body.
    ///
    /// A body that is not a non-empty JSON object is a missing payload. `user`
    /// and `message` count as missing when absent, null, empty or not strings.
    /// A null `prepend` is treated the same as an absent one; any other value
    /// is kept as prepend text.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) if !fields.is_empty() => fields,
            _ => return Err(Error::MissingPayload),
        };

        let (Some(user), Some(message)) = (
            non_empty_text(&fields, "user"),
            non_empty_text(&fields, "message"),
        ) else {
            return Err(Error::MissingFields);
        };

        let prepend = fields.get("prepend").and_then(prepend_text);

        Ok(Self {
            user,
            message,
            prepend,
        })
    }
}

/// Text of a supplied `prepend` value. Strings are used as-is, falsy values
/// (`false`, zero, empty array or object) become empty text and anything else
/// becomes its JSON rendering.
fn prepend_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(false) => Some(String::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Some(String::new()),
        Value::Array(items) if items.is_empty() => Some(String::new()),
        Value::Object(fields) if fields.is_empty() => Some(String::new()),
        other => Some(other.to_string()),
    }
}

fn non_empty_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}
