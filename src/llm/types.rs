use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// Body of a non-streaming `POST /api/generate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Reply of the generate endpoint. Only `response` matters to the relay; the
/// rest is kept for logging. Every field tolerates a missing or mistyped value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub response: String,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub done: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub eval_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_duration: Option<u64>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
