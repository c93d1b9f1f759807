use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing or invalid Authorization header")]
    Unauthorized,

    #[error("Invalid API key")]
    Forbidden,

    #[error("No JSON payload provided")]
    MissingPayload,

    #[error("Both 'user' and 'message' fields are required")]
    MissingFields,

    #[error("{detail}")]
    BodyRejected { status: StatusCode, detail: String },

    #[error("Ollama API error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::MissingPayload | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::BodyRejected { status, .. } => *status,
            Self::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the JSON body returned to callers.
    pub fn error_message(&self) -> String {
        match self {
            Self::Internal(detail) => format!("Internal server error: {}", detail),
            Self::BodyRejected { detail, .. } => detail.clone(),
            e if e.status_code() == StatusCode::INTERNAL_SERVER_ERROR => {
                format!("Internal server error: {}", e)
            }
            e => e.to_string(),
        }
    }
}
