mod types;

pub use types::{ChatRequest, ChatResponse};

use crate::{
    Error, Result,
    config::Config,
    llm::{GenerateRequest, LlmClient},
};
use std::sync::Arc;
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticates, builds the prompt, calls the inference server and splits
/// its reply into lines. Holds no per-request state.
pub struct ChatRelay {
    llm: Arc<dyn LlmClient>,
    model: String,
    default_prepend: String,
    api_key: String,
}

impl ChatRelay {
    pub fn new(llm: Arc<dyn LlmClient>, config: &Config) -> Self {
        Self {
            llm,
            model: config.ollama.model.clone(),
            default_prepend: config.relay.prepend_statement.clone(),
            api_key: config.relay.api_key.clone(),
        }
    }

    pub fn authenticate(&self, authorization: Option<&str>) -> Result<()> {
        authenticate(authorization, &self.api_key)
    }

    pub async fn handle(&self, authorization: Option<&str>, body: &[u8]) -> Result<ChatResponse> {
        self.authenticate(authorization)?;

        let request = ChatRequest::from_body(body)?;
        info!("Relaying chat message for user: {}", request.user);

        let prompt = build_prompt(
            request.prepend.as_deref(),
            &self.default_prepend,
            &request.message,
        );

        let reply = self
            .llm
            .generate(GenerateRequest::new(&self.model, prompt))
            .await?;

        let response = split_lines(&reply.response);
        debug!(
            "Inference reply for user {} split into {} lines",
            request.user,
            response.len()
        );

        Ok(ChatResponse {
            user: request.user,
            response,
        })
    }
}

/// Checks a raw `Authorization` header value against the configured key.
// TODO: switch to a constant-time comparison for the key check.
pub fn authenticate(authorization: Option<&str>, api_key: &str) -> Result<()> {
    let token = authorization
        .and_then(|header| header.strip_prefix(BEARER_PREFIX))
        .ok_or(Error::Unauthorized)?;

    if token != api_key {
        return Err(Error::Forbidden);
    }

    Ok(())
}

/// Joins the effective prepend text and the message. A request-supplied
/// prepend, even an empty one, replaces `default_prepend`.
pub fn build_prompt(prepend: Option<&str>, default_prepend: &str, message: &str) -> String {
    let prepend_text = prepend.unwrap_or(default_prepend);
    if prepend_text.is_empty() {
        message.to_string()
    } else {
        format!("{}\n{}", prepend_text, message)
    }
}

/// Splits on `\n`, dropping blank and whitespace-only segments. Kept segments are
/// returned verbatim and in order.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
