use super::types::*;
use crate::{Error, Result, config::OllamaConfig};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}

pub struct OllamaClient {
    client: reqwest::Client,
    url: String,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        debug!(
            "Sending generate request to {} (model: {}, prompt: {} chars)",
            self.url,
            request.model,
            request.prompt.chars().count()
        );

        // Transport, timeout, status and body-decoding failures all become Upstream errors
        let body: Value = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !body.is_object() {
            return Err(Error::internal(format!(
                "unexpected reply from inference server: {}",
                body
            )));
        }

        let response: GenerateResponse = serde_json::from_value(body)?;

        debug!(
            "Received generate response: {} chars, eval_count={:?}, total_duration={:?}",
            response.response.chars().count(),
            response.eval_count,
            response.total_duration
        );

        Ok(response)
    }
}
