use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use ollama_relay::{
    config::Config,
    llm::LlmClient,
    relay::ChatRelay,
    server::{build_app, handlers::AppState},
};
use serde_json::Value;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "test-api-key";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.logs.level = "debug".to_string();
    config.relay.api_key = TEST_API_KEY.to_string();
    config
}

/// Build the full router around any inference client
pub fn create_test_app(llm: Arc<dyn LlmClient>, config: &Config) -> Router {
    let relay = ChatRelay::new(llm, config);
    build_app(AppState {
        relay: Arc::new(relay),
    })
}

pub fn chat_request(authorization: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(body.into()).unwrap()
}

pub fn bearer() -> String {
    format!("Bearer {}", TEST_API_KEY)
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
