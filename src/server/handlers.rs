use super::types::{ErrorResponse, HealthResponse};
use crate::{
    Error,
    relay::{ChatRelay, ChatResponse},
};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
}

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();
    info!("Received chat request {}", request_id);

    // A header value that is not valid UTF-8 is treated as absent
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    // Body extraction failures (e.g. over the size limit) still go through auth first
    let result = match body {
        Ok(body) => state.relay.handle(authorization, &body).await,
        Err(rejection) => {
            state
                .relay
                .authenticate(authorization)
                .and(Err(Error::BodyRejected {
                    status: rejection.status(),
                    detail: rejection.body_text(),
                }))
        }
    };

    match result {
        Ok(response) => {
            info!(
                "Chat request {} completed for user {} ({} lines)",
                request_id,
                response.user,
                response.response.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                error!("Chat request {} failed: {}", request_id, e);
            } else {
                warn!("Chat request {} rejected: {}", request_id, e);
            }
            Err(error_response(&e))
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}

fn error_response(e: &Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        e.status_code(),
        Json(ErrorResponse {
            error: e.error_message(),
        }),
    )
}
