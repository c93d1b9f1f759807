pub mod handlers;
mod types;

pub use types::{ErrorResponse, HealthResponse};

use crate::{
    Result,
    config::{Config, DEFAULT_API_KEY},
    llm::OllamaClient,
    relay::ChatRelay,
};
use axum::{
    Router,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let llm = OllamaClient::new(&config.ollama)?;
    let relay = ChatRelay::new(Arc::new(llm), &config);

    let app = build_app(AppState {
        relay: Arc::new(relay),
    });

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting Ollama chat relay on {}", addr);
    info!(
        "Using Ollama at {} with model {}",
        config.ollama.url, config.ollama.model
    );
    if let Some(preview) = config.prepend_preview() {
        info!("Prepending to all prompts: {}", preview);
    }
    info!(
        "API key authentication: {}",
        if config.api_key_enabled() {
            "enabled"
        } else {
            "disabled"
        }
    );
    if config.relay.api_key == DEFAULT_API_KEY {
        warn!("API_KEY is still set to the built-in default; set a real key before exposing this service");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
