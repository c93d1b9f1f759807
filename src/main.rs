use anyhow::Result;
use clap::Parser;
use ollama_relay::{config, server};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ollama-relay")]
#[command(about = "Authenticated chat relay in front of a local Ollama server")]
struct CliArgs {
    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to
    #[arg(long)]
    port: Option<u16>,

    /// YAML configuration file (same as CONFIG_PATH)
    #[arg(long)]
    config: Option<String>,
}

/// Validates a log filter: a bare level or comma-separated `target=level` directives
fn validate_log_level(level: &str) -> Result<()> {
    for directive in level.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let directive_level = directive.rsplit('=').next().unwrap_or(directive);
        directive_level
            .parse::<tracing_subscriber::filter::LevelFilter>()
            .map_err(|_| {
                anyhow::anyhow!(
                    "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                    level
                )
            })?;
    }
    Ok(())
}

/// Picks the effective log filter: `RUST_LOG` when set, otherwise the configured level
fn effective_log_level(rust_log: Option<String>, configured: &str) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load configuration first (before logging setup)
    let mut config = match config::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Determine log level: environment variable overrides config
    let log_level = effective_log_level(
        std::env::var("RUST_LOG").ok(),
        &config.server.logs.level,
    );

    let env_filter = match validate_log_level(&log_level)
        .and_then(|()| Ok(tracing_subscriber::EnvFilter::try_new(&log_level)?))
    {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .init();

    info!("Starting Ollama chat relay with log level: {}", log_level);

    server::run(config).await?;

    Ok(())
}
