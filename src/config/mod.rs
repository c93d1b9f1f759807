mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

const PREVIEW_CHARS: usize = 50;

/// Builds the process configuration: optional YAML file (`config_path`, else
/// `CONFIG_PATH`), then environment overrides on top.
pub async fn load(config_path: Option<&str>) -> Result<Config> {
    let config_path = config_path
        .map(str::to_string)
        .or_else(|| env::var("CONFIG_PATH").ok());

    let mut config = match config_path {
        Some(config_path) => {
            debug!("Loading configuration from: {}", config_path);
            let config_str = tokio::fs::read_to_string(&config_path).await?;
            Config::from_yaml_str(&config_str)?
        }
        None => Config::default(),
    };

    config.apply_env_overrides(|key| env::var(key).ok())?;

    Ok(config)
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Applies the environment-style overrides returned by `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("OLLAMA_URL") {
            self.ollama.url = url;
        }
        if let Some(model) = lookup("MODEL") {
            self.ollama.model = model;
        }
        if let Some(timeout) = lookup("OLLAMA_TIMEOUT_SECS") {
            self.ollama.timeout_secs = parse_override("OLLAMA_TIMEOUT_SECS", &timeout)?;
        }
        if let Some(prepend) = lookup("PREPEND_STATEMENT") {
            self.relay.prepend_statement = prepend;
        }
        if let Some(api_key) = lookup("API_KEY") {
            self.relay.api_key = api_key;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_override("PORT", &port)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.server.logs.level = level;
        }
        Ok(())
    }

    /// Short form of the default prepend statement for the startup banner.
    pub fn prepend_preview(&self) -> Option<String> {
        let prepend = &self.relay.prepend_statement;
        if prepend.is_empty() {
            return None;
        }
        let head: String = prepend.chars().take(PREVIEW_CHARS).collect();
        Some(format!("{}...", head))
    }

    pub fn api_key_enabled(&self) -> bool {
        !self.relay.api_key.is_empty()
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid value for {}: '{}'", key, value)))
}
