// src/config.rs
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Settings of an OpenAI-compatible model endpoint.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_history: usize,
    pub session_ttl: Duration,
    pub cleanup_interval: Duration,
    /// `None` selects the offline echo responder.
    pub model: Option<ModelConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_history: 10,
            session_ttl: Duration::from_secs(3600),
            cleanup_interval: Duration::from_secs(300),
            model: None,
        }
    }
}

impl ServerConfig {
    /// Read settings from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let model = lookup("MODEL_API_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|api_url| ModelConfig {
                api_url,
                api_key: lookup("MODEL_API_KEY").filter(|k| !k.is_empty()),
                model: lookup("MODEL_NAME").unwrap_or_else(|| "default".to_string()),
            });

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PORT")?.unwrap_or(defaults.port),
            max_history: parse(&lookup, "MAX_HISTORY")?.unwrap_or(defaults.max_history),
            session_ttl: parse(&lookup, "SESSION_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_ttl),
            cleanup_interval: parse(&lookup, "CLEANUP_INTERVAL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cleanup_interval),
            model,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    /// Externally supplied session id, if any.
    pub session_id: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server_url: lookup("CHAT_SERVER_URL").unwrap_or_else(|| "http://localhost:8000".to_string()),
            session_id: lookup("CHAT_SESSION_ID"),
        }
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
