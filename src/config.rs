//! Startup configuration read from the environment.

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::checkin::DEFAULT_WEBHOOK_URL;
use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Model service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Model identifier override.
pub const MODEL_ENV: &str = "CHECKIN_MODEL";
/// Model service base URL override.
pub const BASE_URL_ENV: &str = "CHECKIN_OPENAI_BASE_URL";
/// Webhook URL override.
pub const WEBHOOK_URL_ENV: &str = "CHECKIN_WEBHOOK_URL";
/// Listening port.
pub const PORT_ENV: &str = "CHECKIN_PORT";
/// Static asset directory.
pub const STATIC_DIR_ENV: &str = "CHECKIN_STATIC_DIR";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    /// A URL variable does not parse.
    #[error("invalid URL in {var}: {source}")]
    InvalidUrl {
        /// Offending variable.
        var: &'static str,
        /// Parse failure.
        source: url::ParseError,
    },
    /// The `.env` file exists but cannot be read.
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Service configuration.
#[derive(Debug)]
pub struct CheckinConfig {
    /// Model service credential.
    pub api_key: SecretString,
    /// Model identifier.
    pub model: String,
    /// Model service base URL.
    pub openai_base_url: Url,
    /// Webhook receiving summaries.
    pub webhook_url: Url,
    /// Listening port.
    pub port: u16,
    /// Directory holding `index.html` and other assets.
    pub static_dir: PathBuf,
}

impl CheckinConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_ENV)
            .map(SecretString::from)
            .ok_or(ConfigError::Missing(API_KEY_ENV))?;
        let model = get(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let openai_base_url = parse_url(BASE_URL_ENV, get(BASE_URL_ENV), DEFAULT_BASE_URL)?;
        let webhook_url = parse_url(WEBHOOK_URL_ENV, get(WEBHOOK_URL_ENV), DEFAULT_WEBHOOK_URL)?;
        let port = get(PORT_ENV)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let static_dir = get(STATIC_DIR_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);

        Ok(Self {
            api_key,
            model,
            openai_base_url,
            webhook_url,
            port,
            static_dir,
        })
    }
}

fn parse_url(var: &'static str, value: Option<String>, default: &str) -> Result<Url, ConfigError> {
    let raw = value.as_deref().unwrap_or(default);
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { var, source })
}

/// Load a `.env` file from the working directory or its parents, if any.
///
/// # Errors
/// Returns an error if a `.env` file exists but cannot be parsed.
pub fn load_dotenv() -> Result<Option<PathBuf>, ConfigError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err.into()),
    }
}
