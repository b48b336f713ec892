//! Environment-based configuration.

use atelier_error::{AtelierResult, ConfigError};
use std::env;

/// Runtime configuration read from the environment.
///
/// All credentials come from environment variables (a `.env` file is
/// loaded first if present). Missing required variables fail with a
/// [`ConfigError`] naming the variable.
#[derive(Debug, Clone)]
pub struct AtelierConfig {
    /// OpenAI API key for the vision summarizer
    pub openai_api_key: String,
    /// Dropbox app key
    pub dropbox_app_key: String,
    /// Dropbox app secret
    pub dropbox_app_secret: String,
    /// Long-lived Dropbox refresh token
    pub dropbox_refresh_token: String,
    /// Optional base URL of a rembg server for alpha thumbnails
    pub rembg_url: Option<String>,
    /// Destination folder override
    pub folder: Option<String>,
}

impl AtelierConfig {
    /// Read the full configuration from the environment.
    pub fn from_env() -> AtelierResult<Self> {
        Ok(Self {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            dropbox_app_key: require_env("DROPBOX_APP_KEY")?,
            dropbox_app_secret: require_env("DROPBOX_APP_SECRET")?,
            dropbox_refresh_token: require_env("DROPBOX_REFRESH_TOKEN")?,
            rembg_url: optional_env("REMBG_URL"),
            folder: optional_env("ATELIER_FOLDER"),
        })
    }
}

/// Dropbox app credentials only, for the auth bootstrap flow.
///
/// The bootstrap runs before a refresh token exists, so it must not
/// require one.
#[derive(Debug, Clone)]
pub struct AppCredentials {
    /// Dropbox app key
    pub app_key: String,
    /// Dropbox app secret
    pub app_secret: String,
}

impl AppCredentials {
    /// Read the app credentials from the environment.
    pub fn from_env() -> AtelierResult<Self> {
        Ok(Self {
            app_key: require_env("DROPBOX_APP_KEY")?,
            app_secret: require_env("DROPBOX_APP_SECRET")?,
        })
    }
}

fn require_env(name: &str) -> AtelierResult<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::new(format!("Missing environment variable {name}")).into()),
    }
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
