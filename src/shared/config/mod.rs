//! Application configuration module
//!
//! Layered configuration for the client: built-in defaults, then an optional
//! TOML file, then `TASKBOARD_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default service URL
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Boards a user may own; enforced by the server, reflected by the client
pub const MAX_BOARDS_PER_USER: usize = 7;

/// Cards allowed on one board; enforced by the server
pub const MAX_CARDS_PER_BOARD: usize = 20;

/// Storage key of the persisted session
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

const ENV_API_URL: &str = "TASKBOARD_API_URL";
const ENV_STORAGE_DIR: &str = "TASKBOARD_STORAGE_DIR";
const ENV_TIMEOUT_SECS: &str = "TASKBOARD_TIMEOUT_SECS";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Service base URL, without a trailing slash
    pub api_base_url: String,
    /// Directory holding the persisted session
    pub storage_dir: PathBuf,
    /// Per-request timeout handed to the HTTP client
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_dir: default_storage_dir(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Defaults overridden by `TASKBOARD_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().apply_env()?.build()
    }

    /// Defaults overridden by a TOML file, then by the environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidValue(format!("{}: {}", path.display(), e)))?;
        Self::builder().apply_toml(&text)?.apply_env()?.build()
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    /// Path of the persisted session file
    pub fn session_file(&self) -> PathBuf {
        self.storage_dir.join(format!("{}.json", SESSION_STORAGE_KEY))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.api_base_url.clone()));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue("request timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

fn default_storage_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
    path.push("taskboard");
    path
}

/// Optional keys of a `taskboard.toml` file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    storage_dir: Option<PathBuf>,
    timeout_secs: Option<u64>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_base_url: Option<String>,
    storage_dir: Option<PathBuf>,
    request_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the service base URL
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the session storage directory
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Overlay values from a TOML document
    pub fn apply_toml(mut self, text: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        if let Some(url) = file.api_base_url {
            self.api_base_url = Some(url);
        }
        if let Some(dir) = file.storage_dir {
            self.storage_dir = Some(dir);
        }
        if let Some(secs) = file.timeout_secs {
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Overlay values from `TASKBOARD_*` environment variables
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api_base_url = Some(url);
        }
        if let Ok(dir) = std::env::var(ENV_STORAGE_DIR) {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue(format!("{}={}", ENV_TIMEOUT_SECS, secs)))?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let api_base_url = self
            .api_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if api_base_url.is_empty() {
            return Err(ConfigError::MissingValue("api_base_url"));
        }
        let config = AppConfig {
            api_base_url,
            storage_dir: self.storage_dir.unwrap_or(defaults.storage_dir),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
