//! App configuration persisted as TOML under the `.riskscope` root.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_exchange_timeout_secs() -> u64 {
    30
}

/// Settings for the remote prediction service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Base URL of the prediction service; the predict endpoint lives at
    /// `{base_url}/api/predict`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Read/write timeout in seconds for the request/response exchange.
    #[serde(default = "default_exchange_timeout_secs")]
    pub exchange_timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            exchange_timeout_secs: default_exchange_timeout_secs(),
        }
    }
}

/// Aggregate application configuration loaded from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceSettings,
}

/// Errors raised while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No suitable application directory could be resolved.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid TOML for the expected schema.
    #[error("Failed to parse config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to serialize the configuration to TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The configured service base URL is not a valid URL.
    #[error("Invalid service base URL '{url}': {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },
}

/// Resolve the configuration file path inside the app root.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    load_from_path(&path)
}

/// Load configuration from a specific path, returning defaults if missing.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    validate_base_url(&config.service.base_url)?;
    Ok(config)
}

/// Persist the configuration, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    Url::parse(base_url).map(|_| ()).map_err(|source| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })
}
