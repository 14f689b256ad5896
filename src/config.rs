//! TOML configuration for the scoring endpoint and UI preferences.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize, de::Error as SerdeDeError};
use thiserror::Error;
use url::Url;

use crate::app_dirs;
use crate::form::FormId;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_MODEL_V1_PATH: &str = "/predict_V1";
const DEFAULT_MODEL_V2_PATH: &str = "/predict_V2";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RESPONSE_BYTES: usize = 256 * 1024;
const MIN_RESPONSE_BYTES: usize = 1024;

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid scoring base URL \"{url}\": {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Scoring base URL \"{0}\" must use http or https")]
    UnsupportedScheme(String),
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Everything persisted in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

/// Where and how submissions are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model_v1_path")]
    pub model_v1_path: String,
    #[serde(default = "default_model_v2_path")]
    pub model_v2_path: String,
    /// Overall deadline for one submission, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model_v1_path: default_model_v1_path(),
            model_v2_path: default_model_v2_path(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl ScoringSettings {
    /// Endpoint path scoring the given form.
    pub fn path_for(&self, id: FormId) -> &str {
        match id {
            FormId::ModelV1 => &self.model_v1_path,
            FormId::ModelV2 => &self.model_v2_path,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.min(self.timeout_secs))
    }

    /// Parse and check the configured base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::UnsupportedScheme(self.base_url.clone())),
        }
    }

    fn normalized(mut self) -> Self {
        self.timeout_secs = self.timeout_secs.max(1);
        self.connect_timeout_secs = self.connect_timeout_secs.max(1);
        self.max_response_bytes = self.max_response_bytes.max(MIN_RESPONSE_BYTES);
        self
    }
}

/// UI preferences remembered between launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default)]
    pub last_form: FormId,
}

impl AppConfig {
    fn normalized(mut self) -> Self {
        self.scoring = self.scoring.normalized();
        self
    }
}

/// Resolve the configuration file path inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from a specific path, returning defaults if missing.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    let config = config.normalized();
    config.scoring.base_url()?;
    Ok(config)
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model_v1_path() -> String {
    DEFAULT_MODEL_V1_PATH.to_string()
}

fn default_model_v2_path() -> String {
    DEFAULT_MODEL_V2_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_dirs::test_support::OverrideGuard;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = load_from(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scoring.path_for(FormId::ModelV2), "/predict_V2");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[scoring]\nbase_url = \"https://scoring.example.com\"\ntimeout_secs = 0\n",
        )
        .unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.scoring.base_url, "https://scoring.example.com");
        assert_eq!(config.scoring.timeout_secs, 1);
        assert_eq!(config.scoring.model_v1_path, "/predict_V1");
        assert_eq!(config.ui.last_form, FormId::ModelV1);
    }

    #[test]
    fn rejects_non_http_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[scoring]\nbase_url = \"ftp://example.com\"\n").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        std::fs::write(&path, "[scoring]\nbase_url = \"not a url\"\n").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn save_then_load_preserves_last_form() {
        let base = tempdir().unwrap();
        let _guard = OverrideGuard::set(base.path().to_path_buf());
        let mut config = AppConfig::default();
        config.ui.last_form = FormId::ModelV2;
        save(&config).unwrap();
        assert_eq!(load_or_default().unwrap(), config);
    }
}
