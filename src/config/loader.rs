use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{ApiConfig, Config, UiConfig};
use crate::schema;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            message: message.into(),
        }
    }
}

impl Config {
    /// `registrar/config.toml` under the platform config directory
    /// (`~/.config` on Linux), or under the working directory when the
    /// platform has none.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("registrar")
            .join("config.toml")
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Parse and validate `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the panel cannot run with: a non-http(s) base URL, a
    /// zero page size or an initial entity missing from the registry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_api(&self.api)?;
        validate_ui(&self.ui)
    }
}

fn validate_api(api: &ApiConfig) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(&api.base_url).map_err(|e| {
        ConfigError::invalid(format!("Invalid base_url '{}': {}", api.base_url, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(format!(
            "Unsupported base_url scheme '{}'",
            url.scheme()
        )));
    }
    Ok(())
}

fn validate_ui(ui: &UiConfig) -> Result<(), ConfigError> {
    if ui.page_size == 0 {
        return Err(ConfigError::invalid("page_size must be at least 1"));
    }
    if schema::schema_for(&ui.initial_entity).is_err() {
        let known: Vec<_> = schema::entity_names().collect();
        return Err(ConfigError::invalid(format!(
            "Initial entity '{}' not found (available: {})",
            ui.initial_entity,
            known.join(", ")
        )));
    }
    Ok(())
}
