//! Configuration management for ltigate.
//!
//! Parses `ltigate.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "ltigate.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the default tools path.
    pub tools_path: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// LTI configuration.
    pub lti: LtiConfig,
    /// Registered LMS consumers.
    pub consumers: Vec<ConsumerConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            lti: LtiConfig::default(),
            consumers: Vec::new(),
            config_path: None,
        }
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

/// LTI configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LtiConfig {
    /// Path the launch redirects to when no (or an invalid) tool is
    /// requested.
    pub tools_path: String,
}

impl Default for LtiConfig {
    fn default() -> Self {
        Self {
            tools_path: "/ltitools".to_owned(),
        }
    }
}

/// One registered LMS consumer.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct ConsumerConfig {
    /// OAuth consumer key.
    pub key: String,
    /// Shared consumer secret.
    pub secret: String,
}

impl Config {
    /// Load configuration.
    ///
    /// Uses `config_path` when given, otherwise discovers `ltigate.toml`
    /// upward from the current directory, otherwise falls back to
    /// defaults. CLI settings are applied last.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing (when explicitly
    /// given), unreadable, or fails to parse or validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Search for `ltigate.toml` in the current directory and its parents.
    fn discover_config() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(tools_path) = &settings.tools_path {
            self.lti.tools_path.clone_from(tools_path);
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on empty consumer fields or a
    /// tools path that is not rooted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.lti.tools_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "lti.tools_path must start with '/': '{}'",
                self.lti.tools_path
            )));
        }
        for consumer in &self.consumers {
            require_non_empty(&consumer.key, "consumers.key")?;
            require_non_empty(&consumer.secret, "consumers.secret")?;
        }
        Ok(())
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}
