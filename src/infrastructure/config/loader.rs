use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Optional project config file, relative to the working directory.
pub const CONFIG_FILE: &str = "summarizer.yaml";

/// Platform variables read without a prefix.
const RAW_ENV_KEYS: [&str; 3] = ["HOST", "PORT", "A2A_BASE_URL"];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("GenAI service name cannot be empty")]
    EmptyServiceName,

    #[error("Invalid temperature: {0}. Must be between 0.0 and 2.0")]
    InvalidTemperature(f32),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. summarizer.yaml (optional)
    /// 3. Platform variables HOST, PORT, A2A_BASE_URL
    /// 4. SUMMARIZER_* environment variables (`__` separates nested keys)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment(Yaml::file(CONFIG_FILE))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honoring the environment
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Self::figment(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(file: figment::providers::Data<Yaml>) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(file)
            .merge(Env::raw().only(&RAW_ENV_KEYS))
            .merge(Env::prefixed("SUMMARIZER_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        if config.genai.service_name.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName);
        }

        if !(0.0..=2.0).contains(&config.genai.temperature) {
            return Err(ConfigError::InvalidTemperature(config.genai.temperature));
        }

        if config.host.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "host cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
