// Configuration File Support
//
// TOML configuration with environment variable overrides, loaded from the
// XDG config directory: ~/.config/colorcraft/config.toml. A missing file
// yields the defaults; a file that exists but cannot be parsed is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Quota gate configuration
    pub gate: GateConfig,

    /// Generation service configuration
    pub generator: GeneratorConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Quota gate configuration
///
/// The passcode is a soft quota-override device shared out of band, not
/// an authentication mechanism: it is stored and compared in the clear
/// and attempts are never limited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Free generations per calendar day
    pub daily_limit: u32,

    /// Override passcode that unlocks unlimited access for the session
    pub passcode: String,

    /// Path of the persisted daily record (defaults to the XDG data dir)
    pub record_path: Option<PathBuf>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            daily_limit: crate::gate::DEFAULT_DAILY_LIMIT,
            passcode: "1122".to_string(),
            record_path: None,
        }
    }
}

impl GateConfig {
    /// Resolve the record path, falling back to the XDG data directory
    pub fn resolved_record_path(&self) -> PathBuf {
        if let Some(path) = &self.record_path {
            return path.clone();
        }
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "colorcraft", "ColorCraft") {
            proj_dirs.data_dir().join("daily-generations.json")
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("colorcraft")
                .join("daily-generations.json")
        }
    }
}

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Endpoint the generation requests are posted to
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/generate".to_string(),
            timeout_secs: crate::generator::http::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            gate: GateConfig::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default XDG config directory
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    /// If the config file does not exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    /// If the config file does not exist, returns default configuration.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default().apply_env_overrides());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file from {:?}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file from {:?}", path))?;

        let config = config.apply_env_overrides();
        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default configuration file path
    ///
    /// Returns `~/.config/colorcraft/config.toml` on Linux/Mac
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "colorcraft", "ColorCraft") {
            proj_dirs.config_dir().join("config.toml")
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
                .join(".config")
                .join("colorcraft")
                .join("config.toml")
        }
    }

    /// Apply environment variable overrides to the configuration
    ///
    /// Environment variables take precedence over config file values:
    /// - COLORCRAFT_LOG_LEVEL
    /// - COLORCRAFT_LOG_FORMAT
    /// - COLORCRAFT_DAILY_LIMIT
    /// - COLORCRAFT_PASSCODE
    /// - COLORCRAFT_RECORD_PATH
    /// - COLORCRAFT_ENDPOINT
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("COLORCRAFT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("COLORCRAFT_LOG_FORMAT") {
            self.logging.format = format;
        }

        if let Ok(limit) = std::env::var("COLORCRAFT_DAILY_LIMIT") {
            if let Ok(limit) = limit.parse::<u32>() {
                if limit > 0 {
                    self.gate.daily_limit = limit;
                }
            }
        }
        if let Ok(passcode) = std::env::var("COLORCRAFT_PASSCODE") {
            if !passcode.trim().is_empty() {
                self.gate.passcode = passcode;
            }
        }
        if let Ok(path) = std::env::var("COLORCRAFT_RECORD_PATH") {
            self.gate.record_path = Some(PathBuf::from(path));
        }

        if let Ok(endpoint) = std::env::var("COLORCRAFT_ENDPOINT") {
            self.generator.endpoint = endpoint;
        }

        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            ),
        }

        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => anyhow::bail!(
                "Invalid log format: {}. Must be one of: json, pretty, compact",
                self.logging.format
            ),
        }

        if self.gate.daily_limit == 0 {
            anyhow::bail!("Daily limit must be > 0");
        }
        if self.gate.passcode.trim().is_empty() {
            anyhow::bail!("Passcode must not be empty");
        }

        if self.generator.endpoint.is_empty() {
            anyhow::bail!("Generator endpoint must not be empty");
        }
        if self.generator.timeout_secs == 0 {
            anyhow::bail!("Generator timeout must be > 0");
        }

        Ok(())
    }

    /// Convert log level string to tracing::Level
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .to_lowercase()
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse log level: {}", e))
    }
}
