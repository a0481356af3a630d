//! CLI configuration management
//!
//! Default option and surface inputs come from a TOML file; command-line
//! flags override them field by field.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::OptionType;
use pricer_models::surface::{ColourScheme, DEFAULT_STEPS, DEFAULT_VOL_RANGE};
use serde::Deserialize;
use thiserror::Error;

/// Config file read when `--config` is not given. Absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "bsheat.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels accepted by `--log-level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[option]` section: single-option inputs
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptionDefaults {
    pub spot_price: f64,
    pub strike_price: f64,
    pub time_to_maturity: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub option_type: OptionType,
}

impl Default for OptionDefaults {
    fn default() -> Self {
        Self {
            spot_price: 100.0,
            strike_price: 100.0,
            time_to_maturity: 1.0,
            risk_free_rate: 0.05,
            volatility: 0.2,
            option_type: OptionType::Call,
        }
    }
}

/// `[surface]` section: heatmap mesh and colouring
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceDefaults {
    pub min_spot: f64,
    pub max_spot: f64,
    pub min_vol: f64,
    pub max_vol: f64,
    pub steps: usize,
    pub colours: ColourScheme,
}

impl Default for SurfaceDefaults {
    fn default() -> Self {
        Self {
            min_spot: 80.0,
            max_spot: 120.0,
            min_vol: DEFAULT_VOL_RANGE.0,
            max_vol: DEFAULT_VOL_RANGE.1,
            steps: DEFAULT_STEPS,
            colours: ColourScheme::Gradient,
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when neither `--log-level` nor `RUST_LOG` is set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Single-option defaults
    pub option: OptionDefaults,
    /// Surface defaults
    pub surface: SurfaceDefaults,
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Load the explicit file if given, else [`DEFAULT_CONFIG_FILE`] when it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Effective log level: the flag (or `BSHEAT_LOG_LEVEL`) wins over the file.
    pub fn resolve_log_level(&self, cli: Option<&str>) -> Result<LogLevel, ConfigError> {
        match cli {
            Some(level) => LogLevel::from_str(level),
            None => Ok(self.log_level),
        }
    }
}
