//! Configuration management for bakeweb
//!
//! Loads the markup markers, collation locale and logging settings
//! from a YAML file. Every field has a default, so an empty file is valid.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Markup markers read from the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// Class that marks a table as sortable
    #[serde(default = "default_sortable_class")]
    pub sortable_class: String,
    /// Header attribute carrying the 1-based column identifier
    #[serde(default = "default_column_attribute")]
    pub column_attribute: String,
    /// Tag name of header cells
    #[serde(default = "default_header_tag")]
    pub header_tag: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            sortable_class: default_sortable_class(),
            column_attribute: default_column_attribute(),
            header_tag: default_header_tag(),
        }
    }
}

fn default_sortable_class() -> String {
    "sortable".to_string()
}

fn default_column_attribute() -> String {
    "data-sort".to_string()
}

fn default_header_tag() -> String {
    "th".to_string()
}

/// String comparison settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollationConfig {
    /// BCP-47 locale tag
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for CollationConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

fn default_locale() -> String {
    "ja".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Markup markers
    #[serde(default)]
    pub markup: MarkupConfig,
    /// Collation settings
    #[serde(default)]
    pub collation: CollationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        // An empty document deserializes to unit, not to a mapping
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.markup.sortable_class.trim().is_empty()
            || self.markup.sortable_class.contains(char::is_whitespace)
        {
            return Err(ConfigError::InvalidValue {
                field: "markup.sortable_class".to_string(),
                reason: "Class marker must be a single non-empty class name".to_string(),
            });
        }

        if !self.markup.column_attribute.starts_with("data-")
            || self.markup.column_attribute.len() == "data-".len()
        {
            return Err(ConfigError::InvalidValue {
                field: "markup.column_attribute".to_string(),
                reason: "Column attribute must be a data-* attribute".to_string(),
            });
        }

        if self.markup.header_tag.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "markup.header_tag".to_string(),
                reason: "Header tag must not be empty".to_string(),
            });
        }

        if self.collation.locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "collation.locale".to_string(),
                reason: "Locale must be a BCP-47 tag such as \"ja\"".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================
