//! Configuration loading and validation.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Console loop configuration.
    pub console: ConsoleConfig,
    /// LED output configuration.
    pub led: LedConfig,
}

/// Policy for lines whose command name matches no handler.
///
/// The original tools disagreed here: the command parser rejected unknown
/// input, the echo tool echoed it. The policy is explicit configuration now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Reply with a structured unknown-command error.
    #[default]
    Error,
    /// Echo the whole line with a character-class breakdown.
    Echo,
}

/// Console loop configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Maximum parameters retained per command; further tokens are dropped
    /// with a warning.
    pub max_params: usize,
    /// Maximum input line length in bytes.
    pub max_line_len: usize,
    /// Milliseconds to wait for a line terminator before accepting the
    /// partial input as final. 0 disables the flush.
    pub read_timeout_ms: u64,
    /// What to do with an unrecognized command name.
    pub on_unknown: UnknownPolicy,
    /// Print the banner and command listing on startup.
    pub banner: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_params: 5,
            max_line_len: 512,
            read_timeout_ms: 10_000,
            on_unknown: UnknownPolicy::default(),
            banner: true,
        }
    }
}

/// LED target selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedTarget {
    /// Onboard LED.
    Internal,
    /// External LED.
    External,
}

impl LedTarget {
    /// Uppercase keyword form, as accepted and printed on the console.
    pub fn as_str(&self) -> &'static str {
        match self {
            LedTarget::Internal => "INTERNAL",
            LedTarget::External => "EXTERNAL",
        }
    }
}

/// LED output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    /// Target used when the LED command names none.
    pub default_target: LedTarget,
    /// Output channel of the internal LED.
    pub internal_channel: u8,
    /// Output channel of the external LED.
    pub external_channel: u8,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            default_target: LedTarget::Internal,
            internal_channel: 2,
            external_channel: 4,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject configurations the console loop cannot operate with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.max_params == 0 {
            return Err(ConfigError::Invalid(
                "console.max_params must be at least 1".to_string(),
            ));
        }
        if self.console.max_line_len < 16 {
            return Err(ConfigError::Invalid(
                "console.max_line_len must be at least 16".to_string(),
            ));
        }
        Ok(())
    }
}
