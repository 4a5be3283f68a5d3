//! # Explain Configuration
//!
//! Environment-based configuration for the explain tool. Command-line flags
//! take precedence over these values.

use clap::ValueEnum;
use std::env;
use thiserror::Error;

/// How the delegated invocation is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Sample entity the typed call is made for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    #[default]
    Person,
    Account,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Explain tool configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Logging level, used when `RUST_LOG` is unset
    pub log_level: String,

    pub log_format: LogFormat,

    pub output: OutputFormat,

    pub entity: EntityKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            output: OutputFormat::default(),
            entity: EntityKind::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an enumerated variable holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if an enumerated variable holds an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: parse_enum("LOG_FORMAT", &lookup)?.unwrap_or(defaults.log_format),
            output: parse_enum("EXPLAIN_OUTPUT", &lookup)?.unwrap_or(defaults.output),
            entity: parse_enum("EXPLAIN_ENTITY", &lookup)?.unwrap_or(defaults.entity),
        })
    }
}

fn parse_enum<E: ValueEnum>(
    var: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<E>, ConfigError> {
    lookup(var)
        .map(|value| {
            E::from_str(&value, true).map_err(|reason| ConfigError::InvalidValue {
                var,
                value,
                reason,
            })
        })
        .transpose()
}
