//! Error types for kasweb-config

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable code of a configuration failure, shown in startup logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    Unreadable,
    InvalidYaml,
    InvalidValue,
    InvalidEnv,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::Unreadable => "UNREADABLE",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
            ConfigErrorCode::InvalidEnv => "INVALID_ENV",
        };
        f.write_str(code)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read config file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in config file: {message}")]
    InvalidYaml { message: String },

    /// A setting parsed but is out of range or malformed
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// A `KASWEB_*` variable could not be applied
    #[error("Invalid environment variable {var}={value}")]
    InvalidEnv { var: String, value: String },
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::Unreadable { .. } => ConfigErrorCode::Unreadable,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
            ConfigError::InvalidEnv { .. } => ConfigErrorCode::InvalidEnv,
        }
    }

    /// Hints logged next to the error when the server refuses to start
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ConfigError::FileNotFound { path } => vec![
                format!("Create {} or pass another file with --config", path),
                "Run with --print-default-config to get a starting file".to_string(),
            ],
            ConfigError::Unreadable { path, .. } => {
                vec![format!("Check the permissions of {}", path)]
            }
            ConfigError::InvalidYaml { .. } => {
                vec!["Compare with the output of --print-default-config".to_string()]
            }
            ConfigError::InvalidValue { field, reason } => {
                vec![format!("Fix '{}' in the config file: {}", field, reason)]
            }
            ConfigError::InvalidEnv { var, .. } => {
                vec![format!("Unset {} or give it a valid value", var)]
            }
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
