//! Errors from reading a client configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration at {0:?}")]
    NotFound(PathBuf),

    #[error("malformed configuration: {0}")]
    InvalidFormat(String),

    #[error("{field} is invalid: {message}")]
    InvalidValue { field: String, message: String },

    /// A `${VAR}` placeholder named a variable absent from the environment.
    #[error("configuration references ${{{0}}}, which is not set")]
    EnvVarNotSet(String),

    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration is not valid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
