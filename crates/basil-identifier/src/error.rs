use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading analyser configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Descendant separator must not be blank")]
    EmptySeparator,
}

/// Errors raised when parsing a position qualifier on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Invalid position qualifier: {0}")]
    Invalid(String),
}
