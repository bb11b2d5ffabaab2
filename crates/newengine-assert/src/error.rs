use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read assert config {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to parse assert config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid assert level: {0:?}")]
    InvalidLevel(String),

    #[error("message capacity must be at least 1 byte (got {0})")]
    InvalidCapacity(usize),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
