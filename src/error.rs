use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a metric could not be read. Public accessors never surface this; it is
/// logged and replaced by a default.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("key `{key}` not found in {}", path.display())]
    KeyNotFound { path: PathBuf, key: String },

    #[error("malformed field `{token}` in {}", path.display())]
    Malformed { path: PathBuf, token: String },

    #[error("{} has no field at position {index}", path.display())]
    MissingField { path: PathBuf, index: usize },
}

pub type ReadResult<T> = Result<T, ReadError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
