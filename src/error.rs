use std::path::PathBuf;

/// Errors raised by a [`TaskStore`](crate::storage::TaskStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("task store is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("task {0} not found")]
    NotFound(u64),
    #[error("task has no id (it was never saved)")]
    MissingId,
}

/// Errors raised while parsing dates and times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("invalid time '{0}', use HH:MM")]
    InvalidTime(String),
    #[error("invalid date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("cannot determine config directory")]
    NoConfigDir,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
