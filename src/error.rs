//! Error types for the orgpulse CLI

use thiserror::Error;

/// Result type alias for orgpulse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fetch cancelled, checkpoints reflect the last completed page")]
    Cancelled,
}

/// Failures surfaced by the upstream API transport.
///
/// `RateLimited` is only constructed when the response carries an exhausted
/// quota with a reset time; it is absorbed by a scheduled sleep and never
/// counts against the retry budget. `Transient` is retried with bounded
/// backoff. `Fatal` is never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("rate limited by upstream, quota resets at epoch {reset_epoch}")]
    RateLimited { reset_epoch: i64 },

    #[error("transient upstream failure: {0}")]
    Transient(String),

    #[error("fatal upstream failure: {0}")]
    Fatal(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transient("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Transient("failed to connect to API".to_string())
        } else {
            ApiError::Transient(err.to_string())
        }
    }
}

/// Response-cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cache I/O error: {0}")]
    Io(String),
}

/// Checkpoint persistence errors
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Store (repos/issues database) errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("store contains invalid data: {0}")]
    Invalid(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_rate_limited_message() {
        let err = ApiError::RateLimited {
            reset_epoch: 1700000000,
        };
        assert!(err.to_string().contains("1700000000"));
    }

    #[test]
    fn test_api_error_transient_message() {
        let err = ApiError::Transient("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_api_error_fatal_message() {
        let err = ApiError::Fatal("401 Unauthorized".to_string());
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Transient("boom".to_string()).into();
        match err {
            Error::Api(ApiError::Transient(_)) => (),
            _ => panic!("expected Error::Api(ApiError::Transient)"),
        }
    }

    #[test]
    fn test_error_from_checkpoint_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = CheckpointError::from(io).into();
        match err {
            Error::Checkpoint(CheckpointError::Io(_)) => (),
            _ => panic!("expected Error::Checkpoint(CheckpointError::Io)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_err =
            serde_yaml::from_str::<serde_yaml::Value>("invalid: [yaml: content").unwrap_err();
        let config_err: ConfigError = yaml_err.into();
        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("expected ConfigError::ParseError"),
        }
    }
}
