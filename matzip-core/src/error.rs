//! Structured error types for matzip-core.
//!
//! Library consumers get `thiserror` enums; the `matzip` binary wraps them
//! in `anyhow` with context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for matzip-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file does not exist
    #[error("Config not found at {path:?}\n\nRun: matzip config init")]
    ConfigNotFound { path: PathBuf },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {source}")]
    ConfigSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// Config value is present but unusable
    #[error("Invalid config value '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Result type alias for matzip-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_value("server.bind", "not a socket address");
        assert_eq!(
            err.to_string(),
            "Invalid config value 'server.bind': not a socket address"
        );

        let err = CoreError::ConfigNotFound {
            path: PathBuf::from("/tmp/matzip.toml"),
        };
        assert!(err.to_string().contains("matzip config init"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io_err.into();

        assert!(matches!(err, CoreError::Io { .. }));
    }
}
