//! Error types for MySQL operations.

use seedbed_loader::LoadError;
use thiserror::Error;

/// Result type for MySQL operations.
pub type MysqlResult<T> = Result<T, MysqlError>;

/// Errors that can occur during MySQL operations.
#[derive(Error, Debug)]
pub enum MysqlError {
    /// MySQL error.
    #[error("mysql error: {0}")]
    Mysql(#[from] mysql_async::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),
}

impl MysqlError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<MysqlError> for LoadError {
    fn from(err: MysqlError) -> Self {
        match err {
            MysqlError::Mysql(e) => LoadError::database(e.to_string()),
            MysqlError::Config(msg) => LoadError::config(msg),
            MysqlError::Connection(msg) => LoadError::connection(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MysqlError::config("invalid URL");
        assert!(matches!(err, MysqlError::Config(_)));
    }

    #[test]
    fn test_into_load_error() {
        let err: LoadError = MysqlError::config("missing database").into();
        assert!(matches!(err, LoadError::Config(_)));
    }
}
