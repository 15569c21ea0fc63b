//! Error types for PostgreSQL operations.

use seedbed_loader::LoadError;
use thiserror::Error;

/// Result type for PostgreSQL operations.
pub type PgResult<T> = Result<T, PgError>;

/// Errors that can occur during PostgreSQL operations.
#[derive(Error, Debug)]
pub enum PgError {
    /// PostgreSQL error.
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),
}

impl PgError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<PgError> for LoadError {
    fn from(err: PgError) -> Self {
        match err {
            PgError::Postgres(e) => LoadError::database(e.to_string()),
            PgError::Config(msg) => LoadError::config(msg),
            PgError::Connection(msg) => LoadError::connection(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PgError::config("invalid URL");
        assert!(matches!(err, PgError::Config(_)));
    }

    #[test]
    fn test_into_load_error() {
        let err: LoadError = PgError::config("missing database").into();
        assert!(matches!(err, LoadError::Config(_)));

        let err: LoadError = PgError::connection("refused").into();
        assert!(matches!(err, LoadError::Connection(_)));
    }
}
