//! Error types for the load engine.

use seedbed_fixture::FixtureError;
use thiserror::Error;

/// Result type alias for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading fixtures.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Missing or invalid configuration, caught before any I/O.
    #[error("configuration error: {0}")]
    Config(String),

    /// Document parse or resolution error, caught before any database
    /// interaction.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// The foreign-key graph contains a cycle reachable from the
    /// requested tables.
    #[error("cyclic dependency detected: {0}")]
    DependencyCycle(String),

    /// Connection failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Statement execution failure; the transaction has been rolled back.
    #[error("database error: {0}")]
    Database(String),

    /// A `$eval` sub-query failed or returned nothing usable.
    #[error("eval {expression:?}: {message}")]
    Eval {
        /// The SQL expression that was evaluated.
        expression: String,
        /// Underlying failure.
        message: String,
    },
}

impl LoadError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an eval error carrying the offending expression.
    pub fn eval(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Eval {
            expression: expression.into(),
            message: message.into(),
        }
    }
}
