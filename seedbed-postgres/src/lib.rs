//! # seedbed-postgres
//!
//! PostgreSQL backend for the seedbed fixture loader.
//!
//! Implements the `seedbed-loader` [`Backend`](seedbed_loader::Backend)
//! seam on top of tokio-postgres: foreign-key extraction from
//! `information_schema`, a single combined `TRUNCATE ... RESTART IDENTITY
//! CASCADE`, numbered-placeholder inserts, and sequence resets via
//! `pg_get_serial_sequence` / `setval`.
//!
//! Fixture values carry no client-side type information, so parameters
//! are sent in the text wire format and `$eval` scalars are read back
//! through the simple-query protocol; the server coerces both against the
//! actual column types.

pub mod backend;
pub mod config;
pub mod error;
pub mod sql;
pub mod types;

// Re-exports
pub use backend::PgBackend;
pub use config::PgConfig;
pub use error::{PgError, PgResult};
