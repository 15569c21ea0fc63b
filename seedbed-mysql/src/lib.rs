//! # seedbed-mysql
//!
//! MySQL backend for the seedbed fixture loader.
//!
//! Implements the `seedbed-loader` [`Backend`](seedbed_loader::Backend)
//! seam on top of mysql_async. MySQL has no schemas in the Postgres
//! sense and refuses to truncate foreign-key-referenced tables, so this
//! backend strips schema qualifiers from statements, toggles
//! `FOREIGN_KEY_CHECKS` around truncation, and resets `AUTO_INCREMENT`
//! counters instead of sequences. Postgres-style interval literals inside
//! `$eval` expressions are rewritten to MySQL syntax before execution.

pub mod backend;
pub mod config;
pub mod error;
pub mod sql;
pub mod types;

// Re-exports
pub use backend::MysqlBackend;
pub use config::MysqlConfig;
pub use error::{MysqlError, MysqlResult};
