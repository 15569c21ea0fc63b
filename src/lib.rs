//! # seedbed
//!
//! Dependency-aware database fixture loader for PostgreSQL and MySQL.
//!
//! seedbed seeds a relational database with declarative YAML test data.
//! It reads the live foreign-key graph, orders the fixture's tables so
//! that referenced rows exist before the rows that point at them, and
//! applies truncation, insertion, and sequence reset inside a single
//! transaction.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use seedbed::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), seedbed::LoadError> {
//!     let config = Config::new(
//!         "fixtures.yml",
//!         "postgres://postgres@localhost/app_test",
//!     );
//!
//!     let report = seedbed::load(&config).await?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! The fixture format, the load engine, and the per-backend SQL dialects
//! live in the `seedbed-fixture`, `seedbed-loader`, `seedbed-postgres`,
//! and `seedbed-mysql` crates; this crate wires them together behind one
//! [`Config`] + [`load`] entry point.

pub mod config;

use seedbed_loader::{LoadOptions, Loader};
use seedbed_mysql::{MysqlBackend, MysqlConfig};
use seedbed_postgres::{PgBackend, PgConfig};

// Re-exports
pub use config::{Config, Provider};
pub use seedbed_fixture::{Dataset, FixtureError, Row, TableRef, Value};
pub use seedbed_loader::{Backend, DependencyGraph, LoadError, LoadReport, LoadResult};

/// Load the configured fixture document into the configured database.
///
/// Validates the configuration, connects the matching backend, and runs
/// one transactional load. On any failure after the transaction opens,
/// the transaction is rolled back before the error is returned.
pub async fn load(config: &Config) -> LoadResult<LoadReport> {
    config.validate()?;
    let provider = config.resolved_provider()?;

    let options = LoadOptions::new()
        .truncate(config.truncate)
        .reset_sequences(config.reset_sequences)
        .default_schema(config.default_schema.clone());

    match provider {
        Provider::Postgres => {
            let pg_config = PgConfig::from_url(&config.database_url)?;
            let backend = PgBackend::connect(&pg_config)
                .await?
                .dry_run(config.dry_run);
            Loader::new(backend, options).load(&config.file_path).await
        }
        Provider::Mysql => {
            let mysql_config = MysqlConfig::from_url(&config.database_url)?;
            let backend = MysqlBackend::connect(&mysql_config)
                .await?
                .dry_run(config.dry_run)
                .default_schema(config.default_schema.clone());
            let mut loader = Loader::new(backend, options);
            let result = loader.load(&config.file_path).await;
            // Best-effort close; the load outcome is what matters.
            let _ = loader.into_backend().disconnect().await;
            result
        }
    }
}
