//! The dialect/execution seam between the loader and a database.

use async_trait::async_trait;
use seedbed_fixture::{Row, TableRef, Value};

use crate::error::LoadResult;
use crate::graph::DependencyGraph;

/// A database backend the loader drives.
///
/// One implementation exists per SQL dialect; the implementation owns the
/// connection, generates dialect-specific SQL, and executes it. All
/// mutating operations run inside the transaction opened by [`begin`]
/// until [`commit`] or [`rollback`].
///
/// In dry-run mode a backend renders every mutating statement (and, for
/// inserts, the would-be parameter values) through structured logging
/// instead of executing it; read-only catalog queries still run.
///
/// [`begin`]: Backend::begin
/// [`commit`]: Backend::commit
/// [`rollback`]: Backend::rollback
#[async_trait]
pub trait Backend: Send {
    /// Whether this backend renders statements instead of executing them.
    fn dry_run(&self) -> bool;

    /// Query catalog metadata for the child-to-parents foreign-key map.
    async fn dependency_graph(&mut self) -> LoadResult<DependencyGraph>;

    /// Open the transaction that covers the rest of the load.
    async fn begin(&mut self) -> LoadResult<()>;

    /// Commit the transaction.
    async fn commit(&mut self) -> LoadResult<()>;

    /// Roll the transaction back.
    async fn rollback(&mut self) -> LoadResult<()>;

    /// Empty the given tables, in the order given (dependent tables
    /// first).
    async fn truncate(&mut self, tables: &[TableRef]) -> LoadResult<()>;

    /// Insert one row; column order is the row's own field order.
    async fn insert_row(&mut self, table: &TableRef, row: &Row) -> LoadResult<()>;

    /// Execute a `$eval` expression as a single-row, single-column query
    /// and return the scalar.
    async fn eval_scalar(&mut self, expression: &str) -> LoadResult<Value>;

    /// Reset identity sequences / auto-increment counters for the given
    /// tables.
    async fn reset_sequences(&mut self, tables: &[TableRef]) -> LoadResult<()>;
}
