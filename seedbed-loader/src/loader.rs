//! The load orchestrator.

use std::path::Path;
use std::time::Instant;

use seedbed_fixture::{Dataset, ResolveOptions, Row, TableRef, resolve};
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::error::LoadResult;

/// Options for one load operation.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Empty every table in the load set before inserting.
    pub truncate: bool,
    /// Reset identity sequences / auto-increment counters after
    /// inserting.
    pub reset_sequences: bool,
    /// Schema used to qualify unqualified table names in the document.
    pub default_schema: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            truncate: true,
            reset_sequences: true,
            default_schema: "public".to_string(),
        }
    }
}

impl LoadOptions {
    /// Create options with the defaults (truncate and reset on, schema
    /// `public`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable truncation.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Enable or disable sequence reset.
    pub fn reset_sequences(mut self, reset: bool) -> Self {
        self.reset_sequences = reset;
        self
    }

    /// Set the default schema for unqualified table names.
    pub fn default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }
}

/// Result of a completed load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Tables touched, in truncation (dependent-first) order.
    pub tables: Vec<TableRef>,
    /// Number of rows inserted (or rendered, in dry-run).
    pub rows_inserted: usize,
    /// Total duration in milliseconds.
    pub duration_ms: u64,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl LoadReport {
    /// One-line human summary.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} rows into {} tables in {}ms",
            self.rows_inserted,
            self.tables.len(),
            self.duration_ms
        );
        if self.dry_run {
            summary.push_str(" (dry-run)");
        }
        summary
    }
}

/// Applies one fixture document to one database inside one transaction.
///
/// The loader computes the dependency-safe order once, truncates in
/// dependent-before-dependency order, inserts in the reverse order, and
/// resets sequences last. Any failure after [`Backend::begin`] rolls the
/// transaction back before the error propagates; no partial commit is
/// ever visible.
///
/// Cancellation is cooperative: dropping the [`load`](Loader::load)
/// future abandons the operation at the next database call boundary, and
/// the never-committed transaction dies with the connection. Nothing is
/// retried.
pub struct Loader<B> {
    backend: B,
    options: LoadOptions,
}

impl<B: Backend> Loader<B> {
    /// Create a loader over a connected backend.
    pub fn new(backend: B, options: LoadOptions) -> Self {
        Self { backend, options }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the loader and hand the backend back, e.g. to disconnect.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Resolve the fixture document at `path` and load it.
    pub async fn load(&mut self, path: impl AsRef<Path>) -> LoadResult<LoadReport> {
        let started = Instant::now();

        let resolve_options =
            ResolveOptions::new().default_schema(self.options.default_schema.clone());
        let dataset = resolve(path.as_ref(), &resolve_options)?;
        let requested: Vec<TableRef> = dataset.tables().cloned().collect();
        debug!(
            tables = requested.len(),
            rows = dataset.row_count(),
            "fixture document resolved"
        );

        let graph = self.backend.dependency_graph().await?;
        let sorted = graph.sort(&requested)?;

        if sorted.is_empty() {
            return Ok(LoadReport {
                tables: sorted,
                rows_inserted: 0,
                duration_ms: started.elapsed().as_millis() as u64,
                dry_run: self.backend.dry_run(),
            });
        }

        self.backend.begin().await?;
        let rows_inserted = match self.apply(&dataset, &sorted).await {
            Ok(rows) => rows,
            Err(err) => {
                if let Err(rollback_err) = self.backend.rollback().await {
                    warn!(error = %rollback_err, "rollback failed");
                }
                return Err(err);
            }
        };
        self.backend.commit().await?;

        let report = LoadReport {
            tables: sorted,
            rows_inserted,
            duration_ms: started.elapsed().as_millis() as u64,
            dry_run: self.backend.dry_run(),
        };
        info!(
            rows = report.rows_inserted,
            tables = report.tables.len(),
            dry_run = report.dry_run,
            "fixtures loaded"
        );
        Ok(report)
    }

    /// Run the mutating steps inside the already-open transaction.
    async fn apply(&mut self, dataset: &Dataset, sorted: &[TableRef]) -> LoadResult<usize> {
        if self.options.truncate {
            self.backend.truncate(sorted).await?;
        }

        let mut rows_inserted = 0;
        for table in sorted.iter().rev() {
            let Some(rows) = dataset.rows(table) else {
                // Pulled in as a dependency only; nothing declared for it.
                continue;
            };
            for row in rows {
                let resolved = self.resolve_row(row).await?;
                self.backend.insert_row(table, &resolved).await?;
                rows_inserted += 1;
            }
        }

        if self.options.reset_sequences {
            self.backend.reset_sequences(sorted).await?;
        }

        Ok(rows_inserted)
    }

    /// Substitute `$eval` fields with their query results.
    ///
    /// A dry run never executes the sub-query; the unevaluated expression
    /// travels on as the reported value.
    async fn resolve_row(&mut self, row: &Row) -> LoadResult<Row> {
        let mut resolved = Row::with_capacity(row.len());
        for (column, value) in row {
            let value = match value.eval_expression() {
                Some(expression) if !self.backend.dry_run() => {
                    self.backend.eval_scalar(expression).await?
                }
                _ => value.clone(),
            };
            resolved.insert(column.clone(), value);
        }
        Ok(resolved)
    }
}
