//! PostgreSQL backend implementation.

use async_trait::async_trait;
use seedbed_fixture::{Row, TableRef, Value};
use seedbed_loader::{Backend, DependencyGraph, LoadError, LoadResult};
use tokio_postgres::{Client, NoTls, SimpleQueryMessage};
use tracing::{debug, error, info};

use crate::config::PgConfig;
use crate::error::PgResult;
use crate::sql;
use crate::types::PgParam;

/// A PostgreSQL backend over one dedicated connection.
pub struct PgBackend {
    client: Client,
    dry_run: bool,
}

impl PgBackend {
    /// Connect to the configured database.
    pub async fn connect(config: &PgConfig) -> PgResult<Self> {
        let (client, connection) = config.to_pg_config().connect(NoTls).await?;

        // The connection object drives the socket; it lives until the
        // client is dropped.
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!(error = %err, "postgres connection task failed");
            }
        });

        Ok(Self {
            client,
            dry_run: false,
        })
    }

    /// Render mutating statements instead of executing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    async fn execute_statement(&self, statement: &str) -> LoadResult<()> {
        debug!(sql = %statement, "executing statement");
        self.client
            .batch_execute(statement)
            .await
            .map_err(|e| LoadError::database(format!("{}: {}", statement, e)))
    }
}

#[async_trait]
impl Backend for PgBackend {
    fn dry_run(&self) -> bool {
        self.dry_run
    }

    async fn dependency_graph(&mut self) -> LoadResult<DependencyGraph> {
        let rows = self
            .client
            .query(sql::FOREIGN_KEY_QUERY, &[])
            .await
            .map_err(|e| LoadError::database(format!("query dependencies: {}", e)))?;

        let mut graph = DependencyGraph::new();
        for row in rows {
            let child: String = row.get(0);
            let parent: String = row.get(1);
            graph.add_dependency(
                TableRef::parse(&child, "public"),
                TableRef::parse(&parent, "public"),
            );
        }
        debug!(children = graph.len(), "dependency graph extracted");
        Ok(graph)
    }

    async fn begin(&mut self) -> LoadResult<()> {
        self.execute_statement("BEGIN").await
    }

    async fn commit(&mut self) -> LoadResult<()> {
        self.execute_statement("COMMIT").await
    }

    async fn rollback(&mut self) -> LoadResult<()> {
        self.execute_statement("ROLLBACK").await
    }

    async fn truncate(&mut self, tables: &[TableRef]) -> LoadResult<()> {
        if tables.is_empty() {
            return Ok(());
        }
        let statement = sql::truncate_statement(tables);
        if self.dry_run {
            info!(sql = %statement, "dry-run");
            return Ok(());
        }
        self.execute_statement(&statement).await
    }

    async fn insert_row(&mut self, table: &TableRef, row: &Row) -> LoadResult<()> {
        let columns: Vec<&str> = row.keys().map(String::as_str).collect();
        let statement = sql::insert_statement(table, &columns);

        if self.dry_run {
            let values: Vec<&Value> = row.values().collect();
            info!(sql = %statement, params = ?values, "dry-run");
            return Ok(());
        }

        debug!(sql = %statement, "executing insert");
        let params: Vec<PgParam<'_>> = row.values().map(PgParam).collect();
        let param_refs: Vec<&(dyn tokio_postgres::types::ToSql + Sync)> =
            params.iter().map(|p| p as _).collect();

        self.client
            .execute(statement.as_str(), &param_refs)
            .await
            .map_err(|e| LoadError::database(format!("insert into {}: {}", table, e)))?;
        Ok(())
    }

    async fn eval_scalar(&mut self, expression: &str) -> LoadResult<Value> {
        debug!(sql = %expression, "evaluating expression");
        let messages = self
            .client
            .simple_query(expression)
            .await
            .map_err(|e| LoadError::eval(expression, e.to_string()))?;

        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                let text = row
                    .try_get(0)
                    .map_err(|e| LoadError::eval(expression, e.to_string()))?;
                return Ok(match text {
                    Some(text) => Value::Text(text.to_string()),
                    None => Value::Null,
                });
            }
        }
        Err(LoadError::eval(expression, "query returned no rows"))
    }

    async fn reset_sequences(&mut self, tables: &[TableRef]) -> LoadResult<()> {
        for table in tables {
            let rows = self
                .client
                .query(sql::SEQUENCE_COLUMNS_QUERY, &[&table.schema(), &table.name()])
                .await
                .map_err(|e| {
                    LoadError::database(format!("query sequence columns for {}: {}", table, e))
                })?;

            for row in rows {
                let column: String = row.get(0);
                let statement = sql::reset_sequence_statement(table, &column);
                if self.dry_run {
                    info!(sql = %statement, "dry-run");
                    continue;
                }
                self.execute_statement(&statement).await?;
            }
        }
        Ok(())
    }
}
