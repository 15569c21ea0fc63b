//! MySQL backend implementation.

use async_trait::async_trait;
use mysql_async::Conn;
use mysql_async::prelude::*;
use seedbed_fixture::{Row, TableRef, Value};
use seedbed_loader::{Backend, DependencyGraph, LoadError, LoadResult};
use tracing::{debug, info};

use crate::config::MysqlConfig;
use crate::error::MysqlResult;
use crate::sql;
use crate::types::{from_mysql_value, to_mysql_value};

/// A MySQL backend over one dedicated connection.
///
/// MySQL has no schema concept matching the fixture format's qualified
/// names; the configured default schema only keeps catalog-derived graph
/// keys aligned with fixture table keys, and statements use bare table
/// names.
pub struct MysqlBackend {
    conn: Conn,
    dry_run: bool,
    default_schema: String,
}

impl MysqlBackend {
    /// Connect to the configured database.
    pub async fn connect(config: &MysqlConfig) -> MysqlResult<Self> {
        let conn = Conn::new(config.to_opts()).await?;
        Ok(Self {
            conn,
            dry_run: false,
            default_schema: "public".to_string(),
        })
    }

    /// Render mutating statements instead of executing them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Schema used to qualify catalog-derived table names.
    pub fn default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }

    /// Cleanly close the connection.
    pub async fn disconnect(self) -> MysqlResult<()> {
        self.conn.disconnect().await?;
        Ok(())
    }

    async fn execute_statement(&mut self, statement: &str) -> LoadResult<()> {
        debug!(sql = %statement, "executing statement");
        self.conn
            .query_drop(statement)
            .await
            .map_err(|e| LoadError::database(format!("{}: {}", statement, e)))
    }
}

#[async_trait]
impl Backend for MysqlBackend {
    fn dry_run(&self) -> bool {
        self.dry_run
    }

    async fn dependency_graph(&mut self) -> LoadResult<DependencyGraph> {
        let database: Option<Option<String>> = self
            .conn
            .query_first("SELECT DATABASE()")
            .await
            .map_err(|e| LoadError::database(format!("get current database: {}", e)))?;
        let database = database.flatten().ok_or_else(|| {
            LoadError::database("no database selected; put one in the connection URL")
        })?;

        let pairs: Vec<(String, String)> = self
            .conn
            .exec(sql::FOREIGN_KEY_QUERY, (database.clone(), database))
            .await
            .map_err(|e| LoadError::database(format!("query dependencies: {}", e)))?;

        let mut graph = DependencyGraph::new();
        for (child, parent) in pairs {
            graph.add_dependency(
                TableRef::new(&self.default_schema, child),
                TableRef::new(&self.default_schema, parent),
            );
        }
        debug!(children = graph.len(), "dependency graph extracted");
        Ok(graph)
    }

    async fn begin(&mut self) -> LoadResult<()> {
        self.execute_statement("START TRANSACTION").await
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

        let mut statements = Vec::with_capacity(tables.len() + 2);
        statements.push(sql::DISABLE_FOREIGN_KEY_CHECKS.to_string());
        statements.extend(tables.iter().map(sql::truncate_statement));
        statements.push(sql::ENABLE_FOREIGN_KEY_CHECKS.to_string());

        for statement in &statements {
            if self.dry_run {
                info!(sql = %statement, "dry-run");
                continue;
            }
            self.execute_statement(statement).await?;
        }
        Ok(())
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
        let params = mysql_async::Params::Positional(row.values().map(to_mysql_value).collect());
        self.conn
            .exec_drop(statement.as_str(), params)
            .await
            .map_err(|e| LoadError::database(format!("insert into {}: {}", table, e)))?;
        Ok(())
    }

    async fn eval_scalar(&mut self, expression: &str) -> LoadResult<Value> {
        let rewritten = sql::rewrite_interval_literals(expression);
        debug!(sql = %rewritten, "evaluating expression");

        let row: Option<mysql_async::Row> = self
            .conn
            .query_first(rewritten.as_str())
            .await
            .map_err(|e| LoadError::eval(expression, e.to_string()))?;
        let mut row = row.ok_or_else(|| LoadError::eval(expression, "query returned no rows"))?;
        let value: mysql_async::Value = row
            .take(0)
            .ok_or_else(|| LoadError::eval(expression, "query returned no columns"))?;

        Ok(from_mysql_value(value))
    }

    async fn reset_sequences(&mut self, tables: &[TableRef]) -> LoadResult<()> {
        for table in tables {
            let columns: Vec<String> = self
                .conn
                .exec(sql::AUTO_INCREMENT_COLUMNS_QUERY, (table.name(),))
                .await
                .map_err(|e| {
                    LoadError::database(format!(
                        "query auto_increment columns for {}: {}",
                        table, e
                    ))
                })?;

            for column in columns {
                let query = sql::next_auto_increment_query(table, &column);
                let next: Option<i64> = self
                    .conn
                    .query_first(query.as_str())
                    .await
                    .map_err(|e| LoadError::database(format!("{}: {}", query, e)))?;
                let next = next.unwrap_or(1);

                let statement = sql::set_auto_increment_statement(table, next);
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
