//! MySQL statement generation.

use std::sync::LazyLock;

use regex_lite::Regex;
use seedbed_fixture::TableRef;

/// Matches a Postgres interval literal: `INTERVAL '1 day'`.
static INTERVAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"INTERVAL\s+'(\d+)\s+([^']+)'").expect("interval pattern is valid")
});

/// Child/parent foreign-key pairs within the current database.
///
/// Bound parameters: the current database name, twice.
pub const FOREIGN_KEY_QUERY: &str = "\
SELECT
    TABLE_NAME AS child,
    REFERENCED_TABLE_NAME AS parent
FROM
    INFORMATION_SCHEMA.KEY_COLUMN_USAGE
WHERE
    REFERENCED_TABLE_SCHEMA IS NOT NULL
    AND TABLE_SCHEMA = ?
    AND REFERENCED_TABLE_SCHEMA = ?";

/// Auto-increment columns of one table in the current database.
pub const AUTO_INCREMENT_COLUMNS_QUERY: &str = "\
SELECT COLUMN_NAME
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_SCHEMA = DATABASE()
  AND TABLE_NAME = ?
  AND EXTRA LIKE '%auto_increment%'";

/// Truncating a foreign-key-referenced table is refused outright unless
/// checking is disabled for the session.
pub const DISABLE_FOREIGN_KEY_CHECKS: &str = "SET FOREIGN_KEY_CHECKS = 0";

/// Re-enable foreign-key checking after truncation.
pub const ENABLE_FOREIGN_KEY_CHECKS: &str = "SET FOREIGN_KEY_CHECKS = 1";

/// The parameter placeholder; MySQL uses one generic marker regardless of
/// position.
pub fn placeholder(_index: usize) -> &'static str {
    "?"
}

/// Truncate one table. MySQL has no cross-database truncate list and no
/// schema qualifiers here; the table name stands alone.
pub fn truncate_statement(table: &TableRef) -> String {
    format!("TRUNCATE TABLE {}", table.name())
}

/// A parameterized insert for one row's own column set.
pub fn insert_statement(table: &TableRef, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(placeholder)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name(),
        columns.join(", "),
        placeholders
    )
}

/// The next auto-increment value for a column: max + 1, or 1 when empty.
pub fn next_auto_increment_query(table: &TableRef, column: &str) -> String {
    format!(
        "SELECT COALESCE(MAX({}), 0) + 1 FROM {}",
        column,
        table.name()
    )
}

/// Set a table's auto-increment counter.
pub fn set_auto_increment_statement(table: &TableRef, next: i64) -> String {
    format!("ALTER TABLE {} AUTO_INCREMENT = {}", table.name(), next)
}

/// Rewrite Postgres interval literals to MySQL syntax.
///
/// `INTERVAL '1 day'` becomes `INTERVAL 1 DAY`; expressions without an
/// interval literal pass through unchanged.
pub fn rewrite_interval_literals(expression: &str) -> String {
    INTERVAL_RE
        .replace_all(expression, |captures: &regex_lite::Captures<'_>| {
            format!("INTERVAL {} {}", &captures[1], captures[2].to_uppercase())
        })
        .into_owned()
}
