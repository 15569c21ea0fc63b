//! PostgreSQL statement generation.

use seedbed_fixture::TableRef;

/// Child/parent foreign-key pairs for every table that owns one.
///
/// Yields `schema.table` qualified names for both sides.
pub const FOREIGN_KEY_QUERY: &str = "\
SELECT
    tc.table_schema || '.' || tc.table_name AS child,
    ccu.table_schema || '.' || ccu.table_name AS parent
FROM
    information_schema.table_constraints tc
    JOIN information_schema.key_column_usage kcu
        ON tc.constraint_name = kcu.constraint_name
        AND tc.constraint_schema = kcu.constraint_schema
    JOIN information_schema.constraint_column_usage ccu
        ON ccu.constraint_name = tc.constraint_name
        AND ccu.constraint_schema = tc.constraint_schema
WHERE
    tc.constraint_type = 'FOREIGN KEY'";

/// Columns of one table whose default is backed by a sequence.
pub const SEQUENCE_COLUMNS_QUERY: &str = "\
SELECT column_name FROM information_schema.columns
WHERE table_schema = $1 AND table_name = $2 AND column_default LIKE 'nextval%'";

/// The parameter placeholder for a 1-based index.
pub fn placeholder(index: usize) -> String {
    format!("${}", index)
}

/// One combined truncate covering every table in the load set.
///
/// `RESTART IDENTITY` zeroes sequences, `CASCADE` follows foreign keys
/// out of the set. Callers guarantee a non-empty table list.
pub fn truncate_statement(tables: &[TableRef]) -> String {
    let list = tables
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("TRUNCATE {} RESTART IDENTITY CASCADE", list)
}

/// A parameterized insert for one row's own column set.
pub fn insert_statement(table: &TableRef, columns: &[&str]) -> String {
    let placeholders = (1..=columns.len())
        .map(placeholder)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}

/// Set one sequence-backed column's sequence to the column maximum, or 1
/// when the table is empty.
pub fn reset_sequence_statement(table: &TableRef, column: &str) -> String {
    format!(
        "SELECT setval(pg_get_serial_sequence('{table}', '{column}'), COALESCE(MAX({column}), 1)) FROM {table}",
        table = table,
        column = column
    )
}
