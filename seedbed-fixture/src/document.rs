//! The merged fixture dataset and identity-based row merging.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::table::TableRef;
use crate::value::Value;

/// Column name that acts as the merge identity for a row.
pub const IDENTITY_COLUMN: &str = "id";

/// One fixture row: an insertion-ordered column-to-value map.
///
/// Column order is the row's own declaration order; it is not normalized
/// across rows of the same table.
pub type Row = IndexMap<String, Value>;

/// The hashable identity of a row, derived from its `id` column.
///
/// Float, NULL, and unevaluated `$eval` identities are not usable as merge
/// keys; rows carrying them merge as if they had no identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RowIdentity {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn row_identity(row: &Row) -> Option<RowIdentity> {
    match row.get(IDENTITY_COLUMN)? {
        Value::Bool(b) => Some(RowIdentity::Bool(*b)),
        Value::Int(i) => Some(RowIdentity::Int(*i)),
        Value::Text(s) => Some(RowIdentity::Text(s.clone())),
        Value::Null | Value::Float(_) | Value::Eval(_) => None,
    }
}

/// The final per-table dataset produced by resolving a fixture document
/// tree.
///
/// Tables keep the order in which they were first seen; rows keep
/// declaration order, except that a merged row with a known identity
/// replaces its predecessor in place.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    tables: IndexMap<TableRef, Vec<Row>>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over the tables in first-seen order.
    pub fn tables(&self) -> impl Iterator<Item = &TableRef> {
        self.tables.keys()
    }

    /// Rows for one table, if the dataset has any.
    pub fn rows(&self, table: &TableRef) -> Option<&[Row]> {
        self.tables.get(table).map(Vec::as_slice)
    }

    /// Number of tables with rows.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the dataset holds no tables at all.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of rows across all tables.
    pub fn row_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    /// Merge a batch of rows into one table's accumulated list.
    ///
    /// A row whose `id` matches an already-merged row replaces it in
    /// place; all other rows are appended in input order.
    pub fn merge_rows(&mut self, table: TableRef, incoming: Vec<Row>) {
        let rows = self.tables.entry(table).or_default();

        let mut by_identity: HashMap<RowIdentity, usize> = HashMap::new();
        for (position, row) in rows.iter().enumerate() {
            if let Some(identity) = row_identity(row) {
                by_identity.insert(identity, position);
            }
        }

        for row in incoming {
            match row_identity(&row) {
                Some(identity) => match by_identity.get(&identity) {
                    Some(&position) => rows[position] = row,
                    None => {
                        by_identity.insert(identity, rows.len());
                        rows.push(row);
                    }
                },
                None => rows.push(row),
            }
        }
    }
}
