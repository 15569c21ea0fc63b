//! Qualified table identifiers.

use std::fmt;

/// A schema-qualified table name.
///
/// `TableRef` is the unit of dependency tracking, truncation, and
/// insertion. Fixture documents may name tables with or without a schema
/// qualifier; unqualified names are resolved against a configured default
/// schema at parse time, so every table the loader sees is fully
/// qualified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableRef {
    schema: String,
    name: String,
}

impl TableRef {
    /// Create a table reference from explicit schema and name parts.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }

    /// Parse a table key from a fixture document.
    ///
    /// `users` becomes `<default_schema>.users`; `crm.users` is split at
    /// the first dot.
    pub fn parse(raw: &str, default_schema: &str) -> Self {
        match raw.split_once('.') {
            Some((schema, name)) => Self::new(schema, name),
            None => Self::new(default_schema, raw),
        }
    }

    /// The schema part.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The bare table name, without the schema qualifier.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}
