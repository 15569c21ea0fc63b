//! Per-table row templates and inheritance resolution.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::document::Row;
use crate::error::{FixtureError, FixtureResult};
use crate::table::TableRef;

/// The `templates:` block entry as written in a fixture document.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateDef {
    /// Table the template is scoped to.
    pub table: String,
    /// Template name, unique within the table scope.
    pub name: String,
    /// Optional parent template in the same table scope.
    #[serde(default)]
    pub extends: Option<String>,
    /// Default field values.
    #[serde(default)]
    pub fields: IndexMap<String, serde_yaml::Value>,
}

/// A registered template: its parent reference and converted field map.
#[derive(Debug, Clone)]
pub struct Template {
    /// Parent template name within the same table scope.
    pub extends: Option<String>,
    /// Default field values.
    pub fields: Row,
}

/// Registry of templates keyed by `(table, name)`.
///
/// Built up while resolving a document tree and discarded afterwards;
/// later registrations overwrite earlier same-named templates in the same
/// table scope.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    tables: IndexMap<TableRef, IndexMap<String, Template>>,
}

impl TemplateRegistry {
    /// Register a template, replacing any previous `(table, name)` entry.
    pub fn register(&mut self, table: TableRef, name: String, template: Template) {
        self.tables.entry(table).or_default().insert(name, template);
    }

    /// Resolve a template's full field map, walking its `extends` chain.
    ///
    /// Parent fields come first and each descendant overrides matching
    /// keys. A chain that revisits a template name is a
    /// [`FixtureError::TemplateCycle`]; a dangling reference is a
    /// [`FixtureError::TemplateNotFound`]. Both are ordinary errors.
    pub fn resolve(&self, table: &TableRef, name: &str) -> FixtureResult<Row> {
        let mut in_progress = HashSet::new();
        self.resolve_inner(table, name, &mut in_progress)
    }

    fn resolve_inner(
        &self,
        table: &TableRef,
        name: &str,
        in_progress: &mut HashSet<String>,
    ) -> FixtureResult<Row> {
        if !in_progress.insert(name.to_string()) {
            return Err(FixtureError::TemplateCycle {
                table: table.to_string(),
                name: name.to_string(),
            });
        }

        let template = self
            .tables
            .get(table)
            .and_then(|templates| templates.get(name))
            .ok_or_else(|| FixtureError::TemplateNotFound {
                table: table.to_string(),
                name: name.to_string(),
            })?;

        let mut fields = match &template.extends {
            Some(parent) => self.resolve_inner(table, parent, in_progress)?,
            None => Row::new(),
        };
        for (column, value) in &template.fields {
            fields.insert(column.clone(), value.clone());
        }

        Ok(fields)
    }
}
