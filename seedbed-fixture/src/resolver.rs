//! Fixture document tree resolution.
//!
//! A single [`resolve`] call walks one document and everything it
//! includes, producing the final [`Dataset`]. Includes merge depth-first
//! in declaration order, so later includes - and finally the document's
//! own content - win identity conflicts. The template registry built along
//! the way is internal to the call.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::{Dataset, Row};
use crate::error::{FixtureError, FixtureResult};
use crate::table::TableRef;
use crate::template::{Template, TemplateDef, TemplateRegistry};
use crate::value::Value;

/// Reserved top-level key naming documents to merge before this one.
const INCLUDE_KEY: &str = "include";

/// Reserved top-level key holding template definitions.
const TEMPLATES_KEY: &str = "templates";

/// Reserved row key naming the template a row inherits from.
const EXTENDS_KEY: &str = "extends";

/// Options controlling document resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Schema used to qualify table names written without one.
    pub default_schema: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default_schema: "public".to_string(),
        }
    }
}

impl ResolveOptions {
    /// Create options with the default schema (`public`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema used for unqualified table names.
    pub fn default_schema(mut self, schema: impl Into<String>) -> Self {
        self.default_schema = schema.into();
        self
    }
}

/// Resolve a fixture document tree into a merged dataset.
///
/// The visited-path set lives for exactly one call, so independent
/// resolutions never collide; within one call, revisiting a document
/// anywhere in the include tree is reported as an include cycle.
pub fn resolve(path: impl AsRef<Path>, options: &ResolveOptions) -> FixtureResult<Dataset> {
    let mut resolver = Resolver {
        options,
        visited: HashSet::new(),
        templates: TemplateRegistry::default(),
        dataset: Dataset::new(),
    };
    resolver.resolve_document(path.as_ref())?;
    Ok(resolver.dataset)
}

struct Resolver<'a> {
    options: &'a ResolveOptions,
    visited: HashSet<PathBuf>,
    templates: TemplateRegistry,
    dataset: Dataset,
}

impl Resolver<'_> {
    fn resolve_document(&mut self, path: &Path) -> FixtureResult<()> {
        let canonical = path.canonicalize().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                FixtureError::FileNotFound(path.display().to_string())
            } else {
                FixtureError::Io(err)
            }
        })?;

        if !self.visited.insert(canonical.clone()) {
            return Err(FixtureError::IncludeCycle(canonical.display().to_string()));
        }

        debug!(path = %canonical.display(), "resolving fixture document");

        let text = fs::read_to_string(&canonical)?;
        let raw: serde_yaml::Value = serde_yaml::from_str(&text)?;
        if raw.is_null() {
            return Ok(());
        }
        let serde_yaml::Value::Mapping(mapping) = raw else {
            return Err(FixtureError::document(
                "fixture document root must be a mapping",
            ));
        };

        let mut include_value = None;
        let mut templates_value = None;
        let mut table_entries = Vec::new();
        for (key, value) in &mapping {
            let Some(key) = key.as_str() else {
                return Err(FixtureError::document("top-level keys must be strings"));
            };
            match key {
                INCLUDE_KEY => include_value = Some(value),
                TEMPLATES_KEY => templates_value = Some(value),
                _ => table_entries.push((key, value)),
            }
        }

        // Includes merge before anything this document declares itself.
        if let Some(include) = include_value {
            for target in include_targets(include)? {
                let target_path = resolve_include_path(&canonical, &target);
                self.resolve_document(&target_path)?;
            }
        }

        if let Some(raw_templates) = templates_value {
            self.register_templates(raw_templates)?;
        }

        for (key, value) in table_entries {
            let table = TableRef::parse(key, &self.options.default_schema);
            let rows = self.parse_rows(&table, value)?;
            self.dataset.merge_rows(table, rows);
        }

        Ok(())
    }

    fn register_templates(&mut self, raw: &serde_yaml::Value) -> FixtureResult<()> {
        let defs: Vec<TemplateDef> = serde_yaml::from_value(raw.clone())?;
        for def in defs {
            let table = TableRef::parse(&def.table, &self.options.default_schema);
            let mut fields = Row::with_capacity(def.fields.len());
            for (column, value) in &def.fields {
                let value = Value::from_yaml(value).ok_or_else(|| {
                    FixtureError::invalid_value(
                        table.to_string(),
                        column.clone(),
                        format!("template '{}' field must be a scalar value", def.name),
                    )
                })?;
                fields.insert(column.clone(), value);
            }
            self.templates.register(
                table,
                def.name,
                Template {
                    extends: def.extends,
                    fields,
                },
            );
        }
        Ok(())
    }

    fn parse_rows(&self, table: &TableRef, raw: &serde_yaml::Value) -> FixtureResult<Vec<Row>> {
        let serde_yaml::Value::Sequence(entries) = raw else {
            return Err(FixtureError::document(format!(
                "table {} must hold a list of rows",
                table
            )));
        };

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let serde_yaml::Value::Mapping(columns) = entry else {
                return Err(FixtureError::document(format!(
                    "row in table {} must be a mapping",
                    table
                )));
            };
            rows.push(self.parse_row(table, columns)?);
        }
        Ok(rows)
    }

    fn parse_row(&self, table: &TableRef, columns: &serde_yaml::Mapping) -> FixtureResult<Row> {
        let mut extends = None;
        let mut row = Row::with_capacity(columns.len());

        for (key, raw) in columns {
            let Some(column) = key.as_str() else {
                return Err(FixtureError::document(format!(
                    "column names in table {} must be strings",
                    table
                )));
            };
            let value = Value::from_yaml(raw).ok_or_else(|| {
                FixtureError::invalid_value(table.to_string(), column, "expected a scalar value")
            })?;

            // The template reference is consumed here; it never becomes a
            // column.
            if column == EXTENDS_KEY {
                match value {
                    Value::Text(name) => extends = Some(name),
                    _ => {
                        return Err(FixtureError::invalid_value(
                            table.to_string(),
                            EXTENDS_KEY,
                            "template reference must be a string",
                        ));
                    }
                }
                continue;
            }
            row.insert(column.to_string(), value);
        }

        match extends {
            Some(name) => {
                let mut resolved = self.templates.resolve(table, &name)?;
                for (column, value) in row {
                    resolved.insert(column, value);
                }
                Ok(resolved)
            }
            None => Ok(row),
        }
    }
}

fn include_targets(raw: &serde_yaml::Value) -> FixtureResult<Vec<String>> {
    match raw {
        serde_yaml::Value::Null => Ok(Vec::new()),
        serde_yaml::Value::String(path) => Ok(vec![path.clone()]),
        serde_yaml::Value::Sequence(entries) => entries
            .iter()
            .map(|entry| {
                entry
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| FixtureError::document("include entries must be strings"))
            })
            .collect(),
        _ => Err(FixtureError::document(
            "include must be a path or a list of paths",
        )),
    }
}

fn resolve_include_path(containing: &Path, target: &str) -> PathBuf {
    let target_path = Path::new(target);
    if target_path.is_absolute() {
        return target_path.to_path_buf();
    }
    match containing.parent() {
        Some(dir) => dir.join(target_path),
        None => target_path.to_path_buf(),
    }
}
