//! Foreign-key dependency graph and topological ordering.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use seedbed_fixture::TableRef;

use crate::error::{LoadError, LoadResult};

/// Node state during the depth-first sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Mapping from each child table to the parent tables it references via
/// foreign key.
///
/// Built once per load from live catalog state and read-only afterwards.
/// Tables without foreign keys simply have no entry.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    edges: IndexMap<TableRef, Vec<TableRef>>,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `child` references `parent` via a foreign key.
    pub fn add_dependency(&mut self, child: TableRef, parent: TableRef) {
        self.edges.entry(child).or_default().push(parent);
    }

    /// Parent tables referenced by `table`, in registration order.
    pub fn parents(&self, table: &TableRef) -> &[TableRef] {
        self.edges
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of child tables with at least one dependency.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Order the requested tables and their transitive dependencies.
    ///
    /// The result reads dependent-before-dependency front to back: a
    /// table that owns foreign keys appears before the tables it
    /// references. That is the safe *truncation* order; reversed, it is
    /// the safe *insertion* order. Tables pulled in only as transitive
    /// dependencies appear exactly once at their dependency-appropriate
    /// position. Any cycle reachable from the requested set - including a
    /// self-loop - aborts the whole sort.
    pub fn sort(&self, requested: &[TableRef]) -> LoadResult<Vec<TableRef>> {
        let requested_set: HashSet<&TableRef> = requested.iter().collect();
        let mut marks: HashMap<TableRef, Mark> = HashMap::new();
        let mut order = Vec::new();

        for table in requested {
            self.visit(table, false, &requested_set, &mut marks, &mut order)?;
        }

        order.reverse();
        Ok(order)
    }

    fn visit(
        &self,
        node: &TableRef,
        pulled_in: bool,
        requested: &HashSet<&TableRef>,
        marks: &mut HashMap<TableRef, Mark>,
        order: &mut Vec<TableRef>,
    ) -> LoadResult<()> {
        match marks.get(node) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                return Err(LoadError::DependencyCycle(node.to_string()));
            }
            None => {}
        }

        marks.insert(node.clone(), Mark::InProgress);
        for parent in self.parents(node) {
            self.visit(parent, true, requested, marks, order)?;
        }
        marks.insert(node.clone(), Mark::Done);

        if pulled_in || requested.contains(node) {
            order.push(node.clone());
        }

        Ok(())
    }
}
