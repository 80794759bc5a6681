//! Range sources for rangescan
//!
//! A range source is the table-like thing one range variable iterates:
//! an ordinary table, a derived (subquery) table, or one namespace of a
//! graph. All variants answer the same four questions — resolve a column by
//! name, fetch a column by ordinal, produce an empty-row template, and hand
//! out the primary access path — but only tables and derived tables support
//! compiled index bounds.

mod graph;
mod table;

use std::sync::Arc;

pub use graph::{GraphMode, GraphView};
pub use table::Table;

use crate::index::IndexTree;
use crate::schema::{ColumnDef, Row};

/// A polymorphic handle to a queryable data source
#[derive(Debug, Clone)]
pub enum RangeSource {
    /// An ordinary table
    Table(Arc<Table>),
    /// A derived (subquery) table; the alias is mandatory
    Derived {
        /// User-specified alias for the subquery
        alias: String,
        /// Materialized subquery rows
        table: Arc<Table>,
    },
    /// One namespace of a graph view
    Graph {
        /// The backing graph
        view: Arc<GraphView>,
        /// Selected namespace
        mode: GraphMode,
    },
}

impl RangeSource {
    /// Wraps an ordinary table.
    pub fn table(table: Arc<Table>) -> Self {
        RangeSource::Table(table)
    }

    /// Wraps a derived table under its mandatory alias.
    pub fn derived(table: Arc<Table>, alias: impl Into<String>) -> Self {
        RangeSource::Derived {
            alias: alias.into(),
            table,
        }
    }

    /// Wraps one namespace of a graph view.
    pub fn graph(view: Arc<GraphView>, mode: GraphMode) -> Self {
        RangeSource::Graph { view, mode }
    }

    /// The backing row store for this source.
    pub fn store(&self) -> &Table {
        match self {
            RangeSource::Table(t) => t,
            RangeSource::Derived { table, .. } => table,
            RangeSource::Graph { view, mode } => view.table(*mode),
        }
    }

    /// Whether compiled index bounds may be attached to this source.
    /// Graph namespaces are full-scan only.
    pub fn supports_index_bounds(&self) -> bool {
        !matches!(self, RangeSource::Graph { .. })
    }

    /// Display name: table name, derived alias, or graph namespace.
    pub fn name(&self) -> String {
        match self {
            RangeSource::Table(t) => t.name().to_string(),
            RangeSource::Derived { alias, .. } => alias.clone(),
            RangeSource::Graph { view, mode } => format!("{}.{}", view.name(), mode.as_str()),
        }
    }

    /// Resolves a column ordinal by name within this source's namespace.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.store().find_column(name)
    }

    /// Column definition by ordinal.
    pub fn column(&self, i: usize) -> &ColumnDef {
        self.store().column(i)
    }

    /// Number of columns in this source's namespace.
    pub fn column_count(&self) -> usize {
        self.store().column_count()
    }

    /// All-NULL row template for outer-join placeholders.
    pub fn empty_row(&self) -> Row {
        self.store().empty_row()
    }

    /// The primary access path.
    pub fn primary_index(&self) -> &IndexTree {
        self.store().primary_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, Value};

    #[test]
    fn test_capability_flags() {
        let t = Arc::new(Table::new(
            "t",
            vec![ColumnDef::new("a", ColumnType::Int)],
        ));
        let g = Arc::new(GraphView::new(
            "g",
            vec![ColumnDef::new("vid", ColumnType::Int)],
            Vec::new(),
            Vec::new(),
        ));

        assert!(RangeSource::table(t.clone()).supports_index_bounds());
        assert!(RangeSource::derived(t, "sub").supports_index_bounds());
        assert!(!RangeSource::graph(g, GraphMode::Vertices).supports_index_bounds());
    }

    #[test]
    fn test_graph_source_resolves_namespace_columns() {
        let mut view = GraphView::new(
            "g",
            vec![
                ColumnDef::new("vid", ColumnType::Int),
                ColumnDef::new("label", ColumnType::Text),
            ],
            vec![ColumnDef::new("eid", ColumnType::Int)],
            Vec::new(),
        );
        view.table_mut(GraphMode::Vertices)
            .insert(vec![Value::Int(7), Value::Text("a".into())])
            .unwrap();

        let src = RangeSource::graph(Arc::new(view), GraphMode::Vertices);
        assert_eq!(src.find_column("label"), Some(1));
        assert_eq!(src.find_column("eid"), None);
        assert_eq!(src.empty_row(), vec![Value::Null, Value::Null]);
        assert_eq!(src.name(), "g.vertexes");
    }
}
