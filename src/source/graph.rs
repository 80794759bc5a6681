//! Graph-backed range sources
//!
//! A graph view exposes three property namespaces (vertices, edges, paths),
//! each a plain row store. A range variable over a graph selects exactly one
//! namespace at construction and supports full-scan iteration only; index
//! bounds are never compiled against graph sources.

use crate::schema::ColumnDef;

use super::table::Table;

/// Which property namespace of a graph a range variable iterates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphMode {
    /// Vertex rows
    Vertices,
    /// Edge rows
    Edges,
    /// Path rows
    Paths,
}

impl GraphMode {
    /// Namespace name for diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphMode::Vertices => "vertexes",
            GraphMode::Edges => "edges",
            GraphMode::Paths => "paths",
        }
    }
}

/// A queryable graph with per-namespace property tables
#[derive(Debug, Clone)]
pub struct GraphView {
    name: String,
    vertices: Table,
    edges: Table,
    paths: Table,
}

impl GraphView {
    /// Creates a graph view with the given property columns per namespace.
    pub fn new(
        name: impl Into<String>,
        vertex_props: Vec<ColumnDef>,
        edge_props: Vec<ColumnDef>,
        path_props: Vec<ColumnDef>,
    ) -> Self {
        let name = name.into();
        Self {
            vertices: Table::new(format!("{}.vertexes", name), vertex_props),
            edges: Table::new(format!("{}.edges", name), edge_props),
            paths: Table::new(format!("{}.paths", name), path_props),
            name,
        }
    }

    /// Graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The row store backing one namespace.
    pub fn table(&self, mode: GraphMode) -> &Table {
        match mode {
            GraphMode::Vertices => &self.vertices,
            GraphMode::Edges => &self.edges,
            GraphMode::Paths => &self.paths,
        }
    }

    /// Mutable access for loading graph data.
    pub fn table_mut(&mut self, mode: GraphMode) -> &mut Table {
        match mode {
            GraphMode::Vertices => &mut self.vertices,
            GraphMode::Edges => &mut self.edges,
            GraphMode::Paths => &mut self.paths,
        }
    }
}
