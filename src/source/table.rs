//! In-memory tables
//!
//! A table owns its rows and its ordered indexes. Index 0 is always the
//! primary access path (insertion order); secondary indexes are declared
//! over column ordinals and kept current on insert.

use crate::index::{IndexId, IndexTree, RowId};
use crate::schema::{ColumnDef, Row, TypeResult, Value};

/// A table-like row store with ordered indexes
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<ColumnDef>,
    rows: Vec<Row>,
    indexes: Vec<IndexTree>,
}

impl Table {
    /// Creates an empty table with the given columns and a primary
    /// (insertion-order) index.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
            indexes: vec![IndexTree::new("primary", Vec::new())],
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declares an ordered index over the given column ordinals and indexes
    /// all existing rows. Returns the new index's id.
    pub fn add_index(&mut self, name: impl Into<String>, key_columns: Vec<usize>) -> IndexId {
        let mut index = IndexTree::new(name, key_columns);
        for (id, row) in self.rows.iter().enumerate() {
            index.insert(row, id);
        }
        self.indexes.push(index);
        self.indexes.len() - 1
    }

    /// Inserts a row, converting each value to its column's type exactly.
    pub fn insert(&mut self, row: Row) -> TypeResult<RowId> {
        let mut typed = Vec::with_capacity(self.columns.len());
        for (col, value) in self.columns.iter().zip(row.iter()) {
            typed.push(col.ty.convert(value)?);
        }

        let id = self.rows.len();
        for index in &mut self.indexes {
            index.insert(&typed, id);
        }
        self.rows.push(typed);
        Ok(id)
    }

    /// Fetches a row by id.
    pub fn row(&self, id: RowId) -> &Row {
        &self.rows[id]
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column definition by ordinal.
    pub fn column(&self, i: usize) -> &ColumnDef {
        &self.columns[i]
    }

    /// Resolves a column ordinal by name.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// The primary (insertion-order) access path.
    pub fn primary_index(&self) -> &IndexTree {
        &self.indexes[0]
    }

    /// An index by id; id 0 is the primary.
    pub fn index(&self, id: IndexId) -> &IndexTree {
        &self.indexes[id]
    }

    /// All-NULL row template, used for outer-join placeholders.
    pub fn empty_row(&self) -> Row {
        vec![Value::Null; self.columns.len()]
    }
}
