//! Per-execution row context
//!
//! Predicates reference columns of any range variable in the query by its
//! `range_position`. The context holds the current row of every range
//! variable so a cursor deep in a nested-loop join can evaluate predicates
//! against the rows its outer partners have already produced.

use crate::schema::{Row, Value};

/// Current-row registry for one execution, indexed by `range_position`
#[derive(Debug, Clone)]
pub struct ExecContext {
    rows: Vec<Option<Row>>,
}

impl ExecContext {
    /// Creates a context with one empty slot per range variable.
    pub fn new(range_count: usize) -> Self {
        Self {
            rows: vec![None; range_count],
        }
    }

    /// Number of slots.
    pub fn range_count(&self) -> usize {
        self.rows.len()
    }

    /// The current row of the range variable at `pos`, if one is set.
    pub fn row(&self, pos: usize) -> Option<&Row> {
        self.rows.get(pos).and_then(|r| r.as_ref())
    }

    /// One column of the current row at `pos`; NULL when no row is set.
    pub fn value(&self, pos: usize, column: usize) -> &Value {
        match self.row(pos) {
            Some(row) => &row[column],
            None => &Value::Null,
        }
    }

    /// Publishes the current row of the range variable at `pos`.
    pub fn set_row(&mut self, pos: usize, row: Row) {
        self.rows[pos] = Some(row);
    }

    /// Clears the slot at `pos`.
    pub fn clear_row(&mut self, pos: usize) {
        self.rows[pos] = None;
    }
}
