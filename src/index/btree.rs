//! BTreeMap-based ordered index and row cursors
//!
//! An `IndexTree` maps composite keys to row ids with deterministic ordering.
//! NULL sorts before every other key component, which is what lets the scan
//! engine implement "first row not null" by skipping the leading run.
//!
//! Cursors returned by the open methods snapshot the qualifying tail of the
//! index at open time and must be released by the owner; release is
//! idempotent and a released cursor yields no further rows.

use std::collections::{BTreeMap, VecDeque};

use crate::schema::{Row, Value};

/// Identifies a row within its table's store
pub type RowId = usize;

/// Identifies an index within its table's index list
pub type IndexId = usize;

/// One component of an index key.
///
/// NULL orders first; floats are stored as total-ordering bits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexKey {
    /// SQL NULL (sorts before all values)
    Null,
    /// Boolean (false < true)
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float as total-ordering bits
    Float(u64),
    /// String
    Text(String),
}

impl IndexKey {
    /// Builds a key component from a runtime value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => IndexKey::Null,
            Value::Bool(b) => IndexKey::Bool(*b),
            Value::Int(i) => IndexKey::Int(*i),
            Value::Float(f) => IndexKey::Float(Self::float_bits(*f)),
            Value::Text(s) => IndexKey::Text(s.clone()),
        }
    }

    /// Total-ordering bit transform: negative floats flip all bits,
    /// non-negative floats flip the sign bit.
    fn float_bits(v: f64) -> u64 {
        let bits = v.to_bits();
        if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, IndexKey::Null)
    }
}

/// Positioning operator for `IndexTree::find_first_row`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOp {
    /// Position at the first row whose key equals the value
    Equal,
    /// Position at the first row whose key exceeds the value
    Greater,
    /// Position at the first row whose key equals or exceeds the value
    GreaterEqual,
}

/// An ordered index over one table.
///
/// `key_columns` is empty for the primary (insertion-order) access path.
#[derive(Debug, Clone)]
pub struct IndexTree {
    name: String,
    key_columns: Vec<usize>,
    map: BTreeMap<(Vec<IndexKey>, RowId), ()>,
}

impl IndexTree {
    /// Creates an empty index over the given key column ordinals.
    pub fn new(name: impl Into<String>, key_columns: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            key_columns,
            map: BTreeMap::new(),
        }
    }

    /// Index name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key column ordinals, outermost first.
    pub fn key_columns(&self) -> &[usize] {
        &self.key_columns
    }

    /// Indexes one row. Primary (no key columns) orders by row id alone.
    pub fn insert(&mut self, row: &Row, row_id: RowId) {
        let key: Vec<IndexKey> = self
            .key_columns
            .iter()
            .map(|&c| IndexKey::from_value(&row[c]))
            .collect();
        self.map.insert((key, row_id), ());
    }

    /// Opens a full ascending cursor.
    pub fn first_row(&self) -> RowCursor {
        RowCursor::over(self.map.keys().map(|(_, id)| *id))
    }

    /// Opens a cursor at the first row whose leading key component is not
    /// NULL. With no key columns this is the same as a full scan.
    pub fn first_row_not_null(&self) -> RowCursor {
        if self.key_columns.is_empty() {
            return self.first_row();
        }
        RowCursor::over(
            self.map
                .keys()
                .filter(|(key, _)| !key[0].is_null())
                .map(|(_, id)| *id),
        )
    }

    /// Opens a cursor positioned by `op` against a single leading-column
    /// value; iteration continues to the end of the index, so the caller's
    /// end bound decides where qualifying rows stop.
    pub fn find_first_row(&self, op: SeekOp, value: &Value) -> RowCursor {
        let key = IndexKey::from_value(value);
        let ids = self
            .map
            .keys()
            .filter(|(k, _)| !k[0].is_null())
            .skip_while(|(k, _)| match op {
                SeekOp::Equal | SeekOp::GreaterEqual => k[0] < key,
                SeekOp::Greater => k[0] <= key,
            })
            .map(|(_, id)| *id);
        RowCursor::over(ids)
    }

    /// Opens a cursor positioned at the first row whose key starts at or
    /// after the exact multi-column prefix. As with `find_first_row`, the
    /// caller's end bound terminates the match run.
    pub fn find_first_rows(&self, prefix: &[Value]) -> RowCursor {
        let prefix: Vec<IndexKey> = prefix.iter().map(IndexKey::from_value).collect();
        let ids = self
            .map
            .range((prefix.clone(), 0)..)
            .map(|((_, id), _)| *id);
        RowCursor::over(ids)
    }

    /// Opens a cursor that yields no rows.
    pub fn empty(&self) -> RowCursor {
        RowCursor::over(std::iter::empty())
    }
}

/// A released-on-exit row cursor.
///
/// `next` after `release` returns `None`; releasing twice is a no-op.
#[derive(Debug)]
pub struct RowCursor {
    ids: VecDeque<RowId>,
    released: bool,
}

impl RowCursor {
    fn over(ids: impl Iterator<Item = RowId>) -> Self {
        Self {
            ids: ids.collect(),
            released: false,
        }
    }

    /// Advances to the next row id, if any.
    pub fn next_row(&mut self) -> Option<RowId> {
        if self.released {
            return None;
        }
        self.ids.pop_front()
    }

    /// Releases the cursor; idempotent.
    pub fn release(&mut self) {
        self.ids.clear();
        self.released = true;
    }

    /// True once released.
    pub fn is_released(&self) -> bool {
        self.released
    }
}
