//! Ordered-index storage for rangescan
//!
//! In-memory BTreeMap indexes over table rows. The scan engine consumes this
//! layer through five cursor-open modes (full, first-not-null, single-bound
//! seek, composite exact prefix, empty) plus the advance/release protocol.

mod btree;

pub use btree::{IndexId, IndexKey, IndexTree, RowCursor, RowId, SeekOp};
