//! Schema subsystem for rangescan
//!
//! Column types, runtime values, and the representable-range check the scan
//! engine uses to degenerate out-of-range index bounds instead of failing.

mod types;

pub use types::{ColumnDef, ColumnType, RangeCheck, Row, TypeError, TypeResult, Value};
