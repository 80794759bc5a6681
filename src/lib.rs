//! rangescan: range-variable scan and join execution engine
//!
//! A query's FROM clause compiles into one `RangeVariable` per table
//! reference. Each descriptor carries the chosen index, start/end bounds
//! derived from sargable predicates, and the residual join/where filters.
//! At run time a `ScanCursor` drives one descriptor, a `JoinedCursor`
//! composes them into a nested-loop join with outer-row preservation, and
//! an `AntiJoinCursor` second pass completes RIGHT and FULL outer joins.

pub mod executor;
pub mod index;
pub mod planner;
pub mod schema;
pub mod source;

pub use executor::{AntiJoinCursor, ExecContext, JoinedCursor, ScanCursor};
pub use planner::{AccessPlanSummary, RangeVariable};
pub use source::RangeSource;
