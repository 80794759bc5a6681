//! Execution engine for rangescan
//!
//! Runtime counterpart of the planner descriptors: the per-execution row
//! context, predicate evaluation, the scan cursor state machine, the
//! nested-loop join composer, and the anti-join second pass that completes
//! RIGHT and FULL outer joins.

pub mod anti_join;
pub mod completion;
pub mod context;
pub mod errors;
pub mod filters;
pub mod join;
pub mod scan;

pub use anti_join::AntiJoinCursor;
pub use completion::CompletionSet;
pub use context::ExecContext;
pub use errors::{ExecError, ExecErrorCode, ExecResult};
pub use filters::RowMatcher;
pub use join::JoinedCursor;
pub use scan::ScanCursor;
