//! Plan-time descriptors for rangescan
//!
//! The planner side of the engine: compiled predicate structures, condition
//! classification into index bounds, the `RangeVariable` descriptor itself,
//! and access plan summaries for EXPLAIN output.

pub mod ast;
pub mod conditions;
pub mod descriptor;
pub mod errors;
pub mod explain;

pub use ast::{CmpOp, ColumnRef, Comparison, Conjunction, Operand};
pub use conditions::RangeConditions;
pub use descriptor::RangeVariable;
pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::AccessPlanSummary;
