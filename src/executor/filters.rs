//! Predicate evaluation over the execution context
//!
//! Residual predicates and end bounds are re-checked row by row. Evaluation
//! follows SQL semantics for NULL: a comparison involving NULL is not true,
//! so the row is rejected, except for the explicit null tests.

use crate::planner::{CmpOp, Comparison, Conjunction, Operand};
use crate::schema::Value;
use std::cmp::Ordering;

use super::context::ExecContext;

/// Stateless conjunction evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct RowMatcher;

impl RowMatcher {
    /// True when every comparison in the conjunction holds against the
    /// context's current rows. The empty conjunction is always true.
    pub fn matches(&self, ctx: &ExecContext, conj: &Conjunction) -> bool {
        conj.comparisons().iter().all(|c| self.matches_comparison(ctx, c))
    }

    /// Evaluates one comparison.
    pub fn matches_comparison(&self, ctx: &ExecContext, cmp: &Comparison) -> bool {
        let left = ctx.value(cmp.column.range_position, cmp.column.column);

        match cmp.op {
            CmpOp::IsNull => return left.is_null(),
            CmpOp::NotNull => return !left.is_null(),
            _ => {}
        }

        let right = match &cmp.operand {
            Some(rhs) => self.operand_value(ctx, rhs),
            None => return false,
        };

        match left.compare(right) {
            Some(ord) => match cmp.op {
                CmpOp::Equal => ord == Ordering::Equal,
                CmpOp::NotEqual => ord != Ordering::Equal,
                CmpOp::Greater => ord == Ordering::Greater,
                CmpOp::GreaterEqual => ord != Ordering::Less,
                CmpOp::Smaller => ord == Ordering::Less,
                CmpOp::SmallerEqual => ord != Ordering::Greater,
                CmpOp::IsNull | CmpOp::NotNull => false,
            },
            // NULL or incomparable operands never satisfy a comparison.
            None => false,
        }
    }

    /// Resolves the right-hand side of a comparison.
    pub fn operand_value<'a>(&self, ctx: &'a ExecContext, operand: &'a Operand) -> &'a Value {
        match operand {
            Operand::Literal(v) => v,
            Operand::Column(c) => ctx.value(c.range_position, c.column),
        }
    }
}
