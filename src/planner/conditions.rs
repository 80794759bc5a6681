//! Condition classification for one range variable
//!
//! Predicates proven usable against the chosen index arrive here one at a
//! time (or as a multi-column equality batch) and are folded into start/end
//! bounds; everything else accumulates into the join-residual or
//! where-residual conjunction and is re-evaluated row by row at scan time.
//!
//! Classification by operator:
//! - IS NOT NULL       -> start bound (replacing)
//! - IS NULL           -> end bound (replacing)
//! - =                 -> both bounds (replacing), single point lookup
//! - > / >=            -> ANDed into the start bound
//! - < / <=            -> ANDed into the end bound
//! - anything else     -> fatal planner inconsistency

use crate::index::IndexId;

use super::ast::{CmpOp, Comparison, Conjunction};
use super::errors::{PlannerError, PlannerResult};

/// Compiled index bounds and residual predicates for one range variable
#[derive(Debug, Clone, Default)]
pub struct RangeConditions {
    /// Chosen index; `None` means the primary access path
    pub index: Option<IndexId>,
    /// True when the index conditions came from a join (ON) clause
    pub is_join_index: bool,
    /// Start bound conjunction; empty means unbounded below
    pub start: Conjunction,
    /// End bound conjunction, re-evaluated per row; empty means unbounded above
    pub end: Conjunction,
    /// Multi-column exact-equality prefix; non-empty only when more than one
    /// leading column is bound, and then `start` is not used for positioning
    pub prefix: Vec<Comparison>,
    multi_column_count: usize,
    /// Join-residual predicate (ON-clause leftovers)
    pub join_filter: Conjunction,
    /// Where-residual predicate
    pub where_filter: Conjunction,
}

impl RangeConditions {
    /// Classifies one index-usable comparison into the bounds.
    pub fn add_index_condition(
        &mut self,
        cmp: Comparison,
        index: IndexId,
        is_join: bool,
    ) -> PlannerResult<()> {
        self.index = Some(index);
        self.is_join_index = is_join;

        match cmp.op {
            CmpOp::NotNull => {
                self.start = Conjunction::of(cmp);
            }
            CmpOp::IsNull => {
                self.end = Conjunction::of(cmp);
            }
            CmpOp::Equal => {
                self.start = Conjunction::of(cmp.clone());
                self.end = Conjunction::of(cmp);
            }
            CmpOp::Greater | CmpOp::GreaterEqual => {
                self.start.and(cmp);
            }
            CmpOp::Smaller | CmpOp::SmallerEqual => {
                self.end.and(cmp);
            }
            other => {
                return Err(PlannerError::inconsistency(format!(
                    "operator {} reached bound compilation",
                    other.symbol()
                )));
            }
        }

        Ok(())
    }

    /// Classifies a batch of equality comparisons over an index's leading
    /// columns. A single comparison degenerates to an ordinary point bound;
    /// two or more become a multi-column exact-prefix lookup. Every
    /// comparison is also ANDed into the end bound so the ordered scan stops
    /// at the end of the matching run.
    ///
    /// One narrow guard is preserved from the original planner interaction:
    /// when this descriptor already carries a multi-column *join* condition
    /// on the same index and the incoming call is *where*-classified with an
    /// empty batch, the call is a no-op rather than a reclassification.
    pub fn add_index_conditions(
        &mut self,
        cmps: Vec<Comparison>,
        index: IndexId,
        is_join: bool,
    ) -> PlannerResult<()> {
        if self.index == Some(index)
            && self.is_join_index
            && !is_join
            && self.multi_column_count > 0
            && cmps.is_empty()
        {
            return Ok(());
        }

        self.index = Some(index);
        self.is_join_index = is_join;

        for cmp in &cmps {
            if cmp.op != CmpOp::Equal {
                return Err(PlannerError::inconsistency(format!(
                    "operator {} in multi-column equality batch",
                    cmp.op.symbol()
                )));
            }
            self.end.and(cmp.clone());
        }

        if cmps.len() == 1 {
            if let Some(cmp) = cmps.into_iter().next() {
                self.start = Conjunction::of(cmp);
            }
        } else {
            self.multi_column_count = cmps.len();
            self.prefix = cmps;
        }

        Ok(())
    }

    /// ANDs a comparison into the join-residual predicate.
    pub fn add_join_condition(&mut self, cmp: Comparison) {
        self.join_filter.and(cmp);
    }

    /// ANDs a comparison into the where-residual predicate.
    pub fn add_where_condition(&mut self, cmp: Comparison) {
        self.where_filter.and(cmp);
    }

    /// Routes a residual comparison by its classification.
    pub fn add_condition(&mut self, cmp: Comparison, is_join: bool) {
        if is_join {
            self.add_join_condition(cmp);
        } else {
            self.add_where_condition(cmp);
        }
    }

    /// True when a start bound is attached.
    pub fn has_index_condition(&self) -> bool {
        !self.start.is_empty()
    }

    /// True when positioning uses the multi-column exact prefix.
    pub fn has_multi_prefix(&self) -> bool {
        self.multi_column_count > 1
    }

    /// Number of columns in the exact prefix (0 when not a prefix lookup).
    pub fn multi_column_count(&self) -> usize {
        self.multi_column_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::ast::ColumnRef;
    use crate::schema::Value;

    fn col(c: usize) -> ColumnRef {
        ColumnRef::new(0, c)
    }

    #[test]
    fn test_equal_sets_both_bounds() {
        let mut cond = RangeConditions::default();
        cond.add_index_condition(Comparison::eq(col(0), Value::Int(7)), 1, false)
            .unwrap();
        assert_eq!(cond.start.comparisons().len(), 1);
        assert_eq!(cond.end.comparisons().len(), 1);
        assert!(cond.has_index_condition());
        assert!(!cond.has_multi_prefix());
    }

    #[test]
    fn test_range_operators_conjoin() {
        let mut cond = RangeConditions::default();
        cond.add_index_condition(Comparison::gt(col(0), Value::Int(5)), 1, false)
            .unwrap();
        cond.add_index_condition(Comparison::lt(col(0), Value::Int(10)), 1, false)
            .unwrap();
        cond.add_index_condition(Comparison::lte(col(0), Value::Int(9)), 1, false)
            .unwrap();
        assert_eq!(cond.start.comparisons().len(), 1);
        assert_eq!(cond.end.comparisons().len(), 2);
    }

    #[test]
    fn test_null_tests_classify_by_side() {
        let mut cond = RangeConditions::default();
        cond.add_index_condition(Comparison::not_null(col(0)), 1, false)
            .unwrap();
        assert_eq!(cond.start.first().unwrap().op, CmpOp::NotNull);

        let mut cond = RangeConditions::default();
        cond.add_index_condition(Comparison::is_null(col(0)), 1, false)
            .unwrap();
        assert!(cond.start.is_empty());
        assert_eq!(cond.end.first().unwrap().op, CmpOp::IsNull);
    }

    #[test]
    fn test_unclassifiable_operator_is_fatal() {
        let mut cond = RangeConditions::default();
        let cmp = Comparison::new(
            col(0),
            CmpOp::NotEqual,
            Some(crate::planner::ast::Operand::Literal(Value::Int(1))),
        );
        let err = cond.add_index_condition(cmp, 1, false).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_multi_column_batch_builds_prefix() {
        let mut cond = RangeConditions::default();
        cond.add_index_conditions(
            vec![
                Comparison::eq(col(0), Value::Int(1)),
                Comparison::eq(col(1), Value::Int(2)),
            ],
            2,
            true,
        )
        .unwrap();
        assert!(cond.has_multi_prefix());
        assert_eq!(cond.multi_column_count(), 2);
        // Both equalities also terminate the ordered scan.
        assert_eq!(cond.end.comparisons().len(), 2);
        assert!(cond.start.is_empty());
    }

    #[test]
    fn test_single_column_batch_degenerates_to_point_bound() {
        let mut cond = RangeConditions::default();
        cond.add_index_conditions(vec![Comparison::eq(col(0), Value::Int(1))], 2, false)
            .unwrap();
        assert!(!cond.has_multi_prefix());
        assert!(cond.has_index_condition());
    }

    #[test]
    fn test_zero_column_where_call_after_join_prefix_is_noop() {
        let mut cond = RangeConditions::default();
        cond.add_index_conditions(
            vec![
                Comparison::eq(col(0), Value::Int(1)),
                Comparison::eq(col(1), Value::Int(2)),
            ],
            2,
            true,
        )
        .unwrap();
        let before = cond.clone();

        cond.add_index_conditions(Vec::new(), 2, false).unwrap();

        assert!(cond.is_join_index, "join classification must survive");
        assert_eq!(cond.end, before.end);
        assert_eq!(cond.prefix, before.prefix);
    }

    #[test]
    fn test_zero_column_guard_requires_same_index() {
        let mut cond = RangeConditions::default();
        cond.add_index_conditions(
            vec![
                Comparison::eq(col(0), Value::Int(1)),
                Comparison::eq(col(1), Value::Int(2)),
            ],
            2,
            true,
        )
        .unwrap();

        // Different index: the call is not the guarded interaction.
        cond.add_index_conditions(Vec::new(), 3, false).unwrap();
        assert!(!cond.is_join_index);
        assert_eq!(cond.index, Some(3));
    }
}
