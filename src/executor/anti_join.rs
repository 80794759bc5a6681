//! Anti-join second pass for RIGHT and FULL outer joins
//!
//! After the forward pass has recorded which preserved rows matched, this
//! cursor walks the preserved side once more and emits exactly the rows the
//! forward pass never produced, with all-NULL placeholders published for the
//! join partners.

use tracing::debug;

use crate::index::{RowCursor, RowId};
use crate::planner::RangeVariable;
use crate::schema::Row;

use super::completion::CompletionSet;
use super::context::ExecContext;
use super::errors::ExecResult;
use super::filters::RowMatcher;

/// Unmatched-row cursor over a right-preserving range variable
#[derive(Debug)]
pub struct AntiJoinCursor<'a> {
    range: &'a RangeVariable,
    partners: Vec<&'a RangeVariable>,
    completion: CompletionSet,
    matcher: RowMatcher,
    cursor: Option<RowCursor>,
    before_first: bool,
    current_row_id: Option<RowId>,
}

impl<'a> AntiJoinCursor<'a> {
    /// Creates the second-pass cursor from the forward pass's completion
    /// set. `partners` are the other range variables of the join, which
    /// receive placeholder rows for every emitted result.
    pub fn new(
        range: &'a RangeVariable,
        completion: CompletionSet,
        partners: Vec<&'a RangeVariable>,
    ) -> Self {
        Self {
            range,
            partners,
            completion,
            matcher: RowMatcher,
            cursor: None,
            before_first: true,
            current_row_id: None,
        }
    }

    /// Id of the preserved row the last successful advance produced.
    pub fn current_row_id(&self) -> Option<RowId> {
        self.current_row_id
    }

    /// The preserved row the last successful advance published.
    pub fn current_row<'c>(&self, ctx: &'c ExecContext) -> Option<&'c Row> {
        ctx.row(self.range.range_position)
    }

    /// Advances to the next unmatched preserved row. Bounds never apply
    /// here; the pass is a full scan filtered by the completion set and the
    /// where residual.
    pub fn advance(&mut self, ctx: &mut ExecContext) -> ExecResult<bool> {
        let range = self.range;
        let store = range.source.store();
        let matcher = self.matcher;
        let pos = range.range_position;

        if self.before_first {
            self.before_first = false;
            debug!(
                range = pos,
                unmatched_candidates = store.row_count() - self.completion.len(),
                "anti-join pass opened"
            );
            self.cursor = Some(store.primary_index().first_row());
            for partner in &self.partners {
                ctx.set_row(partner.range_position, partner.source.empty_row());
            }
        }

        let cursor = match self.cursor.as_mut() {
            Some(cursor) => cursor,
            None => return Ok(false),
        };

        while let Some(id) = cursor.next_row() {
            if self.completion.contains(id) {
                continue;
            }
            ctx.set_row(pos, store.row(id).clone());
            if !matcher.matches(ctx, &range.conditions.where_filter) {
                continue;
            }
            self.current_row_id = Some(id);
            return Ok(true);
        }

        cursor.release();
        self.current_row_id = None;
        ctx.clear_row(pos);
        for partner in &self.partners {
            ctx.clear_row(partner.range_position);
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{ColumnRef, Comparison};
    use crate::schema::{ColumnDef, ColumnType, Value};
    use crate::source::{RangeSource, Table};
    use std::sync::Arc;

    fn table(vals: &[i64]) -> Table {
        let mut t = Table::new("t", vec![ColumnDef::new("v", ColumnType::Int)]);
        for &v in vals {
            t.insert(vec![Value::Int(v)]).unwrap();
        }
        t
    }

    #[test]
    fn test_emits_only_unmatched_rows() {
        let t = table(&[10, 20, 30]);
        let rv = RangeVariable::new(RangeSource::table(Arc::new(t)), 0);

        let mut matched = CompletionSet::new();
        matched.record(1);

        let mut ctx = ExecContext::new(1);
        let mut pass = AntiJoinCursor::new(&rv, matched, Vec::new());
        let mut seen = Vec::new();
        while pass.advance(&mut ctx).unwrap() {
            seen.push(pass.current_row_id().unwrap());
        }
        assert_eq!(seen, vec![0, 2]);
    }

    #[test]
    fn test_partner_slots_hold_placeholders() {
        let right = RangeVariable::new(RangeSource::table(Arc::new(table(&[1]))), 1);
        let mut left = RangeVariable::new(RangeSource::table(Arc::new(table(&[5]))), 0);
        left.set_join_type(true, false);

        let mut ctx = ExecContext::new(2);
        let mut pass = AntiJoinCursor::new(&right, CompletionSet::new(), vec![&left]);
        assert!(pass.advance(&mut ctx).unwrap());
        assert_eq!(ctx.row(0).unwrap(), &vec![Value::Null]);
        assert_eq!(ctx.row(1).unwrap(), &vec![Value::Int(1)]);

        assert!(!pass.advance(&mut ctx).unwrap());
        assert!(ctx.row(0).is_none());
        assert!(ctx.row(1).is_none());
    }

    #[test]
    fn test_where_residual_applies_to_second_pass() {
        let mut rv = RangeVariable::new(RangeSource::table(Arc::new(table(&[10, 20]))), 0);
        rv.add_condition(Comparison::gt(ColumnRef::new(0, 0), Value::Int(15)), false);

        let mut ctx = ExecContext::new(1);
        let mut pass = AntiJoinCursor::new(&rv, CompletionSet::new(), Vec::new());
        assert!(pass.advance(&mut ctx).unwrap());
        assert_eq!(pass.current_row_id(), Some(1));
        assert!(!pass.advance(&mut ctx).unwrap());
    }
}
