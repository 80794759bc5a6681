//! The range variable scan cursor
//!
//! `ScanCursor` drives one range variable through its compiled access path:
//! open positions the index cursor (or degenerates it when a bound literal
//! falls outside the column's representable range), advance pulls rows
//! through the end bound and both residual filters, and exhaustion releases
//! the cursor and, for a left-preserving scan that matched nothing, emits a
//! single all-NULL placeholder row.
//!
//! Lifecycle: before-first -> active -> exhausted. `reset` returns the
//! cursor to before-first and may be called in any state.

use tracing::{debug, trace};

use crate::index::{RowCursor, RowId, SeekOp};
use crate::planner::{CmpOp, Comparison, RangeVariable};
use crate::schema::{RangeCheck, Row};

use super::completion::CompletionSet;
use super::context::ExecContext;
use super::errors::{ExecError, ExecResult};
use super::filters::RowMatcher;

/// Scan state machine over one range variable
#[derive(Debug)]
pub struct ScanCursor<'a> {
    range: &'a RangeVariable,
    matcher: RowMatcher,
    cursor: Option<RowCursor>,
    before_first: bool,
    has_outer_row: bool,
    current_row_id: Option<RowId>,
    completion: Option<CompletionSet>,
}

impl<'a> ScanCursor<'a> {
    /// Creates a cursor in the before-first state. A right-preserving scan
    /// gets a completion set for the anti-join second pass.
    pub fn new(range: &'a RangeVariable) -> Self {
        Self {
            range,
            matcher: RowMatcher,
            cursor: None,
            before_first: true,
            has_outer_row: false,
            current_row_id: None,
            completion: if range.is_right_join {
                Some(CompletionSet::new())
            } else {
                None
            },
        }
    }

    /// The range variable this cursor scans.
    pub fn range(&self) -> &'a RangeVariable {
        self.range
    }

    /// Execution slot of the scanned range variable.
    pub fn range_position(&self) -> usize {
        self.range.range_position
    }

    /// The row the last successful advance published, placeholder included.
    pub fn current_row<'c>(&self, ctx: &'c ExecContext) -> Option<&'c Row> {
        ctx.row(self.range.range_position)
    }

    /// Id of the row the last successful advance produced, when it came from
    /// the store rather than placeholder synthesis.
    pub fn current_row_id(&self) -> Option<RowId> {
        self.current_row_id
    }

    /// Advances to the next qualifying row, publishing it into the context
    /// at this range variable's slot. Returns false on exhaustion; after the
    /// false the cursor stays exhausted until `reset`.
    pub fn advance(&mut self, ctx: &mut ExecContext) -> ExecResult<bool> {
        if self.before_first {
            self.open(ctx)?;
            self.before_first = false;
        }
        self.find_next(ctx)
    }

    /// Returns the cursor to before-first, releasing any open index cursor
    /// and clearing this range variable's context slot. Idempotent.
    pub fn reset(&mut self, ctx: &mut ExecContext) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.release();
        }
        self.cursor = None;
        self.before_first = true;
        self.has_outer_row = false;
        self.current_row_id = None;
        ctx.clear_row(self.range.range_position);
    }

    /// Takes the completion set accumulated by a right-preserving scan.
    pub fn take_completion(&mut self) -> Option<CompletionSet> {
        self.completion.take()
    }

    fn open(&mut self, ctx: &ExecContext) -> ExecResult<()> {
        let range = self.range;
        let cond = &range.conditions;

        self.has_outer_row = range.is_left_join;

        let store = range.source.store();
        let index = match cond.index {
            Some(id) => store.index(id),
            None => store.primary_index(),
        };

        let cursor = if cond.has_multi_prefix() {
            let c = self.open_multi(ctx)?;
            if !cond.is_join_index {
                self.has_outer_row = false;
            }
            c
        } else if cond.start.is_empty() {
            // No start bound. An IS NULL end bound still wants the leading
            // NULL run, so only a value end bound skips it.
            let end_is_null_test = cond
                .end
                .first()
                .map(|c| c.op == CmpOp::IsNull)
                .unwrap_or(false);
            if cond.end.is_empty() || end_is_null_test {
                index.first_row()
            } else {
                index.first_row_not_null()
            }
        } else {
            // Positioning keys off the first start conjunct; later conjuncts
            // on the same column are enforced by re-seeking never being
            // weaker than them plus the residual checks.
            let first = match cond.start.first() {
                Some(first) => first,
                None => return Err(ExecError::inconsistency("start bound with no conjunct")),
            };
            let c = if first.op == CmpOp::NotNull {
                index.first_row_not_null()
            } else {
                self.open_bounded(ctx, first)?
            };
            // A where-classified start bound already filters on behalf of the
            // WHERE clause, so an empty result yields no outer row.
            if !cond.is_join_index {
                self.has_outer_row = false;
            }
            c
        };

        debug!(
            range = range.range_position,
            source = %range.source.name(),
            index = index.name(),
            "scan opened"
        );
        self.cursor = Some(cursor);
        Ok(())
    }

    /// Single-column positioned open with the out-of-range degeneracy rules:
    /// a literal below the column's range keeps a lower-bound scan meaningful
    /// (every row qualifies) but empties anything else; above is symmetric.
    fn open_bounded(&self, ctx: &ExecContext, first: &Comparison) -> ExecResult<RowCursor> {
        let range = self.range;
        let store = range.source.store();
        let index = match range.conditions.index {
            Some(id) => store.index(id),
            None => store.primary_index(),
        };

        let operand = match &first.operand {
            Some(operand) => operand,
            None => {
                return Err(ExecError::inconsistency(format!(
                    "start bound {} has no operand",
                    first
                )))
            }
        };
        let value = self.matcher.operand_value(ctx, operand).clone();
        let ty = range.column(first.column.column).ty;

        let cursor = match ty.check_range(&value) {
            RangeCheck::Within => {
                let converted = ty.convert(&value)?;
                index.find_first_row(seek_op(first.op)?, &converted)
            }
            RangeCheck::Below => match first.op {
                CmpOp::Greater | CmpOp::GreaterEqual => index.first_row_not_null(),
                _ => index.empty(),
            },
            RangeCheck::Above => match first.op {
                CmpOp::Smaller | CmpOp::SmallerEqual => index.first_row_not_null(),
                _ => index.empty(),
            },
        };
        Ok(cursor)
    }

    /// Multi-column exact-prefix open. Any prefix literal outside its
    /// column's range empties the cursor; no prefix can match it.
    fn open_multi(&self, ctx: &ExecContext) -> ExecResult<RowCursor> {
        let range = self.range;
        let store = range.source.store();
        let index = match range.conditions.index {
            Some(id) => store.index(id),
            None => store.primary_index(),
        };

        let mut prefix = Vec::with_capacity(range.conditions.prefix.len());
        for cmp in &range.conditions.prefix {
            let operand = match &cmp.operand {
                Some(operand) => operand,
                None => {
                    return Err(ExecError::inconsistency(format!(
                        "prefix bound {} has no operand",
                        cmp
                    )))
                }
            };
            let value = self.matcher.operand_value(ctx, operand).clone();
            let ty = range.column(cmp.column.column).ty;
            if ty.check_range(&value) != RangeCheck::Within {
                return Ok(index.empty());
            }
            prefix.push(ty.convert(&value)?);
        }
        Ok(index.find_first_rows(&prefix))
    }

    fn find_next(&mut self, ctx: &mut ExecContext) -> ExecResult<bool> {
        let range = self.range;
        let cond = &range.conditions;
        let matcher = self.matcher;
        let pos = range.range_position;
        let store = range.source.store();

        let cursor = match self.cursor.as_mut() {
            Some(cursor) => cursor,
            None => return Ok(false),
        };

        while let Some(id) = cursor.next_row() {
            ctx.set_row(pos, store.row(id).clone());

            if !matcher.matches(ctx, &cond.end) {
                // The ordered scan has run past the qualifying run.
                if !cond.is_join_index {
                    self.has_outer_row = false;
                }
                break;
            }
            if !matcher.matches(ctx, &cond.join_filter) {
                continue;
            }
            if !matcher.matches(ctx, &cond.where_filter) {
                self.has_outer_row = false;
                continue;
            }

            if let Some(completion) = self.completion.as_mut() {
                completion.record(id);
            }
            self.has_outer_row = false;
            self.current_row_id = Some(id);
            return Ok(true);
        }

        cursor.release();
        self.current_row_id = None;
        ctx.clear_row(pos);

        if self.has_outer_row {
            self.has_outer_row = false;
            ctx.set_row(pos, range.source.empty_row());
            if matcher.matches(ctx, &cond.where_filter) {
                trace!(range = pos, "outer placeholder emitted");
                return Ok(true);
            }
            ctx.clear_row(pos);
        }
        Ok(false)
    }
}

fn seek_op(op: CmpOp) -> ExecResult<SeekOp> {
    match op {
        CmpOp::Equal => Ok(SeekOp::Equal),
        CmpOp::Greater => Ok(SeekOp::Greater),
        CmpOp::GreaterEqual => Ok(SeekOp::GreaterEqual),
        other => Err(ExecError::inconsistency(format!(
            "operator {} cannot position a scan",
            other.symbol()
        ))),
    }
}
