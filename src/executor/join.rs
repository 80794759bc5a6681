//! Nested-loop join composer
//!
//! `JoinedCursor` chains one scan cursor per range variable, leftmost
//! outermost. Advancing asks the current cursor for a row: a hit on a
//! non-innermost cursor descends, a hit on the innermost yields a joined
//! result, and exhaustion resets the cursor and backtracks to its outer
//! neighbor. When the outermost cursor exhausts, every member is reset and
//! the composer stays exhausted.

use tracing::debug;

use crate::planner::RangeVariable;
use crate::schema::Row;

use super::completion::CompletionSet;
use super::context::ExecContext;
use super::errors::ExecResult;
use super::scan::ScanCursor;

/// Nested-loop composition of scan cursors, leftmost outermost
#[derive(Debug)]
pub struct JoinedCursor<'a> {
    cursors: Vec<ScanCursor<'a>>,
    current: isize,
}

impl<'a> JoinedCursor<'a> {
    /// Builds the composer over the query's range variables in join order.
    pub fn over(ranges: &'a [RangeVariable]) -> Self {
        Self {
            cursors: ranges.iter().map(ScanCursor::new).collect(),
            current: 0,
        }
    }

    /// Advances to the next joined result. On a hit, every range variable's
    /// slot in the context holds its contributing row. After the outermost
    /// cursor exhausts, all members are reset and false is returned until
    /// `reset`.
    pub fn advance(&mut self, ctx: &mut ExecContext) -> ExecResult<bool> {
        if self.cursors.is_empty() {
            return Ok(false);
        }
        let innermost = self.cursors.len() - 1;

        while self.current >= 0 {
            let i = self.current as usize;
            if self.cursors[i].advance(ctx)? {
                if i < innermost {
                    self.current += 1;
                    continue;
                }
                return Ok(true);
            }
            self.cursors[i].reset(ctx);
            self.current -= 1;
        }

        debug!(ranges = self.cursors.len(), "join exhausted");
        for cursor in &mut self.cursors {
            cursor.reset(ctx);
        }
        Ok(false)
    }

    /// Returns the composer to before-first on every member.
    pub fn reset(&mut self, ctx: &mut ExecContext) {
        for cursor in &mut self.cursors {
            cursor.reset(ctx);
        }
        self.current = 0;
    }

    /// Takes the completion set of the right-preserving member at the given
    /// slot, for the anti-join second pass.
    pub fn take_completion(&mut self, range_position: usize) -> Option<CompletionSet> {
        self.cursors
            .iter_mut()
            .find(|c| c.range().range_position == range_position)
            .and_then(|c| c.take_completion())
    }

    /// Concatenates the current rows of all members into one result row.
    /// Call only after a successful advance.
    pub fn combined_row(&self, ctx: &ExecContext) -> Row {
        let mut out = Vec::new();
        for cursor in &self.cursors {
            let range = cursor.range();
            match ctx.row(range.range_position) {
                Some(row) => out.extend(row.iter().cloned()),
                None => out.extend(range.source.empty_row()),
            }
        }
        out
    }
}
