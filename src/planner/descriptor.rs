//! Range variable descriptors
//!
//! A `RangeVariable` is the compiled, immutable-after-build description of
//! one access path in a query: which source, which index, which bounds, and
//! which residual predicates. It is built once at plan time; every execution
//! opens fresh cursors against it.

use crate::index::IndexId;
use crate::schema::ColumnDef;
use crate::source::RangeSource;

use super::ast::Comparison;
use super::conditions::RangeConditions;
use super::errors::{PlannerError, PlannerResult};

/// One range variable of a compiled plan
#[derive(Debug, Clone)]
pub struct RangeVariable {
    /// The data source this range variable iterates
    pub source: RangeSource,
    /// Optional table alias
    pub alias: Option<String>,
    /// Optional per-column aliases, consulted before source column names
    pub column_aliases: Option<Vec<String>>,
    /// Compiled bounds and residual predicates
    pub conditions: RangeConditions,
    /// Preserving side of a LEFT (or FULL) outer join
    pub is_left_join: bool,
    /// Preserving side of a RIGHT (or FULL) outer join
    pub is_right_join: bool,
    /// Zero-based slot within the enclosing query, unique per query
    pub range_position: usize,
}

impl RangeVariable {
    /// Creates a descriptor over a source at the given execution slot.
    pub fn new(source: RangeSource, range_position: usize) -> Self {
        Self {
            source,
            alias: None,
            column_aliases: None,
            conditions: RangeConditions::default(),
            is_left_join: false,
            is_right_join: false,
            range_position,
        }
    }

    /// Sets the table alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets per-column aliases.
    pub fn with_column_aliases(mut self, aliases: Vec<String>) -> Self {
        self.column_aliases = Some(aliases);
        self
    }

    /// Marks the join sides this range variable preserves.
    /// LEFT sets `is_left_join`, RIGHT sets `is_right_join`, FULL sets both.
    pub fn set_join_type(&mut self, is_left: bool, is_right: bool) {
        self.is_left_join = is_left;
        self.is_right_join = is_right;
    }

    /// Classifies one index-usable comparison into this descriptor's bounds.
    pub fn add_index_condition(
        &mut self,
        cmp: Comparison,
        index: IndexId,
        is_join: bool,
    ) -> PlannerResult<()> {
        self.check_bounds_allowed(&cmp)?;
        self.conditions.add_index_condition(cmp, index, is_join)
    }

    /// Classifies a batch of equality comparisons over the index's leading
    /// columns (multi-column exact prefix).
    pub fn add_index_conditions(
        &mut self,
        cmps: Vec<Comparison>,
        index: IndexId,
        is_join: bool,
    ) -> PlannerResult<()> {
        for cmp in &cmps {
            self.check_bounds_allowed(cmp)?;
        }
        self.conditions.add_index_conditions(cmps, index, is_join)
    }

    /// ANDs a residual comparison into the join or where filter.
    pub fn add_condition(&mut self, cmp: Comparison, is_join: bool) {
        self.conditions.add_condition(cmp, is_join);
    }

    /// True when a start bound is attached.
    pub fn has_index_condition(&self) -> bool {
        self.conditions.has_index_condition()
    }

    /// Resolves a column ordinal by name, consulting column aliases first.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        if let Some(aliases) = &self.column_aliases {
            if let Some(i) = aliases.iter().position(|a| a == name) {
                return Some(i);
            }
        }
        self.source.find_column(name)
    }

    /// Column definition by ordinal.
    pub fn column(&self, i: usize) -> &ColumnDef {
        self.source.column(i)
    }

    /// Join type rendering: INNER, LEFT OUTER, RIGHT OUTER, or FULL.
    pub fn join_type(&self) -> &'static str {
        match (self.is_left_join, self.is_right_join) {
            (true, true) => "FULL",
            (true, false) => "LEFT OUTER",
            (false, true) => "RIGHT OUTER",
            (false, false) => "INNER",
        }
    }

    fn check_bounds_allowed(&self, cmp: &Comparison) -> PlannerResult<()> {
        if !self.source.supports_index_bounds() {
            return Err(PlannerError::bounds_unsupported(self.source.name()));
        }
        if cmp.column.range_position != self.range_position {
            return Err(PlannerError::inconsistency(format!(
                "bound column {} does not belong to range {}",
                cmp.column, self.range_position
            )));
        }
        if cmp.column.column >= self.source.column_count() {
            return Err(PlannerError::inconsistency(format!(
                "bound column {} outside source {} with {} columns",
                cmp.column,
                self.source.name(),
                self.source.column_count()
            )));
        }
        Ok(())
    }
}
