//! Compiled predicate structures
//!
//! The upstream query compiler hands the engine predicates already broken
//! into single comparisons: a column of one range variable against either a
//! literal or a column of another range variable. Conjunctions are plain AND
//! lists; anything richer is the compiler's problem, not ours.

use std::fmt;

use crate::schema::Value;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `=`
    Equal,
    /// `<>` — never classifiable into an index bound
    NotEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<`
    Smaller,
    /// `<=`
    SmallerEqual,
    /// `IS NULL`
    IsNull,
    /// `IS NOT NULL`
    NotNull,
}

impl CmpOp {
    /// Operator rendering for diagnostics
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Equal => "=",
            CmpOp::NotEqual => "<>",
            CmpOp::Greater => ">",
            CmpOp::GreaterEqual => ">=",
            CmpOp::Smaller => "<",
            CmpOp::SmallerEqual => "<=",
            CmpOp::IsNull => "IS NULL",
            CmpOp::NotNull => "IS NOT NULL",
        }
    }
}

/// A column of one range variable, identified by execution slot and ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    /// `range_position` of the owning range variable
    pub range_position: usize,
    /// Column ordinal within that range variable's source
    pub column: usize,
}

impl ColumnRef {
    /// Creates a column reference
    pub fn new(range_position: usize, column: usize) -> Self {
        Self {
            range_position,
            column,
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}.c{}", self.range_position, self.column)
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A constant value
    Literal(Value),
    /// A column of another (outer) range variable
    Column(ColumnRef),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{}", v),
            Operand::Column(c) => write!(f, "{}", c),
        }
    }
}

/// A single compiled comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Left-hand column (always a column of the descriptor it is attached to)
    pub column: ColumnRef,
    /// Operator
    pub op: CmpOp,
    /// Right-hand side; `None` for the unary null tests
    pub operand: Option<Operand>,
}

impl Comparison {
    /// Generic constructor
    pub fn new(column: ColumnRef, op: CmpOp, operand: Option<Operand>) -> Self {
        Self {
            column,
            op,
            operand,
        }
    }

    /// `column = literal`
    pub fn eq(column: ColumnRef, value: Value) -> Self {
        Self::new(column, CmpOp::Equal, Some(Operand::Literal(value)))
    }

    /// `column > literal`
    pub fn gt(column: ColumnRef, value: Value) -> Self {
        Self::new(column, CmpOp::Greater, Some(Operand::Literal(value)))
    }

    /// `column >= literal`
    pub fn gte(column: ColumnRef, value: Value) -> Self {
        Self::new(column, CmpOp::GreaterEqual, Some(Operand::Literal(value)))
    }

    /// `column < literal`
    pub fn lt(column: ColumnRef, value: Value) -> Self {
        Self::new(column, CmpOp::Smaller, Some(Operand::Literal(value)))
    }

    /// `column <= literal`
    pub fn lte(column: ColumnRef, value: Value) -> Self {
        Self::new(column, CmpOp::SmallerEqual, Some(Operand::Literal(value)))
    }

    /// `column = other_column` (join predicate)
    pub fn eq_col(column: ColumnRef, other: ColumnRef) -> Self {
        Self::new(column, CmpOp::Equal, Some(Operand::Column(other)))
    }

    /// `column IS NULL`
    pub fn is_null(column: ColumnRef) -> Self {
        Self::new(column, CmpOp::IsNull, None)
    }

    /// `column IS NOT NULL`
    pub fn not_null(column: ColumnRef) -> Self {
        Self::new(column, CmpOp::NotNull, None)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            Some(rhs) => write!(f, "{} {} {}", self.column, self.op.symbol(), rhs),
            None => write!(f, "{} {}", self.column, self.op.symbol()),
        }
    }
}

/// An AND list of comparisons; empty means "always true"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conjunction(Vec<Comparison>);

impl Conjunction {
    /// Empty (always-true) conjunction
    pub fn new() -> Self {
        Self::default()
    }

    /// Conjunction of a single comparison
    pub fn of(cmp: Comparison) -> Self {
        Self(vec![cmp])
    }

    /// ANDs another comparison in
    pub fn and(&mut self, cmp: Comparison) {
        self.0.push(cmp);
    }

    /// True when no comparisons are attached
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The comparisons, in the order they were attached
    pub fn comparisons(&self) -> &[Comparison] {
        &self.0
    }

    /// The first comparison, if any. Scan positioning keys off this.
    pub fn first(&self) -> Option<&Comparison> {
        self.0.first()
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "true");
        }
        for (i, cmp) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", cmp)?;
        }
        Ok(())
    }
}
