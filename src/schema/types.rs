//! Column types and runtime values
//!
//! Supported column types:
//! - tinyint / smallint / int / bigint: signed integers of increasing width
//! - float: 64-bit floating point
//! - bool: Boolean
//! - text: UTF-8 string
//!
//! Integer widths matter to the scan engine: a literal bound outside the
//! representable range of the indexed column degenerates the scan instead of
//! erroring, so `ColumnType::check_range` distinguishes below/within/above.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Result type for value conversions
pub type TypeResult<T> = Result<T, TypeError>;

/// Value conversion errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// Value cannot be represented in the target type
    #[error("cannot convert {value} to {target}")]
    Inconvertible {
        /// Rendered source value
        value: String,
        /// Target type name
        target: &'static str,
    },
}

/// Column data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 8-bit signed integer
    TinyInt,
    /// 16-bit signed integer
    SmallInt,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    BigInt,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// UTF-8 string
    Text,
}

/// Outcome of comparing a value against a type's representable range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    /// Value is representable in the type
    Within,
    /// Value is below the type's minimum
    Below,
    /// Value is above the type's maximum
    Above,
}

impl ColumnType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::TinyInt => "tinyint",
            ColumnType::SmallInt => "smallint",
            ColumnType::Int => "int",
            ColumnType::BigInt => "bigint",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::Text => "text",
        }
    }

    fn int_bounds(&self) -> Option<(i64, i64)> {
        match self {
            ColumnType::TinyInt => Some((i8::MIN as i64, i8::MAX as i64)),
            ColumnType::SmallInt => Some((i16::MIN as i64, i16::MAX as i64)),
            ColumnType::Int => Some((i32::MIN as i64, i32::MAX as i64)),
            ColumnType::BigInt => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }

    /// Compares a value against this type's representable range.
    ///
    /// Only integer widths can reject a value; every other (type, value)
    /// pair is considered within range and left to `convert`.
    pub fn check_range(&self, value: &Value) -> RangeCheck {
        let (min, max) = match self.int_bounds() {
            Some(bounds) => bounds,
            None => return RangeCheck::Within,
        };

        match value {
            Value::Int(i) => {
                if *i < min {
                    RangeCheck::Below
                } else if *i > max {
                    RangeCheck::Above
                } else {
                    RangeCheck::Within
                }
            }
            Value::Float(f) => {
                if *f < min as f64 {
                    RangeCheck::Below
                } else if *f > max as f64 {
                    RangeCheck::Above
                } else {
                    RangeCheck::Within
                }
            }
            _ => RangeCheck::Within,
        }
    }

    /// Converts a value to this type exactly.
    ///
    /// No truncation: a float converts to an integer type only when it has
    /// no fractional part. Callers check `check_range` first, so width
    /// violations here mean a planner defect upstream.
    pub fn convert(&self, value: &Value) -> TypeResult<Value> {
        let fail = || TypeError::Inconvertible {
            value: value.to_string(),
            target: self.type_name(),
        };

        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (ColumnType::Float, Value::Int(i)) => Ok(Value::Float(*i as f64)),
            (ColumnType::Float, Value::Float(f)) => Ok(Value::Float(*f)),
            (ColumnType::Bool, Value::Bool(b)) => Ok(Value::Bool(*b)),
            (ColumnType::Text, Value::Text(s)) => Ok(Value::Text(s.clone())),
            (_, Value::Int(i)) => match self.int_bounds() {
                Some((min, max)) if *i >= min && *i <= max => Ok(Value::Int(*i)),
                _ => Err(fail()),
            },
            (_, Value::Float(f)) => {
                let (min, max) = self.int_bounds().ok_or_else(fail)?;
                if f.fract() == 0.0 && *f >= min as f64 && *f <= max as f64 {
                    Ok(Value::Int(*f as i64))
                } else {
                    Err(fail())
                }
            }
            _ => Err(fail()),
        }
    }
}

/// A runtime column value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Integer (stored as i64 regardless of column width)
    Int(i64),
    /// Floating point
    Float(f64),
    /// String
    Text(String),
}

impl Value {
    /// Returns true for SQL NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Ordering comparison with SQL semantics.
    ///
    /// Returns `None` when either side is NULL or the types are not
    /// comparable; a bound or residual predicate treats that as no match.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "'{}'", s),
        }
    }
}

/// A single row of values, one per column
pub type Row = Vec<Value>;

/// Column definition within a table or property namespace
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Column data type
    pub ty: ColumnType,
}

impl ColumnDef {
    /// Creates a column definition
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_check_integer_widths() {
        assert_eq!(
            ColumnType::TinyInt.check_range(&Value::Int(1000)),
            RangeCheck::Above
        );
        assert_eq!(
            ColumnType::TinyInt.check_range(&Value::Int(-1000)),
            RangeCheck::Below
        );
        assert_eq!(
            ColumnType::SmallInt.check_range(&Value::Int(1000)),
            RangeCheck::Within
        );
        assert_eq!(
            ColumnType::BigInt.check_range(&Value::Int(i64::MAX)),
            RangeCheck::Within
        );
    }

    #[test]
    fn test_range_check_non_integer_types() {
        assert_eq!(
            ColumnType::Text.check_range(&Value::Int(5)),
            RangeCheck::Within
        );
        assert_eq!(
            ColumnType::Float.check_range(&Value::Float(1e300)),
            RangeCheck::Within
        );
    }

    #[test]
    fn test_exact_conversion() {
        assert_eq!(
            ColumnType::Int.convert(&Value::Int(42)).unwrap(),
            Value::Int(42)
        );
        assert_eq!(
            ColumnType::Float.convert(&Value::Int(2)).unwrap(),
            Value::Float(2.0)
        );
        assert_eq!(
            ColumnType::Int.convert(&Value::Float(3.0)).unwrap(),
            Value::Int(3)
        );
        assert!(ColumnType::Int.convert(&Value::Float(3.5)).is_err());
        assert!(ColumnType::Int.convert(&Value::Text("3".into())).is_err());
    }

    #[test]
    fn test_null_comparison_is_unknown() {
        assert_eq!(Value::Null.compare(&Value::Int(1)), None);
        assert_eq!(Value::Int(1).compare(&Value::Null), None);
    }

    #[test]
    fn test_mixed_numeric_comparison() {
        assert_eq!(
            Value::Int(2).compare(&Value::Float(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::Float(3.0).compare(&Value::Int(3)),
            Some(Ordering::Equal)
        );
    }
}
