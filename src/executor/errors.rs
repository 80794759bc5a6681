//! Executor error types
//!
//! Error codes:
//! - RANGE_EXEC_INCONSISTENCY (FATAL)
//! - RANGE_TYPE_MISMATCH (ERROR)

use std::fmt;

use crate::planner::Severity;
use crate::schema::TypeError;

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecErrorCode {
    /// The compiled plan handed the scan something it cannot execute
    PlannerInconsistency,
    /// A bound literal could not be converted to the column type
    TypeMismatch,
}

impl ExecErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecErrorCode::PlannerInconsistency => "RANGE_EXEC_INCONSISTENCY",
            ExecErrorCode::TypeMismatch => "RANGE_TYPE_MISMATCH",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ExecErrorCode::PlannerInconsistency => Severity::Fatal,
            ExecErrorCode::TypeMismatch => Severity::Error,
        }
    }
}

impl fmt::Display for ExecErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error with context
#[derive(Debug)]
pub struct ExecError {
    code: ExecErrorCode,
    message: String,
}

impl ExecError {
    /// The plan reached the scan in a state it promised it never would
    pub fn inconsistency(detail: impl Into<String>) -> Self {
        Self {
            code: ExecErrorCode::PlannerInconsistency,
            message: detail.into(),
        }
    }

    /// A value failed conversion during bound evaluation
    pub fn type_mismatch(detail: impl Into<String>) -> Self {
        Self {
            code: ExecErrorCode::TypeMismatch,
            message: detail.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for ExecError {}

impl From<TypeError> for ExecError {
    fn from(err: TypeError) -> Self {
        ExecError::type_mismatch(err.to_string())
    }
}

/// Result type for executor operations
pub type ExecResult<T> = Result<T, ExecError>;
