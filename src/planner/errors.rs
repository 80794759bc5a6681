//! Planner error types
//!
//! Error codes:
//! - RANGE_PLANNER_INCONSISTENCY (FATAL)
//! - RANGE_BOUNDS_UNSUPPORTED (FATAL)
//!
//! Both codes mean the upstream compiler handed us something it promised it
//! never would; neither is recoverable at execution time.

use std::fmt;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation failed but the system is healthy
    Error,
    /// Defect in the upstream compiler; the query must abort
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// An unclassifiable predicate operator reached bound compilation
    PlannerInconsistency,
    /// Bound compilation attempted against a source with no index support
    BoundsUnsupported,
}

impl PlannerErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::PlannerInconsistency => "RANGE_PLANNER_INCONSISTENCY",
            PlannerErrorCode::BoundsUnsupported => "RANGE_BOUNDS_UNSUPPORTED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Fatal
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error with context
#[derive(Debug)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
}

impl PlannerError {
    /// An unclassifiable operator reached the condition compiler
    pub fn inconsistency(detail: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::PlannerInconsistency,
            message: detail.into(),
        }
    }

    /// Bounds attached to a full-scan-only source
    pub fn bounds_unsupported(source: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::BoundsUnsupported,
            message: format!("source {} supports full scan only", source.into()),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlannerErrorCode {
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

impl fmt::Display for PlannerError {
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

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_errors_are_fatal() {
        assert!(PlannerError::inconsistency("op <>").is_fatal());
        assert!(PlannerError::bounds_unsupported("g.vertexes").is_fatal());
    }

    #[test]
    fn test_error_display_carries_code() {
        let err = PlannerError::inconsistency("operator <> in bound compilation");
        let s = err.to_string();
        assert!(s.contains("RANGE_PLANNER_INCONSISTENCY"));
        assert!(s.contains("FATAL"));
    }
}
