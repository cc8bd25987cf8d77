//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Authorization denials raised by aggregates collapse into `Unauthorized`;
/// the detailed reason is logged at the point of decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (e.g. deciding an already decided event).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The record does not exist (or was deleted).
    #[error("not found")]
    NotFound,

    /// Stale version / concurrent modification.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The inputs contradict each other (e.g. a command addressed to a
    /// different record than the one it is applied to).
    #[error("inconsistent data: {0}")]
    InconsistentData(String),

    /// The acting principal is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn inconsistent(msg: impl Into<String>) -> Self {
        Self::InconsistentData(msg.into())
    }

    pub fn unauthorized(operation: impl Into<String>) -> Self {
        Self::Unauthorized(operation.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
