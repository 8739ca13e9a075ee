//! Errors raised while building or changing stockroom records.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Why a product, category or movement record was refused.
///
/// Only record-level rules end up here. Record store failures are reported by
/// `stockroom-infra`, and a category parent cycle has its own error in
/// `stockroom-products`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad field value: blank name or code, zero quantity, unparsable quantity.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The record would break a structural rule, such as a category listed as
    /// its own parent.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A blank record id.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The record's current state forbids the change (archiving twice).
    #[error("conflict: {0}")]
    Conflict(String),
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
}
