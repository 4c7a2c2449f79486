//! Construction errors

use crate::float_types::Real;

/// Everything that can stop a primitive from being built.
///
/// Validation happens before any node is allocated, so an `Err` never comes
/// with a partially built tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrimitiveError {
    /// (InvalidArgument) A numeric parameter is out of its domain
    #[error("(InvalidArgument) `{name}` {reason}")]
    InvalidArgument { name: &'static str, reason: String },
    /// (NotImplemented) The requested feature is accepted by the signature but not supported
    #[error("(NotImplemented) Feature is not implemented: {0}")]
    NotImplemented(String),
}

impl PrimitiveError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PrimitiveError::InvalidArgument { name, reason: reason.into() }
    }
}

/// Rejects NaN and infinities.
pub(crate) fn require_finite(name: &'static str, value: Real) -> Result<Real, PrimitiveError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PrimitiveError::invalid(name, format!("must be finite, got {value}")))
    }
}

/// Rejects anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(name: &'static str, value: Real) -> Result<Real, PrimitiveError> {
    let value = require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PrimitiveError::invalid(name, format!("must be positive, got {value}")))
    }
}
