//! # Error Types
//!
//! Structured error types for calc_core. Every failure the engine can hit is
//! local and recoverable, so these values end up stored as the engine's error
//! state rather than crossing the public API as a panic.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn checked_sqrt(value: f64) -> CalcResult<f64> {
//!     if value < 0.0 {
//!         return Err(CalcError::domain("Negative sqrt"));
//!     }
//!     Ok(value.sqrt())
//! }
//!
//! assert_eq!(checked_sqrt(9.0), Ok(3.0));
//! assert_eq!(checked_sqrt(-1.0).unwrap_err().to_string(), "Error: Negative sqrt");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
///
/// The `Display` text is what a front end shows in place of the entry.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Division (or a split/per-serving helper) with a zero divisor
    #[error("Error: Division by 0")]
    DivisionByZero,

    /// Text could not be read as a number, or an operand is missing
    #[error("Error: {reason}")]
    InvalidInput { reason: String },

    /// The operation is undefined for this value (negative sqrt, tan 90, ...)
    #[error("Error: {reason}")]
    DomainError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create a DomainError
    pub fn domain(reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::DivisionByZero => "DIVISION_BY_ZERO",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
        }
    }
}

/// Parse entry text as a decimal number.
pub(crate) fn parse_number(text: &str) -> CalcResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_input("Invalid input"))
}

/// Reject NaN and infinite results.
pub(crate) fn finite(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::domain("Result out of range"))
    }
}
