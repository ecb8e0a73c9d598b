//! Unified error handling for bound iteration.
//!
//! This module defines [`BoundError`], the error type used by the
//! per-parameter bound search and its options. Configuration mistakes
//! get their own variants; failures raised by the underlying inversion
//! state are wrapped verbatim. The alias [`BoundResult<T>`] standardizes
//! the return type across the module.
use crate::inversion::errors::InversionError;

/// Unified error type for bound iteration.
///
/// Covers option validation failures and passthrough of inversion-state
/// errors raised during forward evaluations. Implements
/// `Display`/`Error` and converts from [`InversionError`] via `From`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundError {
    // ---- Options ----
    /// Chi-square increment needs to be positive and finite.
    InvalidDeltaChi2 {
        value: f64,
        reason: &'static str,
    },

    /// Growth factor needs to be positive and finite.
    InvalidGrowthFactor {
        value: f64,
        reason: &'static str,
    },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },

    /// Confidence level must lie strictly between 0 and 1.
    InvalidConfidence {
        level: f64,
        reason: &'static str,
    },

    // ---- Inversion state ----
    /// Failure raised by the underlying inversion state.
    Inversion(InversionError),
}

/// Result alias for bound-iteration operations.
pub type BoundResult<T> = Result<T, BoundError>;

impl std::error::Error for BoundError {}

#[cfg(feature = "python-bindings")]
impl std::convert::From<BoundError> for pyo3::PyErr {
    fn from(err: BoundError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

impl From<InversionError> for BoundError {
    fn from(err: InversionError) -> Self {
        BoundError::Inversion(err)
    }
}

impl std::fmt::Display for BoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Options ----
            BoundError::InvalidDeltaChi2 { value, reason } => {
                write!(f, "Bound Error: Invalid chi-square increment {value}: {reason}")
            }
            BoundError::InvalidGrowthFactor { value, reason } => {
                write!(f, "Bound Error: Invalid growth factor {value}: {reason}")
            }
            BoundError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Bound Error: Invalid maximum iterations {max_iter}: {reason}")
            }
            BoundError::InvalidConfidence { level, reason } => {
                write!(f, "Bound Error: Invalid confidence level {level}: {reason}")
            }

            // ---- Inversion state ----
            BoundError::Inversion(err) => write!(f, "Bound Error: {err}"),
        }
    }
}
