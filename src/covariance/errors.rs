//! Unified error handling for covariance estimation.
//!
//! This module defines [`CovarianceError`], the error type used by the
//! model-covariance estimator. The singular-matrix variant replaces the
//! silent degenerate return of classical implementations: failure is a
//! named value carrying the cause, never a zero-filled placeholder. The
//! alias [`CovarianceResult<T>`] standardizes the return type.
use crate::inversion::errors::InversionError;

/// Unified error type for model-covariance estimation.
///
/// Covers weighting degeneracies, singular normal-equations matrices,
/// ill-conditioned variances, and passthrough of inversion-state
/// errors. Implements `Display`/`Error` and converts from
/// [`InversionError`] via `From`.
#[derive(Debug, Clone, PartialEq)]
pub enum CovarianceError {
    // ---- Weighting ----
    /// Reciprocal propagated data error is not finite (zero or
    /// non-finite propagated error).
    InvalidDataWeight {
        index: usize,
        value: f64,
    },

    /// Reciprocal model-transform derivative is not finite (zero or
    /// non-finite derivative).
    InvalidModelDeriv {
        index: usize,
        value: f64,
    },

    // ---- Linear algebra ----
    /// Normal-equations matrix is singular and cannot be inverted.
    SingularNormalMatrix {
        dim: usize,
    },

    /// Covariance diagonal entry is non-positive or non-finite.
    NonPositiveVariance {
        index: usize,
        value: f64,
    },

    // ---- Inversion state ----
    /// Failure raised by the underlying inversion state.
    Inversion(InversionError),
}

/// Result alias for covariance-estimation operations.
pub type CovarianceResult<T> = Result<T, CovarianceError>;

impl std::error::Error for CovarianceError {}

#[cfg(feature = "python-bindings")]
impl std::convert::From<CovarianceError> for pyo3::PyErr {
    fn from(err: CovarianceError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

impl From<InversionError> for CovarianceError {
    fn from(err: InversionError) -> Self {
        CovarianceError::Inversion(err)
    }
}

impl std::fmt::Display for CovarianceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Weighting ----
            CovarianceError::InvalidDataWeight { index, value } => {
                write!(
                    f,
                    "Covariance Error: Propagated data error {value} at index {index} yields a non-finite weight"
                )
            }
            CovarianceError::InvalidModelDeriv { index, value } => {
                write!(
                    f,
                    "Covariance Error: Model-transform derivative {value} at index {index} yields a non-finite weight"
                )
            }

            // ---- Linear algebra ----
            CovarianceError::SingularNormalMatrix { dim } => {
                write!(f, "Covariance Error: Normal-equations matrix ({dim}x{dim}) is singular")
            }
            CovarianceError::NonPositiveVariance { index, value } => {
                write!(
                    f,
                    "Covariance Error: Covariance diagonal entry {value} at index {index} is not positive"
                )
            }

            // ---- Inversion state ----
            CovarianceError::Inversion(err) => write!(f, "Covariance Error: {err}"),
        }
    }
}
