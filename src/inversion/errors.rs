//! Unified error handling for the inversion-state layer.
//!
//! This module defines [`InversionError`], the error type shared by
//! forward evaluation, transform application, and finite-difference
//! Jacobian construction. It groups domain-specific failures (transform
//! domain violations, shape mismatches, non-finite numerics) with a
//! catch-all passthrough for engine backends. The alias
//! [`InversionResult<T>`] standardizes the return type across the layer.

/// Unified error type for inversion-state operations.
///
/// Covers forward-operator failures, transform domain violations, shape
/// mismatches between model/response/Jacobian, and non-finite numerics.
/// Integrates with `anyhow::Error` via `From` so engine backends can
/// route arbitrary failures through the `Anyhow` variant, and provides
/// readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InversionError {
    // ---- Forward operator ----
    /// Forward evaluation failed inside the engine backend.
    ForwardFailed {
        text: String,
    },

    /// Forward response length does not match the data count.
    ResponseDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Forward response elements need to be finite.
    NonFiniteResponse {
        index: usize,
        value: f64,
    },

    // ---- Transforms ----
    /// Transform input length does not match the vector it was built for.
    TransformDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Log-domain transform applied to a non-positive value.
    NonPositiveValue {
        index: usize,
        value: f64,
    },

    /// Linear transform scale must be finite and nonzero.
    InvalidScale {
        value: f64,
        reason: &'static str,
    },

    // ---- Jacobian ----
    /// Jacobian dimensions do not match data/model counts.
    JacobianDimMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Jacobian values need to be finite.
    InvalidJacobian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Model/data vectors ----
    /// Model vector is empty.
    EmptyModel,

    /// Response vector is empty.
    EmptyResponse,

    /// Model elements need to be finite.
    InvalidModel {
        index: usize,
        value: f64,
    },

    // ---- Anyhow catchall ----
    Anyhow(String),

    // ---- Fallback ----
    UnknownError,
}

/// Result alias for operations on an inversion state.
pub type InversionResult<T> = Result<T, InversionError>;

impl std::error::Error for InversionError {}

impl From<anyhow::Error> for InversionError {
    fn from(err: anyhow::Error) -> Self {
        InversionError::Anyhow(err.to_string())
    }
}

impl std::fmt::Display for InversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Forward operator ----
            InversionError::ForwardFailed { text } => {
                write!(f, "Inversion Error: Forward evaluation failed: {}", text)
            }
            InversionError::ResponseDimMismatch { expected, found } => {
                write!(f, "Inversion Error: Response length mismatch: expected {expected}, found {found}")
            }
            InversionError::NonFiniteResponse { index, value } => {
                write!(f, "Inversion Error: Non-finite response at index {index}: {value}")
            }

            // ---- Transforms ----
            InversionError::TransformDimMismatch { expected, found } => {
                write!(f, "Inversion Error: Transform input length mismatch: expected {expected}, found {found}")
            }
            InversionError::NonPositiveValue { index, value } => {
                write!(
                    f,
                    "Inversion Error: Log transform requires positive values, got {value} at index {index}"
                )
            }
            InversionError::InvalidScale { value, reason } => {
                write!(f, "Inversion Error: Invalid transform scale {value}: {reason}")
            }

            // ---- Jacobian ----
            InversionError::JacobianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Inversion Error: Jacobian dimension mismatch: expected {expected:?}, found {found:?}"
                )
            }
            InversionError::InvalidJacobian { row, col, value } => {
                write!(f, "Inversion Error: Invalid Jacobian at ({row}, {col}): {value}, must be finite")
            }

            // ---- Model/data vectors ----
            InversionError::EmptyModel => {
                write!(f, "Inversion Error: Model vector is empty")
            }
            InversionError::EmptyResponse => {
                write!(f, "Inversion Error: Response vector is empty")
            }
            InversionError::InvalidModel { index, value } => {
                write!(f, "Inversion Error: Non-finite model value at index {index}: {value}")
            }

            // ---- Anyhow catchall ----
            InversionError::Anyhow(msg) => write!(f, "Inversion Error: {}", msg),

            // ---- Fallback ----
            InversionError::UnknownError => write!(f, "Inversion Error: Unknown error occurred"),
        }
    }
}
