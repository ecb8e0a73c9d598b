//! Validation helpers for inversion-state vectors and matrices.
//!
//! This module centralizes the consistency checks shared by the bound
//! iterator and the covariance estimator:
//!
//! - **Model checks**: [`validate_model`] enforces a non-empty vector
//!   with finite entries.
//! - **Response checks**: [`validate_response`] enforces the expected
//!   data count and finite entries.
//! - **Jacobian checks**: [`validate_jacobian`] enforces the
//!   `(n_data, n_model)` shape and finite entries.
//!
//! These helpers standardize error reporting by returning
//! [`InversionError`] variants with the first offending index, making
//! higher-level code more uniform and easier to debug.
use crate::inversion::{
    errors::{InversionError, InversionResult},
    types::{Jacobian, Model, Response},
};

/// Validate a model vector: non-empty with finite entries.
///
/// # Errors
/// - [`InversionError::EmptyModel`] if the vector has no entries.
/// - [`InversionError::InvalidModel`] with the index/value of the first
///   NaN or infinite element.
pub fn validate_model(model: &Model) -> InversionResult<()> {
    if model.is_empty() {
        return Err(InversionError::EmptyModel);
    }
    for (index, &value) in model.iter().enumerate() {
        if !value.is_finite() {
            return Err(InversionError::InvalidModel { index, value });
        }
    }
    Ok(())
}

/// Validate a response vector against an expected data count.
///
/// Checks:
/// - `response.len() == n_data` (a zero `n_data` therefore rejects all
///   non-empty responses; callers validate emptiness separately)
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`InversionError::ResponseDimMismatch`] if the length differs.
/// - [`InversionError::NonFiniteResponse`] with the first offending
///   index/value.
pub fn validate_response(response: &Response, n_data: usize) -> InversionResult<()> {
    if response.len() != n_data {
        return Err(InversionError::ResponseDimMismatch {
            expected: n_data,
            found: response.len(),
        });
    }
    for (index, &value) in response.iter().enumerate() {
        if !value.is_finite() {
            return Err(InversionError::NonFiniteResponse { index, value });
        }
    }
    Ok(())
}

/// Validate a Jacobian matrix against data and model counts.
///
/// Checks:
/// - `jacobian.dim() == (n_data, n_model)`
/// - every element is finite
///
/// # Errors
/// - [`InversionError::JacobianDimMismatch`] if the shape differs.
/// - [`InversionError::InvalidJacobian`] with the row/column/value of the
///   first non-finite entry.
pub fn validate_jacobian(jacobian: &Jacobian, n_data: usize, n_model: usize) -> InversionResult<()> {
    if jacobian.dim() != (n_data, n_model) {
        return Err(InversionError::JacobianDimMismatch {
            expected: (n_data, n_model),
            found: jacobian.dim(),
        });
    }
    for ((row, col), &value) in jacobian.indexed_iter() {
        if !value.is_finite() {
            return Err(InversionError::InvalidJacobian { row, col, value });
        }
    }
    Ok(())
}
