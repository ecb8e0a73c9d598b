//! inversion::finite_diff — brute-force Jacobian of the forward operator.
//!
//! Purpose
//! -------
//! Provide a finite-difference Jacobian approximation around a model
//! vector, together with error capture and validation, so that inversion
//! states without an analytic Jacobian can still feed the covariance
//! estimator without depending directly on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - Approximate the Jacobian of a fallible forward operator with a
//!   central-difference scheme, falling back to forward differences when
//!   the central approximation fails validation, via
//!   [`compute_jacobian`].
//! - Route any error raised by the forward operator during finite
//!   differencing into a shared `closure_err` cell and surface it as a
//!   hard failure.
//! - Enforce shape and finiteness invariants on the returned matrix via
//!   [`validate_jacobian`](crate::inversion::validation::validate_jacobian).
//!
//! Invariants & assumptions
//! ------------------------
//! - Model and response vectors are `ndarray` containers over `f64`
//!   ([`Model`], [`Response`]); the returned [`Jacobian`] has shape
//!   `(n_data, model.len())`.
//! - When the forward operator errors mid-differencing, the probe
//!   returns a NaN-filled response so the finite-difference routine can
//!   finish; the captured error always takes precedence over the
//!   resulting garbage matrix.
//!
//! Conventions
//! -----------
//! - Central differences are preferred; forward differences are used
//!   only as a fallback when the central approximation fails validation.
//! - Domain errors are surfaced as [`InversionError`] via
//!   `InversionResult<T>`.
//!
//! Downstream usage
//! ----------------
//! - [`InversionState::jacobian`](crate::inversion::state::InversionState::jacobian)
//!   uses this helper as its default implementation; engines with an
//!   analytic Jacobian override the trait method instead.
use crate::inversion::{
    errors::{InversionError, InversionResult},
    types::{Jacobian, Model, Response},
    validation::validate_jacobian,
};
use finitediff::FiniteDiff;
use ndarray::Array1;
use std::cell::RefCell;

/// compute_jacobian — finite-difference Jacobian with error capture.
///
/// Purpose
/// -------
/// Approximate the Jacobian of `forward` at `model` using finite
/// differences, preferring a central-difference scheme and falling back
/// to a forward-difference scheme when validation fails.
///
/// Parameters
/// ----------
/// - `forward`: `&F`
///   Fallible forward operator mapping a model vector to a response
///   vector of length `n_data`.
/// - `model`: `&Model`
///   Point in parameter space at which the Jacobian is approximated. Its
///   length defines the column count of the result.
/// - `n_data`: `usize`
///   Expected response length; defines the row count of the result.
///
/// Returns
/// -------
/// `InversionResult<Jacobian>`
///   - `Ok(j)` containing an `(n_data, model.len())` matrix with all
///     finite entries.
///   - `Err(e)` when the forward operator errored during differencing or
///     both difference schemes fail validation.
///
/// Errors
/// ------
/// - Any [`InversionError`] raised by `forward`, captured through the
///   shared cell and returned verbatim.
/// - [`InversionError::JacobianDimMismatch`] /
///   [`InversionError::InvalidJacobian`] from the forward-difference
///   validation when both schemes produce unusable matrices.
///
/// Notes
/// -----
/// - The central-difference validation error is intentionally discarded;
///   only the forward-difference validation result is surfaced, mirroring
///   the two-stage strategy used for Hessians elsewhere in the ecosystem.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_postinversion::inversion::errors::InversionResult;
/// # use rust_postinversion::inversion::finite_diff::compute_jacobian;
/// # use rust_postinversion::inversion::types::{Model, Response};
/// // Linear operator: r(m) = (2 m0, 3 m1).
/// let forward = |m: &Model| -> InversionResult<Response> { Ok(array![2.0 * m[0], 3.0 * m[1]]) };
/// let model: Model = array![1.0, 1.0];
///
/// let jac = compute_jacobian(&forward, &model, 2).unwrap();
/// assert_eq!(jac.shape(), &[2, 2]);
/// assert!((jac[[0, 0]] - 2.0).abs() < 1e-6);
/// assert!((jac[[1, 1]] - 3.0).abs() < 1e-6);
/// ```
pub fn compute_jacobian<F: Fn(&Model) -> InversionResult<Response>>(
    forward: &F, model: &Model, n_data: usize,
) -> InversionResult<Jacobian> {
    let n_model = model.len();
    let closure_err: RefCell<Option<InversionError>> = RefCell::new(None);
    let probe = |m: &Model| -> Response {
        match forward(m) {
            Ok(response) => response,
            Err(err) => {
                // First captured error wins; later probes still need a
                // correctly shaped vector to keep finitediff running.
                if closure_err.borrow().is_none() {
                    closure_err.replace(Some(err));
                }
                Array1::from_elem(n_data, f64::NAN)
            }
        }
    };

    let central = model.central_jacobian(&probe);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    match validate_jacobian(&central, n_data, n_model) {
        Ok(_) => Ok(central),
        Err(_) => {
            let forward_jac = model.forward_jacobian(&probe);
            if let Some(err) = closure_err.take() {
                return Err(err);
            }
            validate_jacobian(&forward_jac, n_data, n_model)?;
            Ok(forward_jac)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Jacobian accuracy for a linear forward operator.
    // - Propagation of forward-operator errors captured mid-differencing.
    // - Validation failure when the forward operator returns the wrong shape.
    //
    // They intentionally DO NOT cover:
    // - The trait-level default `jacobian()` wiring (covered by
    //   `inversion::state` tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `compute_jacobian` reproduces the matrix of a linear
    // forward operator to finite-difference accuracy.
    //
    // Given
    // -----
    // - A forward operator r(m) = A m with A = [[2, 0], [1, 3]].
    //
    // Expect
    // ------
    // - The computed Jacobian matches A entrywise within 1e-6.
    fn compute_jacobian_linear_operator_matches_matrix() {
        // Arrange
        let forward = |m: &Model| -> InversionResult<Response> {
            Ok(array![2.0 * m[0], m[0] + 3.0 * m[1]])
        };
        let model: Model = array![1.0, -2.0];

        // Act
        let jac = compute_jacobian(&forward, &model, 2)
            .expect("Jacobian of a linear operator should be computed successfully");

        // Assert
        let expected = [[2.0, 0.0], [1.0, 3.0]];
        for row in 0..2 {
            for col in 0..2 {
                assert!((jac[[row, col]] - expected[row][col]).abs() < 1e-6);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an error raised by the forward operator during
    // differencing is surfaced instead of a NaN-filled Jacobian.
    //
    // Given
    // -----
    // - A forward operator that always fails.
    //
    // Expect
    // ------
    // - `compute_jacobian` returns the captured `ForwardFailed` error.
    fn compute_jacobian_forward_error_is_propagated() {
        // Arrange
        let forward = |_: &Model| -> InversionResult<Response> {
            Err(InversionError::ForwardFailed { text: "fd test".to_string() })
        };
        let model: Model = array![1.0];

        // Act
        let result = compute_jacobian(&forward, &model, 1);

        // Assert
        match result {
            Err(InversionError::ForwardFailed { text }) => assert_eq!(text, "fd test"),
            other => panic!("Expected ForwardFailed, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that a forward operator returning the wrong response length
    // fails Jacobian validation rather than producing a misshapen matrix.
    //
    // Given
    // -----
    // - A forward operator returning length 3 when 2 is expected.
    //
    // Expect
    // ------
    // - `compute_jacobian` returns `Err(JacobianDimMismatch { .. })`.
    fn compute_jacobian_wrong_response_length_fails_validation() {
        // Arrange
        let forward = |_: &Model| -> InversionResult<Response> { Ok(array![1.0, 2.0, 3.0]) };
        let model: Model = array![1.0, 1.0];

        // Act
        let result = compute_jacobian(&forward, &model, 2);

        // Assert
        match result {
            Err(InversionError::JacobianDimMismatch { .. }) => {}
            other => panic!("Expected JacobianDimMismatch, got {other:?}"),
        }
    }
}
