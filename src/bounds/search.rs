//! bounds::search — per-parameter bound estimation by forward perturbation.
//!
//! Purpose
//! -------
//! Walk each model parameter away from its converged value, one
//! multiplicative step at a time, until the per-datum chi-square exceeds
//! an allowed increment or an iteration cap is hit. The final perturbed
//! value in each direction is recorded as that parameter's bound.
//!
//! Key behaviors
//! -------------
//! - [`iterate_bounds`] runs the walk for every parameter independently,
//!   once growing (multiply by the factor) and once shrinking (divide),
//!   each on a fresh copy of the converged model.
//! - Continuation uses a strict less-than comparison against
//!   `chi2() + dchi2`, so the recorded bound is the first value at or
//!   beyond the threshold, or the cap-limited value.
//! - Cap exhaustion is silent: the best value found is returned without
//!   an error, matching the profile-walk convention; callers needing to
//!   distinguish cap-limited bounds should compare against a larger
//!   `max_iter` run.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each walk performs at most `max_iter` forward evaluations; the
//!   whole search performs at most
//!   `2 × model.len() × max_iter` evaluations.
//! - Bounds are element-wise independent; no joint confidence region is
//!   computed.
//! - The inversion state is read-only throughout; perturbed models are
//!   private copies.
//!
//! Conventions
//! -----------
//! - The misfit of a candidate response is `phi_d(response) / n_data`,
//!   normalizing the absolute misfit by the data count.
//! - Failures from the inversion state propagate as
//!   [`BoundError::Inversion`]; the search itself never panics.
use crate::{
    bounds::{
        errors::{BoundError, BoundResult},
        options::BoundOptions,
    },
    inversion::{
        errors::InversionError,
        state::InversionState,
        types::Model,
        validation::validate_model,
    },
};
use ndarray::Array1;

/// Per-parameter lower and upper bounds, in model ordering.
///
/// Both vectors have the same length as the model they were derived
/// from. For positive parameters and a growth factor above one,
/// `lower[i] <= model[i] <= upper[i]` holds whenever at least one step
/// succeeded in each direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBounds {
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
}

impl ParameterBounds {
    /// Number of parameters the bounds were computed for.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Whether the bounds are empty (zero parameters).
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }
}

/// Perturbation direction of a single bound walk.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Grow,
    Shrink,
}

/// iterate_bounds — bound estimation by repeated forward perturbation.
///
/// Purpose
/// -------
/// Estimate per-parameter bounds around the converged model of `inv` by
/// perturbing one parameter at a time and re-evaluating the forward
/// model until the per-datum chi-square reaches
/// `inv.chi2() + opts.dchi2` or `opts.max_iter` steps have been taken.
///
/// Parameters
/// ----------
/// - `inv`: `&I`
///   Converged inversion state. Only `model`, `response`, `chi2`,
///   `phi_d`, and `forward` are consumed.
/// - `opts`: `&BoundOptions`
///   Validated search configuration (chi-square increment, iteration
///   cap, growth factor).
///
/// Returns
/// -------
/// `BoundResult<ParameterBounds>`
///   On success, lower and upper bounds with one entry per model
///   parameter. The walk is deterministic for a deterministic forward
///   operator, so repeated calls on the same state yield identical
///   bounds.
///
/// Errors
/// ------
/// - [`BoundError::Inversion`]
///   Wraps any failure from the inversion state: empty or non-finite
///   model, empty response, or a forward-evaluation error mid-walk.
///
/// Notes
/// -----
/// - Growing multiplies the parameter by `opts.change` each step,
///   shrinking divides; both start from a fresh copy of the converged
///   model, so the two directions never interact.
/// - With `opts.change == 1.0` the threshold can never be crossed from a
///   converged state and every walk runs exactly `opts.max_iter` steps.
pub fn iterate_bounds<I: InversionState>(
    inv: &I, opts: &BoundOptions,
) -> BoundResult<ParameterBounds> {
    let model = inv.model()?;
    validate_model(&model)?;
    let n_data = inv.response()?.len();
    if n_data == 0 {
        return Err(BoundError::Inversion(InversionError::EmptyResponse));
    }

    let n_model = model.len();
    let max_chi2 = inv.chi2()? + opts.dchi2;

    let mut lower = Array1::zeros(n_model);
    let mut upper = Array1::zeros(n_model);
    for im in 0..n_model {
        upper[im] = walk_parameter(inv, &model, im, n_data, max_chi2, opts, Direction::Grow)?;
        lower[im] = walk_parameter(inv, &model, im, n_data, max_chi2, opts, Direction::Shrink)?;
    }

    Ok(ParameterBounds { lower, upper })
}

// ---- Helper methods ----

/// walk_parameter — single-direction profile walk for one parameter.
///
/// Copies the converged model, then repeatedly scales parameter `im` by
/// the growth factor (or its reciprocal) and re-evaluates the forward
/// model, until the per-datum chi-square of the perturbed response is no
/// longer strictly below `max_chi2` or `opts.max_iter` steps have run.
/// Returns the final value of the perturbed parameter.
fn walk_parameter<I: InversionState>(
    inv: &I, model: &Model, im: usize, n_data: usize, max_chi2: f64, opts: &BoundOptions,
    direction: Direction,
) -> BoundResult<f64> {
    let mut perturbed = model.clone();
    let mut chi2 = 0.0;
    let mut iter = 0;

    while chi2 < max_chi2 && iter < opts.max_iter {
        iter += 1;
        match direction {
            Direction::Grow => perturbed[im] *= opts.change,
            Direction::Shrink => perturbed[im] /= opts.change,
        }
        let response = inv.forward(&perturbed)?;
        chi2 = inv.phi_d(&response)? / n_data as f64;
    }

    Ok(perturbed[im])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inversion::{
        errors::InversionResult,
        transforms::IdentityTransform,
        types::{Misfit, Response},
    };
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Termination and bound ordering for the identity forward operator.
    // - Exact iteration counts when the growth factor is 1.0.
    // - Error propagation for empty models and failing forward operators.
    //
    // They intentionally DO NOT cover:
    // - Monotonicity in `max_iter` and confidence-derived increments
    //   (covered by the integration suite).
    // -------------------------------------------------------------------------

    /// Identity-forward fixture: the observed data equals the stored
    /// model, so the converged chi-square is zero. Counts forward calls.
    struct IdentityState {
        model: Model,
        forward_calls: Cell<usize>,
    }

    impl IdentityState {
        fn new(model: Model) -> Self {
            Self { model, forward_calls: Cell::new(0) }
        }
    }

    impl InversionState for IdentityState {
        type DataTrans = IdentityTransform;
        type ModelTrans = IdentityTransform;

        fn model(&self) -> InversionResult<Model> {
            Ok(self.model.clone())
        }

        fn response(&self) -> InversionResult<Response> {
            Ok(self.model.clone())
        }

        fn error(&self) -> InversionResult<Response> {
            Ok(Response::ones(self.model.len()))
        }

        fn chi2(&self) -> InversionResult<Misfit> {
            Ok(0.0)
        }

        fn phi_d(&self, response: &Response) -> InversionResult<Misfit> {
            Ok((response - &self.model).mapv(|r| r * r).sum())
        }

        fn forward(&self, model: &Model) -> InversionResult<Response> {
            self.forward_calls.set(self.forward_calls.get() + 1);
            Ok(model.clone())
        }

        fn trans_data(&self) -> &Self::DataTrans {
            &IdentityTransform
        }

        fn trans_model(&self) -> &Self::ModelTrans {
            &IdentityTransform
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the end-to-end contract on the identity forward operator:
    // termination within the cap and bounds bracketing the model.
    //
    // Given
    // -----
    // - Model [1.0, 2.0], identity forward, converged chi-square 0.
    // - Default options (dchi2 = 0.5, max_iter = 100, change = 1.02).
    //
    // Expect
    // ------
    // - Length-2 bounds with lower[i] <= model[i] <= upper[i] and strict
    //   inequality on both sides (at least one step succeeds).
    fn iterate_bounds_identity_forward_brackets_model() {
        // Arrange
        let state = IdentityState::new(array![1.0, 2.0]);
        let opts = BoundOptions::default();

        // Act
        let bounds =
            iterate_bounds(&state, &opts).expect("Identity-forward bounds should be computed");

        // Assert
        assert_eq!(bounds.len(), 2);
        for im in 0..2 {
            assert!(bounds.lower[im] < state.model[im]);
            assert!(bounds.upper[im] > state.model[im]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Confirm that the recorded upper bound is the first value at or
    // beyond the misfit threshold.
    //
    // Given
    // -----
    // - Single-parameter model [1.0], identity forward, dchi2 = 0.5.
    //
    // Expect
    // ------
    // - The upper bound u satisfies (u - 1)^2 >= 0.5 while the previous
    //   step u / change stayed strictly below the threshold.
    fn iterate_bounds_records_first_value_at_or_beyond_threshold() {
        // Arrange
        let state = IdentityState::new(array![1.0]);
        let opts = BoundOptions::default();

        // Act
        let bounds = iterate_bounds(&state, &opts).unwrap();

        // Assert
        let u = bounds.upper[0];
        let misfit = |v: f64| (v - 1.0) * (v - 1.0);
        assert!(misfit(u) >= opts.dchi2);
        assert!(misfit(u / opts.change) < opts.dchi2);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a unit growth factor runs exactly `max_iter` forward
    // evaluations per direction per parameter (cap respected).
    //
    // Given
    // -----
    // - Model [1.0, 2.0], change = 1.0, max_iter = 5.
    //
    // Expect
    // ------
    // - 2 parameters × 2 directions × 5 iterations = 20 forward calls.
    // - Bounds equal the model (no perturbation happened numerically).
    fn iterate_bounds_unit_growth_factor_runs_exactly_max_iter_steps() {
        // Arrange
        let state = IdentityState::new(array![1.0, 2.0]);
        let opts = BoundOptions::new(0.5, 5, 1.0).unwrap();

        // Act
        let bounds = iterate_bounds(&state, &opts).unwrap();

        // Assert
        assert_eq!(state.forward_calls.get(), 20);
        assert_eq!(bounds.lower, state.model);
        assert_eq!(bounds.upper, state.model);
    }

    #[test]
    // Purpose
    // -------
    // Ensure determinism: two runs on the same state yield identical bounds.
    fn iterate_bounds_is_deterministic() {
        let state = IdentityState::new(array![1.0, 2.0, 4.0]);
        let opts = BoundOptions::default();
        let first = iterate_bounds(&state, &opts).unwrap();
        let second = iterate_bounds(&state, &opts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    // Purpose
    // -------
    // Confirm that an empty model is rejected with the wrapped
    // inversion-layer error rather than producing empty bounds.
    fn iterate_bounds_rejects_empty_model() {
        let state = IdentityState::new(Array1::zeros(0));
        match iterate_bounds(&state, &BoundOptions::default()) {
            Err(BoundError::Inversion(InversionError::EmptyModel)) => {}
            other => panic!("Expected wrapped EmptyModel, got {other:?}"),
        }
    }

    /// Fixture whose forward operator always fails.
    struct FailingForward {
        model: Model,
    }

    impl InversionState for FailingForward {
        type DataTrans = IdentityTransform;
        type ModelTrans = IdentityTransform;

        fn model(&self) -> InversionResult<Model> {
            Ok(self.model.clone())
        }

        fn response(&self) -> InversionResult<Response> {
            Ok(self.model.clone())
        }

        fn error(&self) -> InversionResult<Response> {
            Ok(Response::ones(self.model.len()))
        }

        fn chi2(&self) -> InversionResult<Misfit> {
            Ok(0.0)
        }

        fn phi_d(&self, _response: &Response) -> InversionResult<Misfit> {
            Ok(0.0)
        }

        fn forward(&self, _model: &Model) -> InversionResult<Response> {
            Err(InversionError::ForwardFailed { text: "solver exploded".to_string() })
        }

        fn trans_data(&self) -> &Self::DataTrans {
            &IdentityTransform
        }

        fn trans_model(&self) -> &Self::ModelTrans {
            &IdentityTransform
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a forward-evaluation failure mid-walk is wrapped and
    // surfaced instead of being masked.
    fn iterate_bounds_propagates_forward_failure() {
        let state = FailingForward { model: array![1.0] };
        match iterate_bounds(&state, &BoundOptions::default()) {
            Err(BoundError::Inversion(InversionError::ForwardFailed { text })) => {
                assert_eq!(text, "solver exploded")
            }
            other => panic!("Expected wrapped ForwardFailed, got {other:?}"),
        }
    }
}
