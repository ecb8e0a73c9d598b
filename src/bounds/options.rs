//! Configuration for the per-parameter bound search.
//!
//! - [`BoundOptions`]: chi-square increment, iteration cap, and
//!   multiplicative growth factor, validated on construction.
//!
//! Convention: the search accepts a growth factor of exactly `1.0` even
//! though it can never cross the misfit threshold; termination is then
//! guaranteed by the iteration cap alone.
use crate::bounds::errors::{BoundError, BoundResult};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Search configuration for [`iterate_bounds`](crate::bounds::iterate_bounds).
///
/// Fields:
/// - `dchi2: f64` — allowed increase of the per-datum chi-square above
///   the converged value before a bound is declared reached.
/// - `max_iter: usize` — hard cap on perturbation steps per parameter
///   and direction.
/// - `change: f64` — multiplicative perturbation factor per step
///   (e.g. `1.02` for 2% steps).
///
/// Default:
/// - `dchi2 = 0.5`, `max_iter = 100`, `change = 1.02`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundOptions {
    pub dchi2: f64,
    pub max_iter: usize,
    pub change: f64,
}

impl BoundOptions {
    /// Construct validated search options.
    ///
    /// # Rules
    /// - `dchi2` must be **finite and strictly positive**.
    /// - `max_iter` must be `> 0`.
    /// - `change` must be **finite and strictly positive**; `1.0` is
    ///   accepted (the cap bounds the search).
    ///
    /// # Errors
    /// - [`BoundError::InvalidDeltaChi2`] for a non-finite or
    ///   non-positive increment.
    /// - [`BoundError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`BoundError::InvalidGrowthFactor`] for a non-finite or
    ///   non-positive factor.
    pub fn new(dchi2: f64, max_iter: usize, change: f64) -> BoundResult<Self> {
        if !dchi2.is_finite() {
            return Err(BoundError::InvalidDeltaChi2 {
                value: dchi2,
                reason: "Chi-square increment must be finite.",
            });
        }
        if dchi2 <= 0.0 {
            return Err(BoundError::InvalidDeltaChi2 {
                value: dchi2,
                reason: "Chi-square increment must be positive.",
            });
        }
        if max_iter == 0 {
            return Err(BoundError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if !change.is_finite() {
            return Err(BoundError::InvalidGrowthFactor {
                value: change,
                reason: "Growth factor must be finite.",
            });
        }
        if change <= 0.0 {
            return Err(BoundError::InvalidGrowthFactor {
                value: change,
                reason: "Growth factor must be positive.",
            });
        }
        Ok(Self { dchi2, max_iter, change })
    }

    /// Derive `dchi2` from a one-degree-of-freedom chi-square quantile.
    ///
    /// The per-parameter search perturbs one parameter at a time, so the
    /// appropriate profile-likelihood increment at confidence `level` is
    /// the chi-square(1) quantile (`level = 0.683` gives `dchi2 ≈ 1.0`).
    ///
    /// # Errors
    /// - [`BoundError::InvalidConfidence`] if `level` is not strictly
    ///   inside `(0, 1)`.
    /// - Any error from [`BoundOptions::new`] on the derived increment.
    pub fn from_confidence(level: f64, max_iter: usize, change: f64) -> BoundResult<Self> {
        if !level.is_finite() || level <= 0.0 || level >= 1.0 {
            return Err(BoundError::InvalidConfidence {
                level,
                reason: "Confidence level must lie strictly between 0 and 1.",
            });
        }
        let dist = ChiSquared::new(1.0).map_err(|_| BoundError::InvalidConfidence {
            level,
            reason: "Chi-square(1) distribution could not be constructed.",
        })?;
        Self::new(dist.inverse_cdf(level), max_iter, change)
    }
}

impl Default for BoundOptions {
    fn default() -> Self {
        Self { dchi2: 0.5, max_iter: 100, change: 1.02 }
    }
}
