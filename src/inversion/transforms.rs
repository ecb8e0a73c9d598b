//! inversion::transforms — reparameterization seam for model and data space.
//!
//! Purpose
//! -------
//! Define the [`Transform`] trait through which the covariance estimator
//! reads derivative and error-propagation information, together with the
//! three stock transforms used by typical inversion setups: identity,
//! linear, and logarithmic. Log-space model parameterizations keep
//! physical quantities (resistivities, thicknesses, velocities) strictly
//! positive, so the log transform guards its domain explicitly.
//!
//! Key behaviors
//! -------------
//! - [`Transform::deriv`] evaluates the elementwise derivative of the
//!   transform at a vector of values.
//! - [`Transform::error`] propagates a raw per-datum error vector into
//!   transformed space; the default implementation applies the
//!   first-order rule `|deriv(values)| * errors` and individual
//!   transforms may override it.
//! - Domain violations (non-positive values under a log transform, zero
//!   or non-finite linear scales) surface as [`InversionError`] values,
//!   never panics.
//!
//! Conventions
//! -----------
//! - All vectors are `ndarray::Array1<f64>`; outputs have the same length
//!   as inputs.
//! - Transforms are stateless value types; cloning is cheap and no
//!   internal caching is performed.
use crate::inversion::errors::{InversionError, InversionResult};
use ndarray::Array1;

/// Elementwise reparameterization of a model or data vector.
///
/// The covariance estimator only needs two pieces of information from a
/// transform: the derivative at the current values (to weight the
/// Jacobian) and the propagated error in transformed space (to weight
/// the data rows). Implementations must return vectors of the same
/// length as their input.
///
/// The default [`Transform::error`] applies first-order propagation
/// through [`Transform::deriv`]; override it when the transform has an
/// exact propagation rule.
pub trait Transform {
    /// Elementwise derivative of the transform at `values`.
    fn deriv(&self, values: &Array1<f64>) -> InversionResult<Array1<f64>>;

    /// Propagate `errors` into transformed space at `values`.
    ///
    /// # Errors
    /// - [`InversionError::TransformDimMismatch`] if the two vectors
    ///   differ in length.
    /// - Any error raised by [`Transform::deriv`].
    fn error(&self, values: &Array1<f64>, errors: &Array1<f64>) -> InversionResult<Array1<f64>> {
        if values.len() != errors.len() {
            return Err(InversionError::TransformDimMismatch {
                expected: values.len(),
                found: errors.len(),
            });
        }
        let deriv = self.deriv(values)?;
        Ok(deriv.mapv(f64::abs) * errors)
    }
}

/// Identity transform: values pass through untouched.
///
/// Derivative is a vector of ones and error propagation returns the raw
/// error vector, matching the untransformed-data convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityTransform;

impl Transform for IdentityTransform {
    fn deriv(&self, values: &Array1<f64>) -> InversionResult<Array1<f64>> {
        Ok(Array1::ones(values.len()))
    }
}

/// Affine transform `t(x) = scale * x + offset`.
///
/// The offset does not influence derivatives or error propagation; it is
/// carried so the type fully describes the reparameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    scale: f64,
    offset: f64,
}

impl LinearTransform {
    /// Construct a validated affine transform.
    ///
    /// # Errors
    /// Returns [`InversionError::InvalidScale`] if `scale` is zero or
    /// non-finite; a zero scale would collapse the data weights.
    pub fn new(scale: f64, offset: f64) -> InversionResult<Self> {
        if !scale.is_finite() {
            return Err(InversionError::InvalidScale {
                value: scale,
                reason: "Scale must be finite.",
            });
        }
        if scale == 0.0 {
            return Err(InversionError::InvalidScale {
                value: scale,
                reason: "Scale must be nonzero.",
            });
        }
        Ok(Self { scale, offset })
    }

    /// The multiplicative scale of the transform.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The additive offset of the transform.
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Transform for LinearTransform {
    fn deriv(&self, values: &Array1<f64>) -> InversionResult<Array1<f64>> {
        Ok(Array1::from_elem(values.len(), self.scale))
    }
}

/// Natural-log transform `t(x) = ln(x)` on strictly positive values.
///
/// Derivative is `1/x`; error propagation follows the default
/// first-order rule, so a relative error in linear space becomes an
/// absolute error in log space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogTransform;

impl Transform for LogTransform {
    /// # Errors
    /// Returns [`InversionError::NonPositiveValue`] with the first
    /// offending index when any value is `<= 0` or non-finite.
    fn deriv(&self, values: &Array1<f64>) -> InversionResult<Array1<f64>> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(InversionError::NonPositiveValue { index, value });
            }
        }
        Ok(values.mapv(|x| 1.0 / x))
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
    // - Derivatives and default error propagation for the stock transforms.
    // - Domain guards: log positivity, linear scale validation.
    //
    // They intentionally DO NOT cover:
    // - Use of transforms inside the covariance estimator (covered by
    //   `covariance::estimator` tests).
    // -------------------------------------------------------------------------

    #[test]
    fn identity_deriv_is_all_ones_and_error_passes_through() {
        // Arrange
        let values = array![3.0, 7.0];
        let errors = array![0.1, 0.2];

        // Act
        let deriv = IdentityTransform.deriv(&values).unwrap();
        let propagated = IdentityTransform.error(&values, &errors).unwrap();

        // Assert
        assert_eq!(deriv, array![1.0, 1.0]);
        assert_eq!(propagated, errors);
    }

    #[test]
    fn linear_deriv_is_constant_scale() {
        let trans = LinearTransform::new(2.5, -1.0).unwrap();
        let deriv = trans.deriv(&array![4.0, 5.0, 6.0]).unwrap();
        assert_eq!(deriv, array![2.5, 2.5, 2.5]);
    }

    #[test]
    fn linear_rejects_zero_and_non_finite_scale() {
        match LinearTransform::new(0.0, 0.0) {
            Err(InversionError::InvalidScale { .. }) => {}
            other => panic!("Expected InvalidScale, got {other:?}"),
        }
        match LinearTransform::new(f64::NAN, 0.0) {
            Err(InversionError::InvalidScale { .. }) => {}
            other => panic!("Expected InvalidScale, got {other:?}"),
        }
    }

    #[test]
    fn log_deriv_is_reciprocal_on_positive_values() {
        let deriv = LogTransform.deriv(&array![2.0, 4.0]).unwrap();
        assert!((deriv[0] - 0.5).abs() < 1e-12);
        assert!((deriv[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn log_rejects_non_positive_values_with_offending_index() {
        match LogTransform.deriv(&array![1.0, 0.0]) {
            Err(InversionError::NonPositiveValue { index: 1, .. }) => {}
            other => panic!("Expected NonPositiveValue at index 1, got {other:?}"),
        }
    }

    #[test]
    fn log_error_propagation_scales_by_reciprocal_values() {
        // A 10% absolute error on x = 2.0 becomes 0.05 in log space.
        let propagated = LogTransform.error(&array![2.0], &array![0.1]).unwrap();
        assert!((propagated[0] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn default_error_rejects_length_mismatch() {
        match IdentityTransform.error(&array![1.0, 2.0], &array![0.1]) {
            Err(InversionError::TransformDimMismatch { expected: 2, found: 1 }) => {}
            other => panic!("Expected TransformDimMismatch, got {other:?}"),
        }
    }
}
