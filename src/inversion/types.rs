//! inversion::types — shared numeric aliases for inversion results.
//!
//! Purpose
//! -------
//! Centralize the numeric shapes used across the crate so the bound
//! iterator and covariance estimator stay agnostic to the underlying
//! `ndarray` generics. All vectors and matrices are dense `f64`
//! containers.
//!
//! Conventions
//! -----------
//! - `Model` and `Response` are treated conceptually as column vectors;
//!   `Model` has one entry per free parameter and `Response` one entry
//!   per data point.
//! - `Jacobian` is dense with shape `(n_data, n_model)`: rows follow the
//!   data ordering of `Response`, columns the parameter ordering of
//!   `Model`.
//! - `Misfit` values are chi-square-like scalars; normalization (per
//!   datum or absolute) is decided by the caller.
use ndarray::{Array1, Array2};

/// Model parameter vector, one entry per free parameter.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the crate.
pub type Model = Array1<f64>;

/// Forward response vector, one entry per data point.
///
/// Alias for `ndarray::Array1<f64>`. The raw per-datum error vector
/// shares this shape.
pub type Response = Array1<f64>;

/// Dense Jacobian of the forward operator.
///
/// Alias for `ndarray::Array2<f64>`; shape `(n_data, n_model)`.
pub type Jacobian = Array2<f64>;

/// Scalar misfit value (chi-square or absolute data misfit).
pub type Misfit = f64;
