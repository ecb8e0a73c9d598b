//! rust_postinversion — uncertainty estimation for least-squares inversions.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the post-inversion routines to Python via the
//! `_rust_postinversion` extension module. The crate consumes the result
//! of a geophysical least-squares inversion through a narrow capability
//! trait and computes two uncertainty products: per-parameter bounds by
//! forward perturbation, and the formal model covariance/correlation
//! matrix from the weighted Jacobian.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`inversion`, `bounds`,
//!   `covariance`) as the public crate surface.
//! - Define the `#[pyfunction]` wrappers and the `#[pymodule]`
//!   initializer for the `_rust_postinversion` extension when the
//!   `python-bindings` feature is enabled.
//! - Adapt duck-typed Python inversion objects (pygimli-style `model()`,
//!   `response()`, `chi2()`, `getPhiD()`, `error()`, `forwardOperator()`,
//!   `transData()`, `transModel()`) into the Rust capability trait.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input conversion, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible functions
//!   mirror the signatures and defaults of their Rust counterparts
//!   (`iterate_bounds`, `mod_covar`).
//! - Rust-side errors convert to Python `ValueError`s at the boundary;
//!   no Rust panic crosses into Python under documented usage.
//!
//! Conventions
//! -----------
//! - Native Rust code should depend directly on the inner modules and
//!   can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - Python-facing vectors are 1-D float64 numpy arrays; matrices are
//!   2-D float64 arrays, in the `(n_data, n_model)` Jacobian and
//!   `(n_model, n_model)` covariance orientations.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules and by the integration suite under `tests/`.
//! - The PyO3 glue is exercised from Python-side smoke tests in the
//!   packaging layer, not from Rust.

pub mod bounds;
pub mod covariance;
pub mod inversion;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    bounds::BoundOptions, covariance::mod_covar as mod_covar_rs, utils::PyInversionState,
};

/// iterate_bounds — Python-facing wrapper for the bound search.
///
/// Accepts any object exposing the pygimli-style inversion surface and
/// returns `(lower, upper)` as 1-D float64 numpy arrays. Defaults follow
/// [`BoundOptions::default`]: `dchi2=0.5`, `maxiter=100`, `change=1.02`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "iterate_bounds")]
#[pyo3(signature = (inv, dchi2=None, maxiter=None, change=None))]
fn iterate_bounds_py<'py>(
    py: Python<'py>, inv: &Bound<'py, PyAny>, dchi2: Option<f64>, maxiter: Option<usize>,
    change: Option<f64>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let state = PyInversionState::new(inv)?;
    let opts =
        BoundOptions::new(dchi2.unwrap_or(0.5), maxiter.unwrap_or(100), change.unwrap_or(1.02))?;
    let result = bounds::iterate_bounds(&state, &opts)?;
    Ok((result.lower.into_pyarray(py), result.upper.into_pyarray(py)))
}

/// mod_covar — Python-facing wrapper for the covariance estimator.
///
/// Returns `(std_dev, correlation)` as numpy arrays; a singular
/// normal-equations matrix raises `ValueError` instead of returning
/// degenerate zeros.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "mod_covar")]
fn mod_covar_py<'py>(
    py: Python<'py>, inv: &Bound<'py, PyAny>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray2<f64>>)> {
    let state = PyInversionState::new(inv)?;
    let mcm = mod_covar_rs(&state)?;
    Ok((mcm.std_dev.into_pyarray(py), mcm.correlation.into_pyarray(py)))
}

/// Initialize the `_rust_postinversion` extension module.
///
/// Registers the post-inversion functions; invoked automatically by
/// Python when importing the compiled extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_postinversion<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(iterate_bounds_py, m)?)?;
    m.add_function(wrap_pyfunction!(mod_covar_py, m)?)?;
    Ok(())
}
