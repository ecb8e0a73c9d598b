//! covariance — formal model covariance and correlation of a converged fit.
//!
//! Purpose
//! -------
//! Quantify parameter uncertainty and trade-offs under the
//! linearized-Gaussian assumption: the inverse of the weighted
//! normal-equations matrix is the model covariance matrix, its diagonal
//! gives per-parameter standard deviations, and symmetric rescaling
//! gives the correlation matrix.
//!
//! Key behaviors
//! -------------
//! - [`estimator::mod_covar`] assembles the transform- and
//!   error-weighted Jacobian, inverts the normal equations, and returns
//!   a [`estimator::ModelCovariance`].
//! - Rank deficiency and degenerate weights are named errors
//!   ([`errors::CovarianceError`]); there is no zero-filled fallback
//!   result.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shapes are validated before any matrix algebra; malformed states
//!   surface as typed errors rather than panics from the linear-algebra
//!   layer.
//! - The estimate is only meaningful near the converged model; this
//!   module does not judge convergence.
//!
//! Downstream usage
//! ----------------
//! - `mod_covar(&inv)?` after a successful fit; inspect `std_dev` for
//!   error bars and `correlation` for parameter trade-offs.

pub mod errors;
pub mod estimator;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{CovarianceError, CovarianceResult};
pub use self::estimator::{ModelCovariance, mod_covar};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{CovarianceError, CovarianceResult};
    pub use super::estimator::{ModelCovariance, mod_covar};
}
