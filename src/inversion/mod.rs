//! inversion — capability contract, transforms, and numeric plumbing.
//!
//! Purpose
//! -------
//! Define the narrow surface through which the post-inversion routines
//! read a completed least-squares inversion: the [`InversionState`]
//! trait, the [`Transform`] seam for data/model reparameterizations, a
//! finite-difference Jacobian fallback, and the shared validation and
//! error types the rest of the crate builds on.
//!
//! Key behaviors
//! -------------
//! - Express the external inversion-result object as a trait
//!   ([`state::InversionState`]) so alternative engines can be
//!   substituted without touching the estimators.
//! - Provide stock transforms ([`transforms::IdentityTransform`],
//!   [`transforms::LinearTransform`], [`transforms::LogTransform`]) with
//!   guarded domains and first-order error propagation.
//! - Supply a validated finite-difference Jacobian
//!   ([`finite_diff::compute_jacobian`]) used as the trait's default
//!   when no analytic Jacobian exists.
//! - Normalize all layer failures into [`errors::InversionError`] with
//!   the [`errors::InversionResult`] alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Implementations keep `model()`, `response()`, `error()`, and
//!   `jacobian()` mutually consistent in shape; validators in
//!   [`validation`] enforce this before any linear algebra runs.
//! - All vectors and matrices use the dense `f64` aliases in [`types`].
//! - Nothing in this module performs I/O or logging; failures are typed
//!   errors, never panics.
//!
//! Downstream usage
//! ----------------
//! - The bound iterator ([`crate::bounds`]) consumes `model`,
//!   `response`, `chi2`, `phi_d`, and `forward`.
//! - The covariance estimator ([`crate::covariance`]) additionally
//!   consumes `error`, `jacobian`, and both transforms.

pub mod errors;
pub mod finite_diff;
pub mod state;
pub mod transforms;
pub mod types;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InversionError, InversionResult};
pub use self::state::InversionState;
pub use self::transforms::{IdentityTransform, LinearTransform, LogTransform, Transform};
pub use self::types::{Jacobian, Misfit, Model, Response};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can `use rust_postinversion::inversion::prelude::*;` to
// import the primary inversion surface in a single line.

pub mod prelude {
    pub use super::errors::{InversionError, InversionResult};
    pub use super::state::InversionState;
    pub use super::transforms::{IdentityTransform, LinearTransform, LogTransform, Transform};
    pub use super::types::{Jacobian, Misfit, Model, Response};
}
