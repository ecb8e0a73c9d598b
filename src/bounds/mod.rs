//! bounds — per-parameter uncertainty bounds by forward perturbation.
//!
//! Purpose
//! -------
//! Estimate how far each model parameter can move from its converged
//! value before the data misfit degrades by a chosen chi-square
//! increment. Each parameter is walked independently in both directions
//! with a fixed multiplicative step, re-running the forward model at
//! every step; the crossing value becomes the bound.
//!
//! Key behaviors
//! -------------
//! - [`search::iterate_bounds`] performs the two-directional walk per
//!   parameter and returns [`search::ParameterBounds`].
//! - [`options::BoundOptions`] validates the chi-square increment,
//!   iteration cap, and growth factor on construction, and can derive
//!   the increment from a chi-square(1) confidence level.
//! - Cap exhaustion is silent by design: a cap-limited bound is the last
//!   value reached, not an error.
//!
//! Invariants & assumptions
//! ------------------------
//! - The forward operator is deterministic; bounds are then reproducible
//!   call to call.
//! - At most `2 × n_model × max_iter` forward evaluations are performed.
//! - The inversion state is never mutated; perturbed models are private
//!   copies.
//!
//! Downstream usage
//! ----------------
//! - Callers fit an inversion elsewhere, wrap its result in an
//!   [`InversionState`](crate::inversion::InversionState) implementation,
//!   and call `iterate_bounds(&inv, &BoundOptions::default())`.

pub mod errors;
pub mod options;
pub mod search;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{BoundError, BoundResult};
pub use self::options::BoundOptions;
pub use self::search::{ParameterBounds, iterate_bounds};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{BoundError, BoundResult};
    pub use super::options::BoundOptions;
    pub use super::search::{ParameterBounds, iterate_bounds};
}
