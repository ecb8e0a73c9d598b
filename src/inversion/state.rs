//! Capability contract for a completed least-squares inversion.
//!
//! - [`InversionState`]: trait inversion engines implement so the bound
//!   iterator and covariance estimator can read their results.
//!
//! Convention: the trait exposes the *converged* state of an inversion.
//! `model()` and `response()` return the current estimate and its forward
//! response; `forward()` re-evaluates candidate models without mutating
//! the state. Misfits follow the chi-square convention: `chi2()` is
//! normalized per datum, `phi_d()` is absolute and is normalized by the
//! caller.
use crate::inversion::{
    errors::InversionResult,
    finite_diff::compute_jacobian,
    transforms::Transform,
    types::{Jacobian, Misfit, Model, Response},
};

/// Read/evaluate-only view of a completed inversion.
///
/// All accessors are fallible so engines backed by FFI or lazy
/// evaluation can surface failures as recoverable
/// [`InversionError`](crate::inversion::errors::InversionError) values
/// rather than panics. Implementations must keep the accessors
/// consistent with each other: `response()` is the forward response of
/// `model()`, the Jacobian has shape
/// `(response().len(), model().len())`, and `error()` matches the
/// response length.
///
/// - `type DataTrans` / `type ModelTrans`: transforms applied to data
///   and model space before derivatives and errors are taken.
///
/// Required:
/// - `model()`, `response()`, `error()`: current vectors.
/// - `chi2()`: current per-datum normalized misfit.
/// - `phi_d(&Response)`: absolute data misfit of a candidate response.
/// - `forward(&Model)`: forward evaluation of a candidate model.
/// - `trans_data()`, `trans_model()`: transform accessors.
///
/// Optional:
/// - `jacobian()`: dense Jacobian at the current model. The default
///   implementation brute-forces it with finite differences of
///   `forward`; engines with an analytic Jacobian should override it.
pub trait InversionState {
    type DataTrans: Transform;
    type ModelTrans: Transform;

    // Required methods
    fn model(&self) -> InversionResult<Model>;
    fn response(&self) -> InversionResult<Response>;
    fn error(&self) -> InversionResult<Response>;
    fn chi2(&self) -> InversionResult<Misfit>;
    fn phi_d(&self, response: &Response) -> InversionResult<Misfit>;
    fn forward(&self, model: &Model) -> InversionResult<Response>;
    fn trans_data(&self) -> &Self::DataTrans;
    fn trans_model(&self) -> &Self::ModelTrans;

    // Optional methods
    fn jacobian(&self) -> InversionResult<Jacobian> {
        let model = self.model()?;
        let n_data = self.response()?.len();
        compute_jacobian(&|m: &Model| self.forward(m), &model, n_data)
    }
}
