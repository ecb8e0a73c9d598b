//! covariance::estimator — formal model covariance from the weighted Jacobian.
//!
//! Purpose
//! -------
//! Assemble the transform- and error-weighted Jacobian of a converged
//! inversion, form the normal-equations matrix, invert it, and extract
//! per-parameter standard deviations together with a unit-diagonal
//! correlation matrix. This module handles the conversion between
//! `ndarray` and `nalgebra` types for the matrix inversion.
//!
//! Key behaviors
//! -------------
//! - Weight the raw Jacobian rows by the data-transform derivative and
//!   columns by the reciprocal model-transform derivative, then weight
//!   rows again by the reciprocal propagated data error.
//! - Copy the resulting normal-equations matrix into a
//!   `nalgebra::DMatrix` (`fill_dmatrix`) and invert it with
//!   `try_inverse`.
//! - Derive standard deviations from the covariance diagonal and scale
//!   the covariance into a correlation matrix with unit diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - All input shapes are validated before any linear algebra runs:
//!   Jacobian `(n_data, n_model)`, error vector of data length, finite
//!   entries throughout.
//! - The linearized-Gaussian assumption of the formal covariance holds
//!   only near the converged model; this module quantifies uncertainty
//!   around the estimate, it does not assess the fit itself.
//!
//! Conventions
//! -----------
//! - A singular normal-equations matrix is a named error
//!   ([`CovarianceError::SingularNormalMatrix`]), not a degenerate
//!   zero-filled result; callers match on the error to detect
//!   rank-deficient problems.
//! - Failures from the inversion state propagate as
//!   [`CovarianceError::Inversion`]; no logging happens here.
//!
//! Downstream usage
//! ----------------
//! - Callers wrap a converged inversion in an
//!   [`InversionState`](crate::inversion::InversionState) implementation
//!   and call [`mod_covar`]; the returned [`ModelCovariance`] carries
//!   standard deviations, the correlation matrix, and the raw covariance
//!   matrix.
use crate::{
    covariance::errors::{CovarianceError, CovarianceResult},
    inversion::{
        errors::InversionError,
        state::InversionState,
        transforms::Transform,
        types::Jacobian,
        validation::{validate_jacobian, validate_model, validate_response},
    },
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Formal model covariance of a converged inversion.
///
/// - `std_dev`: per-parameter standard deviations, the square roots of
///   the covariance diagonal.
/// - `correlation`: covariance scaled to unit diagonal; symmetric with
///   entries in `[-1, 1]` up to floating-point error.
/// - `covariance`: the unscaled model covariance matrix, the inverse of
///   the weighted normal-equations matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCovariance {
    pub std_dev: Array1<f64>,
    pub correlation: Array2<f64>,
    pub covariance: Array2<f64>,
}

impl ModelCovariance {
    /// Number of model parameters the covariance was computed for.
    pub fn len(&self) -> usize {
        self.std_dev.len()
    }

    /// Whether the covariance is empty (zero parameters).
    pub fn is_empty(&self) -> bool {
        self.std_dev.is_empty()
    }
}

/// mod_covar — formal model covariance matrix from a converged inversion.
///
/// Purpose
/// -------
/// Compute the linearized model covariance
/// `(DJᵀ DJ)⁻¹` where `DJ` is the Jacobian weighted by transform
/// derivatives and reciprocal propagated data errors, and reduce it to
/// standard deviations and a unit-diagonal correlation matrix.
///
/// Parameters
/// ----------
/// - `inv`: `&I`
///   Converged inversion state. Consumes `model`, `response`, `error`,
///   `jacobian`, and both transforms; the forward operator is only
///   touched if the state's default finite-difference Jacobian is in
///   use.
///
/// Returns
/// -------
/// `CovarianceResult<ModelCovariance>`
///   On success, standard deviations (length `n_model`), the correlation
///   matrix, and the covariance matrix (both `n_model × n_model`).
///
/// Errors
/// ------
/// - [`CovarianceError::Inversion`]
///   Wraps shape mismatches, non-finite inputs, transform domain
///   violations, and accessor failures from the inversion state.
/// - [`CovarianceError::InvalidModelDeriv`] / [`CovarianceError::InvalidDataWeight`]
///   A zero or non-finite transform derivative or propagated error would
///   poison the weighting.
/// - [`CovarianceError::SingularNormalMatrix`]
///   The normal-equations matrix is rank-deficient (e.g. a zero Jacobian
///   column).
/// - [`CovarianceError::NonPositiveVariance`]
///   Ill-conditioning produced a non-positive covariance diagonal entry.
///
/// Notes
/// -----
/// - The correlation matrix has exact unit diagonal by construction
///   (each diagonal entry is divided by itself); off-diagonal symmetry
///   is inherited from the symmetric normal-equations matrix.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_postinversion::covariance::mod_covar;
/// # use rust_postinversion::inversion::{
/// #     IdentityTransform, InversionResult, InversionState, Jacobian, Misfit, Model, Response,
/// # };
/// struct Converged;
///
/// impl InversionState for Converged {
///     type DataTrans = IdentityTransform;
///     type ModelTrans = IdentityTransform;
///
///     fn model(&self) -> InversionResult<Model> {
///         Ok(array![1.0, 2.0])
///     }
///     fn response(&self) -> InversionResult<Response> {
///         Ok(array![1.0, 2.0])
///     }
///     fn error(&self) -> InversionResult<Response> {
///         Ok(array![1.0, 1.0])
///     }
///     fn chi2(&self) -> InversionResult<Misfit> {
///         Ok(0.0)
///     }
///     fn phi_d(&self, _response: &Response) -> InversionResult<Misfit> {
///         Ok(0.0)
///     }
///     fn forward(&self, model: &Model) -> InversionResult<Response> {
///         Ok(model.clone())
///     }
///     fn jacobian(&self) -> InversionResult<Jacobian> {
///         Ok(Jacobian::eye(2))
///     }
///     fn trans_data(&self) -> &Self::DataTrans {
///         &IdentityTransform
///     }
///     fn trans_model(&self) -> &Self::ModelTrans {
///         &IdentityTransform
///     }
/// }
///
/// let mcm = mod_covar(&Converged).unwrap();
/// assert!((mcm.std_dev[0] - 1.0).abs() < 1e-12);
/// assert!((mcm.correlation[[0, 0]] - 1.0).abs() < 1e-12);
/// ```
pub fn mod_covar<I: InversionState>(inv: &I) -> CovarianceResult<ModelCovariance> {
    let model = inv.model()?;
    validate_model(&model)?;
    let response = inv.response()?;
    if response.is_empty() {
        return Err(CovarianceError::Inversion(InversionError::EmptyResponse));
    }
    let n_data = response.len();
    let n_model = model.len();
    validate_response(&response, n_data)?;
    let error = inv.error()?;
    validate_response(&error, n_data)?;
    let jacobian = inv.jacobian()?;
    validate_jacobian(&jacobian, n_data, n_model)?;

    // Transform derivatives: data rows, reciprocal model columns.
    let td = inv.trans_data().deriv(&response)?;
    let tm = inv.trans_model().deriv(&model)?;
    check_transform_len(td.len(), n_data)?;
    check_transform_len(tm.len(), n_model)?;
    let mut col_weights = Array1::zeros(n_model);
    for (index, &value) in tm.iter().enumerate() {
        let recip = 1.0 / value;
        if !recip.is_finite() {
            return Err(CovarianceError::InvalidModelDeriv { index, value });
        }
        col_weights[index] = recip;
    }
    let weighted = weight_jacobian(&jacobian, &td, &col_weights);

    // Data weights: reciprocal propagated error.
    let propagated = inv.trans_data().error(&response, &error)?;
    check_transform_len(propagated.len(), n_data)?;
    let mut data_weights = Array1::zeros(n_data);
    for (index, &value) in propagated.iter().enumerate() {
        let weight = 1.0 / value;
        if !weight.is_finite() {
            return Err(CovarianceError::InvalidDataWeight { index, value });
        }
        data_weights[index] = weight;
    }
    let dj = weight_jacobian(&weighted, &data_weights, &Array1::ones(n_model));

    // Normal equations and model covariance.
    let jtj = dj.t().dot(&dj);
    let mut jtj_nalg = DMatrix::<f64>::zeros(n_model, n_model);
    fill_dmatrix(&jtj, &mut jtj_nalg);
    let mcm = jtj_nalg
        .try_inverse()
        .ok_or(CovarianceError::SingularNormalMatrix { dim: n_model })?;

    let mut std_dev = Array1::zeros(n_model);
    for i in 0..n_model {
        let variance = mcm[(i, i)];
        if !variance.is_finite() || variance <= 0.0 {
            return Err(CovarianceError::NonPositiveVariance { index: i, value: variance });
        }
        std_dev[i] = variance.sqrt();
    }

    let mut covariance = Array2::zeros((n_model, n_model));
    let mut correlation = Array2::zeros((n_model, n_model));
    for i in 0..n_model {
        for j in 0..n_model {
            let entry = mcm[(i, j)];
            covariance[[i, j]] = entry;
            correlation[[i, j]] = entry / (std_dev[i] * std_dev[j]);
        }
    }

    Ok(ModelCovariance { std_dev, correlation, covariance })
}

// ---- Helper methods ----

/// check_transform_len — guard transform output lengths.
///
/// Transforms are user-supplied; a wrong-length derivative or error
/// vector would otherwise panic inside the weighting loops.
fn check_transform_len(found: usize, expected: usize) -> CovarianceResult<()> {
    if found != expected {
        return Err(CovarianceError::Inversion(InversionError::TransformDimMismatch {
            expected,
            found,
        }));
    }
    Ok(())
}

/// weight_jacobian — scale Jacobian rows and columns elementwise.
///
/// Returns a new matrix with entry `(i, j)` equal to
/// `row_weights[i] * jacobian[(i, j)] * col_weights[j]`. Shapes are the
/// caller's responsibility; this helper is only invoked after the
/// Jacobian and weight vectors have been validated.
fn weight_jacobian(
    jacobian: &Jacobian, row_weights: &Array1<f64>, col_weights: &Array1<f64>,
) -> Jacobian {
    let (n_data, n_model) = jacobian.dim();
    let mut out = Array2::zeros((n_data, n_model));
    for i in 0..n_data {
        for j in 0..n_model {
            out[[i, j]] = row_weights[i] * jacobian[[i, j]] * col_weights[j];
        }
    }
    out
}

/// fill_dmatrix — copy an `ndarray` matrix into a `nalgebra::DMatrix`.
///
/// Bridges between `ndarray` and `nalgebra` by copying a square
/// normal-equations matrix into a preallocated `DMatrix<f64>` using
/// column-major writes, matching the internal storage of `DMatrix`.
/// Both matrices must be `n×n` with matching `n`; mismatches are
/// programmer errors and may panic via out-of-bounds indexing.
fn fill_dmatrix(matrix: &Array2<f64>, matrix_nalg: &mut DMatrix<f64>) {
    let n = matrix.ncols();
    for j in 0..n {
        for i in 0..n {
            matrix_nalg[(i, j)] = matrix[[i, j]];
        }
    }
}
