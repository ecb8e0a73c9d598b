//! Python-side adapters for the `python-bindings` feature: numpy
//! extraction helpers and the duck-typed inversion-object bridge.

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Array1 → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::inversion::{
    errors::{InversionError, InversionResult},
    finite_diff::compute_jacobian,
    state::InversionState,
    transforms::Transform,
    types::{Jacobian, Misfit, Model, Response},
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    let vec: Vec<f64> = raw_data
        .extract()
        .map_err(|_| PyTypeError::new_err("expected a 1-D numpy.ndarray or sequence of float64"))?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Map a Python failure into the inversion-layer catch-all.
#[cfg(feature = "python-bindings")]
fn py_to_inversion_err(err: PyErr) -> InversionError {
    InversionError::Anyhow(err.to_string())
}

/// Call a no-argument method on `obj` and extract a 1-D float64 array.
#[cfg(feature = "python-bindings")]
fn call_vector_method(obj: &Py<PyAny>, name: &str) -> InversionResult<Array1<f64>> {
    Python::with_gil(|py| {
        let result = obj.bind(py).call_method0(name).map_err(py_to_inversion_err)?;
        let arr = extract_f64_array(py, &result).map_err(py_to_inversion_err)?;
        Ok(arr.as_array().to_owned())
    })
}

/// PyTransform — duck-typed transform object bridge.
///
/// Wraps a Python object exposing `deriv(values)` and
/// `error(values, errors)` (the pygimli transform surface) and forwards
/// [`Transform`] calls to it, converting vectors through numpy.
#[cfg(feature = "python-bindings")]
pub struct PyTransform {
    obj: Py<PyAny>,
}

#[cfg(feature = "python-bindings")]
impl Transform for PyTransform {
    fn deriv(&self, values: &Array1<f64>) -> InversionResult<Array1<f64>> {
        Python::with_gil(|py| {
            let arg = values.to_owned().into_pyarray(py);
            let result =
                self.obj.bind(py).call_method1("deriv", (arg,)).map_err(py_to_inversion_err)?;
            let arr = extract_f64_array(py, &result).map_err(py_to_inversion_err)?;
            Ok(arr.as_array().to_owned())
        })
    }

    fn error(&self, values: &Array1<f64>, errors: &Array1<f64>) -> InversionResult<Array1<f64>> {
        Python::with_gil(|py| {
            let vals = values.to_owned().into_pyarray(py);
            let errs = errors.to_owned().into_pyarray(py);
            let result = self
                .obj
                .bind(py)
                .call_method1("error", (vals, errs))
                .map_err(py_to_inversion_err)?;
            let arr = extract_f64_array(py, &result).map_err(py_to_inversion_err)?;
            Ok(arr.as_array().to_owned())
        })
    }
}

/// PyInversionState — duck-typed inversion-object bridge.
///
/// Adapts any Python object exposing the pygimli-style surface
/// (`model()`, `response()`, `error()`, `chi2()`, `getPhiD(resp)`,
/// `forwardOperator()`, `transData()`, `transModel()`) into
/// [`InversionState`]. The forward operator and both transforms are
/// resolved once at construction; per-call failures surface as
/// inversion-layer errors, which the binding layer converts to Python
/// `ValueError`s.
#[cfg(feature = "python-bindings")]
pub struct PyInversionState {
    inv: Py<PyAny>,
    forward_op: Py<PyAny>,
    trans_data: PyTransform,
    trans_model: PyTransform,
}

#[cfg(feature = "python-bindings")]
impl PyInversionState {
    /// Resolve the forward operator and transforms from `inv`.
    ///
    /// # Errors
    /// Raises the original Python exception if any of
    /// `forwardOperator()`, `transData()`, or `transModel()` is missing
    /// or fails.
    pub fn new<'py>(inv: &Bound<'py, PyAny>) -> PyResult<Self> {
        let forward_op = inv.call_method0("forwardOperator")?.unbind();
        let trans_data = PyTransform { obj: inv.call_method0("transData")?.unbind() };
        let trans_model = PyTransform { obj: inv.call_method0("transModel")?.unbind() };
        Ok(Self { inv: inv.clone().unbind(), forward_op, trans_data, trans_model })
    }
}

#[cfg(feature = "python-bindings")]
impl InversionState for PyInversionState {
    type DataTrans = PyTransform;
    type ModelTrans = PyTransform;

    fn model(&self) -> InversionResult<Model> {
        call_vector_method(&self.inv, "model")
    }

    fn response(&self) -> InversionResult<Response> {
        call_vector_method(&self.inv, "response")
    }

    fn error(&self) -> InversionResult<Response> {
        call_vector_method(&self.inv, "error")
    }

    fn chi2(&self) -> InversionResult<Misfit> {
        Python::with_gil(|py| {
            let result = self.inv.bind(py).call_method0("chi2").map_err(py_to_inversion_err)?;
            result.extract::<f64>().map_err(py_to_inversion_err)
        })
    }

    fn phi_d(&self, response: &Response) -> InversionResult<Misfit> {
        Python::with_gil(|py| {
            let arg = response.to_owned().into_pyarray(py);
            let result =
                self.inv.bind(py).call_method1("getPhiD", (arg,)).map_err(py_to_inversion_err)?;
            result.extract::<f64>().map_err(py_to_inversion_err)
        })
    }

    fn forward(&self, model: &Model) -> InversionResult<Response> {
        Python::with_gil(|py| {
            let arg = model.to_owned().into_pyarray(py);
            let result = self
                .forward_op
                .bind(py)
                .call1((arg,))
                .map_err(|err| InversionError::ForwardFailed { text: err.to_string() })?;
            let arr = extract_f64_array(py, &result).map_err(py_to_inversion_err)?;
            Ok(arr.as_array().to_owned())
        })
    }

    fn jacobian(&self) -> InversionResult<Jacobian> {
        // Engines without an explicit Jacobian fall back to finite
        // differences of the forward operator.
        let analytic = Python::with_gil(|py| -> Option<Jacobian> {
            let result = self.forward_op.bind(py).call_method0("jacobian").ok()?;
            let arr = result.extract::<PyReadonlyArray2<f64>>().ok()?;
            Some(arr.as_array().to_owned())
        });
        match analytic {
            Some(jacobian) => Ok(jacobian),
            None => {
                let model = self.model()?;
                let n_data = self.response()?.len();
                compute_jacobian(&|m: &Model| self.forward(m), &model, n_data)
            }
        }
    }

    fn trans_data(&self) -> &Self::DataTrans {
        &self.trans_data
    }

    fn trans_model(&self) -> &Self::ModelTrans {
        &self.trans_model
    }
}
