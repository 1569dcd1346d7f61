use crate::error::MatrixError;
use crate::matrix::matrix::Matrix;
use crate::rings::decimal::{Decimal, DecimalContext};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

fn value_error(error: MatrixError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn parse_decimals(values: &[String]) -> PyResult<Vec<Decimal>> {
    values
        .iter()
        .map(|s| s.parse::<Decimal>().map_err(|e| value_error(e.into())))
        .collect()
}

fn render(vectors: Vec<Vec<Decimal>>) -> Vec<Vec<String>> {
    vectors
        .iter()
        .map(|v| v.iter().map(|x| x.to_string()).collect())
        .collect()
}

#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix")]
pub struct PyMatrix {
    inner: Matrix<f64>,
}

#[pymethods]
impl PyMatrix {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(PyMatrix {
            inner: Matrix::from_rows(lines).map_err(value_error)?,
        })
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.columns()
    }

    pub fn column(&self, index: usize) -> PyResult<Vec<f64>> {
        self.inner.column(index).map_err(value_error)
    }

    pub fn multiply(&self, vector: Vec<f64>) -> PyResult<Vec<f64>> {
        self.inner.multiply(&vector).map_err(value_error)
    }

    pub fn reduced_form(&self) -> PyMatrix {
        PyMatrix {
            inner: self.inner.reduced_form(),
        }
    }

    pub fn pivot_columns(&self) -> Vec<usize> {
        self.inner.pivot_columns().to_vec()
    }

    pub fn free_columns(&self) -> Vec<usize> {
        self.inner.free_columns().to_vec()
    }

    /// `None` without solution, else the particular solution followed by the directions.
    pub fn solve(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.solve().to_vectors()
    }

    fn __repr__(&self) -> String {
        format!("Matrix({})", self.inner)
    }
}

#[derive(Debug, Clone)]
#[pyclass(frozen, name = "DecimalMatrix")]
pub struct PyDecimalMatrix {
    inner: Matrix<Decimal>,
}

#[pymethods]
impl PyDecimalMatrix {
    #[classmethod]
    #[pyo3(signature = (lines, precision = None))]
    pub fn from_list(
        _cls: &Bound<PyType>,
        lines: Vec<Vec<String>>,
        precision: Option<u64>,
    ) -> PyResult<Self> {
        let context = precision.map_or_else(DecimalContext::default, DecimalContext::new);
        Ok(PyDecimalMatrix {
            inner: Matrix::<Decimal>::parse(&lines, context).map_err(value_error)?,
        })
    }

    pub fn to_list(&self) -> Vec<Vec<String>> {
        render(self.inner.to_list())
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.columns()
    }

    pub fn column(&self, index: usize) -> PyResult<Vec<String>> {
        let column = self.inner.column(index).map_err(value_error)?;
        Ok(column.iter().map(|x| x.to_string()).collect())
    }

    pub fn multiply(&self, vector: Vec<String>) -> PyResult<Vec<String>> {
        let product = self
            .inner
            .multiply(&parse_decimals(&vector)?)
            .map_err(value_error)?;
        Ok(product.iter().map(|x| x.to_string()).collect())
    }

    pub fn reduced_form(&self) -> PyDecimalMatrix {
        PyDecimalMatrix {
            inner: self.inner.reduced_form(),
        }
    }

    pub fn pivot_columns(&self) -> Vec<usize> {
        self.inner.pivot_columns().to_vec()
    }

    pub fn free_columns(&self) -> Vec<usize> {
        self.inner.free_columns().to_vec()
    }

    pub fn solve(&self) -> Option<Vec<Vec<String>>> {
        self.inner.solve().to_vectors().map(render)
    }

    fn __repr__(&self) -> String {
        format!("DecimalMatrix({})", self.inner)
    }
}
