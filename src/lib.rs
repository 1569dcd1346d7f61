pub mod matrix {
    pub mod matrix;
    pub mod rref;
    pub mod solution;
}
pub mod rings {
    pub mod decimal;
    pub mod float;
    pub mod fraction;
    pub mod scalar;
}

pub mod error;

#[cfg(feature = "python")]
pub mod python;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{MatrixError, ParseDecimalError, Result};
pub use matrix::matrix::Matrix;
pub use matrix::rref::{reduce, Reduction};
pub use matrix::solution::{solve, ParametricSolution, SolutionSet};
pub use rings::decimal::{Decimal, DecimalContext, RoundingMode};
pub use rings::fraction::Fraction;
pub use rings::scalar::Scalar;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn rref_solver(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyMatrix>()?;
    m.add_class::<python::PyDecimalMatrix>()?;
    Ok(())
}
