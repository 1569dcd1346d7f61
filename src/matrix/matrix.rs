use crate::error::{MatrixError, Result};
use crate::matrix::rref::{self, Reduction};
use crate::matrix::solution::{self, SolutionSet};
use crate::rings::decimal::{Decimal, DecimalContext};
use crate::rings::scalar::Scalar;
use itertools::Itertools;
use std::fmt;
use std::fmt::Display;
use std::sync::OnceLock;

/// Immutable dense matrix, stored row-major.
///
/// The reduced row-echelon form and the solution set of the system the matrix
/// represents (last column = right-hand side) are derived on first request
/// and cached for the lifetime of the instance.
#[derive(Debug, Clone)]
pub struct Matrix<T: Scalar> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
    context: T::Context,
    reduction: OnceLock<Reduction<T>>,
    solution: OnceLock<SolutionSet<T>>,
}

impl<T: Scalar> Matrix<T> {
    pub fn from_rows(lines: Vec<Vec<T>>) -> Result<Self> {
        Self::with_context(lines, T::Context::default())
    }

    pub fn with_context(lines: Vec<Vec<T>>, context: T::Context) -> Result<Self> {
        let rows = lines.len();
        if rows == 0 {
            return Err(MatrixError::NoRows);
        }
        let cols = lines[0].len();
        if cols == 0 {
            return Err(MatrixError::NoColumns);
        }
        if let Some((row, line)) = lines.iter().find_position(|l| l.len() != cols) {
            return Err(MatrixError::RaggedRow {
                row,
                expected: cols,
                actual: line.len(),
            });
        }

        Ok(Self::from_parts(
            rows,
            cols,
            lines.into_iter().flatten().collect(),
            context,
        ))
    }

    /// One-column matrix holding `vector`.
    pub fn from_column(vector: Vec<T>) -> Result<Self> {
        Self::from_rows(vector.into_iter().map(|x| vec![x]).collect())
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<T>, context: T::Context) -> Self {
        Matrix {
            rows,
            cols,
            cells,
            context,
            reduction: OnceLock::new(),
            solution: OnceLock::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    pub fn context(&self) -> &T::Context {
        &self.context
    }

    pub(crate) fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.cols + col]
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn column(&self, index: usize) -> Result<Vec<T>> {
        if index >= self.cols {
            return Err(MatrixError::ColumnOutOfBounds {
                index,
                columns: self.cols,
            });
        }
        Ok((0..self.rows).map(|r| self.at(r, index).clone()).collect())
    }

    pub fn multiply(&self, vector: &[T]) -> Result<Vec<T>> {
        if vector.len() != self.cols {
            return Err(MatrixError::DimensionMismatch {
                expected: self.cols,
                actual: vector.len(),
            });
        }

        Ok(self
            .cells
            .chunks(self.cols)
            .map(|line| {
                line.iter()
                    .zip(vector)
                    .fold(T::zero(), |acc, (a, b)| acc + a.clone() * b.clone())
            })
            .collect())
    }

    fn reduction(&self) -> &Reduction<T> {
        self.reduction.get_or_init(|| rref::reduce(self))
    }

    /// Reduced row-echelon form, as a new matrix sharing nothing with `self`.
    pub fn reduced_form(&self) -> Matrix<T> {
        let reduction = self.reduction();
        Matrix::from_parts(
            self.rows,
            self.cols,
            reduction.cells().to_vec(),
            self.context.clone(),
        )
    }

    pub fn pivot_columns(&self) -> &[usize] {
        self.reduction().pivot_columns()
    }

    /// Non-constant columns without a pivot, in increasing order.
    pub fn free_columns(&self) -> &[usize] {
        self.reduction().free_columns()
    }

    pub fn rank(&self) -> usize {
        self.reduction().rank()
    }

    pub fn solve(&self) -> &SolutionSet<T> {
        self.solution.get_or_init(|| solution::solve(self.reduction()))
    }

    /// Leading entries are ones moving strictly right, alone in their column,
    /// with zero rows at the bottom.
    pub fn is_rref(&self) -> bool {
        let mut previous: Option<usize> = None;
        let mut seen_zero_row = false;

        for (i, line) in self.cells.chunks(self.cols).enumerate() {
            let Some(lead) = line.iter().position(|x| !x.is_zero()) else {
                seen_zero_row = true;
                continue;
            };
            if seen_zero_row || previous.is_some_and(|p| lead <= p) || !line[lead].is_one() {
                return false;
            }
            if (0..self.rows).any(|r| r != i && !self.at(r, lead).is_zero()) {
                return false;
            }
            previous = Some(lead);
        }
        true
    }
}

impl Matrix<Decimal> {
    /// Reads every entry as a decimal literal.
    pub fn parse<S: AsRef<str>>(lines: &[Vec<S>], context: DecimalContext) -> Result<Self> {
        let lines = lines
            .iter()
            .map(|line| {
                line.iter()
                    .map(|s| s.as_ref().parse::<Decimal>())
                    .collect::<std::result::Result<Vec<_>, _>>()
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::with_context(lines, context)
    }
}

// Entries only: two matrices are equal whatever their caches hold
impl<T: Scalar> PartialEq for Matrix<T> {
    fn eq(&self, rhs: &Matrix<T>) -> bool {
        self.rows == rhs.rows && self.cols == rhs.cols && self.cells == rhs.cells
    }
}

impl<T: Scalar> Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.cells
                .chunks(self.cols)
                .map(|line| format!("[{}]", line.iter().join(", ")))
                .join(", ")
        )
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
