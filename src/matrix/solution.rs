use crate::error::{MatrixError, Result};
use crate::matrix::rref::Reduction;
use crate::rings::scalar::Scalar;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use tracing::debug;

/// Solutions of an augmented system `[A | b]`.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionSet<T> {
    NoSolution,
    Parametric(ParametricSolution<T>),
}

/// `particular + t_1 * directions[0] + ... + t_k * directions[k - 1]`, where
/// `t_i` is the value of the variable of column `free_columns[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricSolution<T> {
    particular: Vec<T>,
    directions: Vec<Vec<T>>,
    free_columns: Vec<usize>,
}

impl<T: Scalar> SolutionSet<T> {
    pub fn is_consistent(&self) -> bool {
        matches!(self, SolutionSet::Parametric(_))
    }

    pub fn as_parametric(&self) -> Option<&ParametricSolution<T>> {
        match self {
            SolutionSet::NoSolution => None,
            SolutionSet::Parametric(solution) => Some(solution),
        }
    }

    /// The particular solution followed by one direction per free variable,
    /// `None` when the system has no solution.
    pub fn to_vectors(&self) -> Option<Vec<Vec<T>>> {
        self.as_parametric().map(ParametricSolution::to_vectors)
    }
}

impl<T: Scalar> ParametricSolution<T> {
    /// Solution with every free variable set to zero.
    pub fn particular(&self) -> &[T] {
        &self.particular
    }

    pub fn directions(&self) -> &[Vec<T>] {
        &self.directions
    }

    pub fn free_columns(&self) -> &[usize] {
        &self.free_columns
    }

    /// Number of unknowns.
    pub fn dimension(&self) -> usize {
        self.particular.len()
    }

    pub fn is_unique(&self) -> bool {
        self.directions.is_empty()
    }

    pub fn to_vectors(&self) -> Vec<Vec<T>> {
        std::iter::once(self.particular.clone())
            .chain(self.directions.iter().cloned())
            .collect()
    }

    /// The solution obtained by giving each free variable the matching value of `parameters`.
    pub fn evaluate(&self, parameters: &[T]) -> Result<Vec<T>> {
        if parameters.len() != self.directions.len() {
            return Err(MatrixError::DimensionMismatch {
                expected: self.directions.len(),
                actual: parameters.len(),
            });
        }

        Ok((0..self.dimension())
            .map(|i| {
                self.directions
                    .iter()
                    .zip(parameters)
                    .fold(self.particular[i].clone(), |acc, (direction, t)| {
                        acc + direction[i].clone() * t.clone()
                    })
            })
            .collect())
    }
}

/// Builds the solution set from a reduced augmented matrix.
///
/// Pivot rows are resolved bottom-up, so every column to the right of a pivot
/// is either free or already resolved when the pivot's row is processed.
pub fn solve<T: Scalar>(reduction: &Reduction<T>) -> SolutionSet<T> {
    if reduction.is_inconsistent() {
        debug!(pivots = ?reduction.pivot_columns(), "system has no solution");
        return SolutionSet::NoSolution;
    }

    let last = reduction.columns() - 1;
    let free_columns = reduction.free_columns().to_vec();

    // vectors[0] is the particular solution, vectors[k] the direction of the k-th free variable
    let mut vectors = vec![vec![T::zero(); last]; free_columns.len() + 1];
    let mut slot_of_free = BTreeMap::new();
    for (k, &col) in free_columns.iter().enumerate() {
        vectors[k + 1][col] = T::one();
        slot_of_free.insert(col, k + 1);
    }

    for (row, &pivot_col) in reduction.pivot_columns().iter().enumerate().rev() {
        vectors[0][pivot_col] = reduction.at(row, last).clone();

        for col in pivot_col + 1..last {
            let coefficient = reduction.at(row, col);
            if coefficient.is_zero() {
                continue;
            }

            match slot_of_free.get(&col) {
                // The free variable only has weight in its own direction
                Some(&slot) => {
                    vectors[slot][pivot_col] =
                        vectors[slot][pivot_col].clone() - coefficient.clone();
                }
                None => {
                    for vector in vectors.iter_mut() {
                        vector[pivot_col] = vector[pivot_col].clone()
                            - coefficient.clone() * vector[col].clone();
                    }
                }
            }
        }
    }

    debug!(unknowns = last, free = free_columns.len(), "system solved");

    let mut vectors = vectors.into_iter();
    SolutionSet::Parametric(ParametricSolution {
        particular: vectors.next().unwrap_or_default(),
        directions: vectors.collect(),
        free_columns,
    })
}

fn fmt_vector<T: Display>(vector: &[T]) -> String {
    format!("[{}]", vector.iter().join(", "))
}

impl<T: Scalar> Display for ParametricSolution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", fmt_vector(&self.particular))?;
        for (col, direction) in self.free_columns.iter().zip(&self.directions) {
            write!(f, " + x{} * {}", col + 1, fmt_vector(direction))?;
        }
        Ok(())
    }
}

impl<T: Scalar> Display for SolutionSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionSet::NoSolution => write!(f, "no solution"),
            SolutionSet::Parametric(solution) => Display::fmt(solution, f),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
