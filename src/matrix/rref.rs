use crate::matrix::matrix::Matrix;
use crate::rings::scalar::Scalar;
use tracing::{debug, trace};

/// Output of [`reduce`]: the reduced row-echelon form of a matrix together
/// with its pivot and free columns.
#[derive(Debug, Clone)]
pub struct Reduction<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
    pivots: Vec<usize>,
    free: Vec<usize>,
}

impl<T: Scalar> Reduction<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline(always)]
    pub fn at(&self, row: usize, col: usize) -> &T {
        &self.cells[row * self.cols + col]
    }

    /// Pivot column of each non-zero row, top to bottom.
    pub fn pivot_columns(&self) -> &[usize] {
        &self.pivots
    }

    pub fn free_columns(&self) -> &[usize] {
        &self.free
    }

    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// True when some row reduced to `0 = nonzero`.
    pub fn is_inconsistent(&self) -> bool {
        self.pivots.last() == Some(&(self.cols - 1))
    }
}

/// Gauss-Jordan elimination.
///
/// The last column is treated as the constant column of an augmented system:
/// it can hold a pivot but is never reported as free.
pub fn reduce<T: Scalar>(matrix: &Matrix<T>) -> Reduction<T> {
    let rows = matrix.rows();
    let cols = matrix.columns();
    let ctx = matrix.context();
    let mut cells = matrix.cells().to_vec();

    debug!(rows, cols, "reducing matrix");

    let mut pivots = Vec::with_capacity(rows.min(cols));
    let mut free = vec![];
    let mut top = 0;

    // Forward phase: row echelon form with unit pivots
    for col in 0..cols {
        let pivot_row = (top..rows).find(|&r| !cells[r * cols + col].is_zero());

        let pivot_row = match pivot_row {
            Some(r) => r,
            None => {
                if col + 1 < cols {
                    free.push(col);
                }
                continue;
            }
        };

        if pivot_row != top {
            for k in 0..cols {
                cells.swap(top * cols + k, pivot_row * cols + k);
            }
        }
        pivots.push(col);
        trace!(row = top, col, from_row = pivot_row, "pivot found");

        let pivot_val = cells[top * cols + col].clone();
        cells[top * cols + col] = T::one();
        for k in col + 1..cols {
            let idx = top * cols + k;
            cells[idx] = cells[idx].clone().divide(&pivot_val, ctx);
        }

        for r in top + 1..rows {
            let factor = cells[r * cols + col].clone();
            if factor.is_zero() {
                continue;
            }

            cells[r * cols + col] = T::zero();
            for k in col + 1..cols {
                let pivot_entry = cells[top * cols + k].clone();
                let idx = r * cols + k;
                cells[idx] = cells[idx].clone().eliminate(&pivot_entry, &factor, ctx);
            }
        }

        top += 1;
    }

    // Backward phase: clear entries above each pivot, the first pivot has nothing above it
    for p in (1..pivots.len()).rev() {
        let pivot_col = pivots[p];
        for r in (0..p).rev() {
            let factor = cells[r * cols + pivot_col].clone();
            if factor.is_zero() {
                continue;
            }

            cells[r * cols + pivot_col] = T::zero();
            for k in pivot_col + 1..cols {
                let pivot_entry = cells[p * cols + k].clone();
                let idx = r * cols + k;
                cells[idx] = cells[idx].clone().back_eliminate(&pivot_entry, &factor, ctx);
            }
        }
    }

    debug!(rank = pivots.len(), ?pivots, ?free, "matrix reduced");

    Reduction {
        rows,
        cols,
        cells,
        pivots,
        free,
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
