use thiserror::Error;

/// Errors raised while building matrices or combining them with vectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("matrix must have at least one row")]
    NoRows,

    #[error("matrix must have at least one column")]
    NoColumns,

    #[error("row {row} has {actual} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("column {index} is out of bounds for a matrix with {columns} columns")]
    ColumnOutOfBounds { index: usize, columns: usize },

    #[error("denominator cannot be zero")]
    ZeroDenominator,

    #[error("invalid fraction literal: {input:?}")]
    InvalidFraction { input: String },

    #[error(transparent)]
    ParseDecimal(#[from] ParseDecimalError),
}

/// Errors raised while reading a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("empty decimal literal")]
    Empty,

    #[error("invalid decimal literal: {input:?}")]
    Invalid { input: String },

    #[error("cannot represent a non-finite float as a decimal")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, MatrixError>;
