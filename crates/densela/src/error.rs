use thiserror::Error;

use crate::element::ElementKind;

/// Failure conditions reported by matrix and vector operations.
///
/// Element-level arithmetic (overflow, division by zero) is never reported
/// here; it follows the native semantics of the element type.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("matrices must be of same dimension: {left:?} vs {right:?}")]
    DifferentDimension {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrices of dimensions {left:?} and {right:?} cannot be multiplied in this order")]
    MultiplicationValidity {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix should be square but has {rows} rows and {cols} columns")]
    NonSquare { rows: usize, cols: usize },

    #[error("no inverse exists for this matrix")]
    NoInverse,

    #[error("float element type required, found {0}")]
    NotFloat(ElementKind),

    #[error("row or column number {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("matrix has no rows")]
    ZeroLength,

    #[error("unexpected error occurred: {0}")]
    Unexpected(String),

    #[error("row {row} has {found} entries, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    Shape { rows: usize, cols: usize, len: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, MatrixError>;
