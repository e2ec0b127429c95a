//! Error types for secret linear algebra.

use thiserror::Error;

/// The errors that can arise while assembling linear-algebra circuits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two containers that must agree in length do not.
    #[error("mismatched lengths: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// Matrices stacked together disagree on column count.
    #[error("mismatched shapes: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    ShapeMismatch {
        /// Rows of the left operand.
        left_rows: usize,
        /// Columns of the left operand.
        left_cols: usize,
        /// Rows of the right operand.
        right_rows: usize,
        /// Columns of the right operand.
        right_cols: usize,
    },

    /// An operation that needs a square matrix received a rectangular one.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Rows of the offending matrix.
        rows: usize,
        /// Columns of the offending matrix.
        cols: usize,
    },

    /// A circuit-level failure while issuing gates.
    #[error(transparent)]
    Circuit(#[from] privreg_circuit::Error),
}

/// Convenience alias for linear-algebra results.
pub type Result<T> = std::result::Result<T, Error>;
