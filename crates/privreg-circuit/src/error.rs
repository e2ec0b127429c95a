//! Error types for circuit construction and evaluation.

use thiserror::Error;

/// The errors that can arise while building or evaluating a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two vectors that must agree in length do not.
    #[error("mismatched lengths: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// An input gate was evaluated without a bound plaintext value.
    #[error("input gate {0} has no bound value")]
    UnboundInput(usize),

    /// A square root was requested on a negative value. For the fitting
    /// protocol this is the singular-system failure: a pivot of the
    /// factored matrix was not positive.
    #[error("square root of negative value at gate {0}")]
    NegativeSqrtArgument(usize),

    /// A reciprocal was requested on zero or a value too small to
    /// distinguish from it.
    #[error("reciprocal of a vanishing value at gate {0}")]
    ReciprocalOfZero(usize),
}

/// Convenience alias for circuit results.
pub type Result<T> = std::result::Result<T, Error>;
