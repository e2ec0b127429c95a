//! Error types for the fitting protocol.

use thiserror::Error;

/// The errors that can arise while configuring, assembling or running a
/// fit. Every failure is terminal: there is no retry and no partially
/// completed fit to resume.
#[derive(Debug, Error)]
pub enum Error {
    /// Two vectors whose public lengths must agree do not. Detected
    /// before any gate is issued.
    #[error("mismatched lengths: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },

    /// A party slot declares a feature count different from the others.
    #[error("party slot {slot} declares {found} features, expected {expected}")]
    ShapeMismatch {
        /// Offending slot index.
        slot: usize,
        /// Feature count declared by the first slot.
        expected: usize,
        /// Feature count declared by the offending slot.
        found: usize,
    },

    /// The fit configuration is unusable as declared.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A linear-algebra failure while assembling the circuit.
    #[error(transparent)]
    Math(#[from] privreg_math::Error),

    /// A circuit-level failure while issuing gates.
    #[error(transparent)]
    Circuit(#[from] privreg_circuit::Error),

    /// The engine could not complete the run: a peer crashed, a round
    /// timed out, or an evaluation hit a singular system. Fatal for every
    /// party.
    #[error("protocol run failed")]
    Protocol(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience alias for fitting results.
pub type Result<T> = std::result::Result<T, Error>;
