//! Secret-value circuits for jointly computed real arithmetic.
//!
//! A [`Circuit`] is the unit of work handed to a secret arithmetic provider:
//! a list of gates over opaque [`Wire`] handles, scheduled into a sequence of
//! parallel batches. Interactive gates (multiplication, square root,
//! reciprocal, exponential, joint input, joint sampling, reveal) cost one
//! network round each; independent interactive gates share a round. Local
//! gates (addition, public-scalar arithmetic) are free.
//!
//! Because a circuit is built from public metadata only (shapes, party
//! count, iteration counts), every participant derives a structurally
//! identical batch sequence, which is what keeps the underlying sharing
//! protocol in lock-step. [`Circuit`] implements `PartialEq` so that this
//! invariant can be asserted in tests.
//!
//! The [`Engine`] trait is the provider boundary. [`ClearEngine`] is an
//! insecure single-process evaluator: it computes on plaintext `f64`s and is
//! meant for unit tests and local experiments, never for deployment.

mod builder;
mod circuit;
mod clear;
mod engine;
mod error;

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, Gate, Wire};
pub use clear::ClearEngine;
pub use engine::{Engine, Execution, InputTape};
pub use error::{Error, Result};
