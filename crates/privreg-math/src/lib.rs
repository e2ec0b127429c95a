//! Secret-shared linear algebra over [`privreg_circuit`] wires.
//!
//! Containers carry public dimensions and opaque wires; every shape check
//! happens against public metadata before any gate is issued. Operations
//! are written to minimize interactive depth: independent multiplications
//! and inner products land in the same network round.

pub mod cholesky;
mod error;
pub mod hessian;
mod matrix;
mod vector;

pub use cholesky::{factor, solve, CholeskyFactor};
pub use error::{Error, Result};
pub use matrix::SecretMatrix;
pub use vector::SecretVector;
