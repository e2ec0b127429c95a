//! Plaintext-side utilities for the privreg library.
//!
//! Nothing here touches secret values: these helpers exist for tests,
//! benches and examples: summary statistics, a reference dataset, and a
//! plaintext twin of the fitting arithmetic to compare protocol output
//! against.

pub mod mtcars;
pub mod reference;
pub mod stats;
