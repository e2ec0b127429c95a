//! Privacy-preserving federated logistic regression.
//!
//! Two or more data holders jointly fit a ridge-penalized logistic model
//! without revealing their rows to each other or to anyone else; the only
//! value ever opened is the final coefficient vector, optionally perturbed
//! for differential privacy.
//!
//! The fit is expressed as a fixed-shape circuit over the opaque secret
//! reals of [`privreg_circuit`]: a Newton-type iteration against Böhning's
//! global quadratic bound, with the linear system solved by a Cholesky
//! factorization computed once per fit. The circuit shape depends only on
//! public metadata (matrix dimensions, party count, iteration count,
//! whether a privacy budget is set), never on any data value, so every
//! party runs the identical round sequence and no timing or shape
//! side-channel exists. That is also why the iteration count is a fixed
//! configuration value rather than a convergence test.
//!
//! ```
//! use privreg::{fit, Contribution, FitConfig, Slot};
//! use privreg_circuit::ClearEngine;
//! use privreg_util::mtcars;
//!
//! let [(x1, y1), (x2, y2)] = mtcars::two_party_split();
//! let slots = vec![
//!     Slot::Owned(Contribution::new(x1, y1).unwrap()),
//!     Slot::Owned(Contribution::new(x2, y2).unwrap()),
//! ];
//! let mut engine = ClearEngine::seeded(2, 42);
//! let beta = fit(&mut engine, &FitConfig::new(1.0, 5), &slots).unwrap();
//! assert_eq!(beta.len(), 3); // hp, wt, intercept
//! ```

mod error;
mod fit;
mod input;
pub mod likelihood;
pub mod noise;
pub mod sample;

pub use error::{Error, Result};
pub use fit::{fit, FitConfig, LogisticRegression, NoiseInjection, PrivacyBudget};
pub use input::{combine, CombinedInput, Contribution, Slot};
