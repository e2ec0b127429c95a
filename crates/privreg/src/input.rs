//! Per-party data contributions and their assembly into one joint design.
//!
//! Every party builds the identical circuit over the identical sequence of
//! slots, so input gates line up wire for wire across all processes. A
//! party binds plaintext only for the slot it owns; the other slots stay
//! placeholders whose values arrive through the engine's input protocol.

use ndarray::{Array1, Array2};
use privreg_circuit::{CircuitBuilder, InputTape};
use privreg_math::{SecretMatrix, SecretVector};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// One party's local rows: a design matrix and the matching 0/1 outcome
/// labels. The plaintext is wiped on drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    design: Array2<f64>,
    labels: Array1<f64>,
}

impl Contribution {
    /// Wrap local data. The label vector must have one entry per design
    /// row, and every label must be exactly `0.0` or `1.0`.
    pub fn new(design: Array2<f64>, labels: Array1<f64>) -> Result<Self> {
        if design.nrows() != labels.len() {
            return Err(Error::DimensionMismatch {
                left: design.nrows(),
                right: labels.len(),
            });
        }
        if let Some(bad) = labels.iter().find(|&&y| y != 0.0 && y != 1.0) {
            return Err(Error::InvalidConfig(format!(
                "labels must be 0 or 1, found {bad}"
            )));
        }
        Ok(Self { design, labels })
    }

    /// Local row count.
    pub fn rows(&self) -> usize {
        self.design.nrows()
    }

    /// Local feature count, including any intercept column.
    pub fn features(&self) -> usize {
        self.design.ncols()
    }

    /// The design matrix.
    pub fn design(&self) -> &Array2<f64> {
        &self.design
    }

    /// The outcome labels.
    pub fn labels(&self) -> &Array1<f64> {
        &self.labels
    }
}

impl Drop for Contribution {
    fn drop(&mut self) {
        if let Some(slice) = self.design.as_slice_mut() {
            slice.zeroize();
        }
        if let Some(slice) = self.labels.as_slice_mut() {
            slice.zeroize();
        }
    }
}

/// One position in the agreed party ordering.
///
/// The circuit depends only on the public shape of every slot, so a party
/// describes its peers by row and feature counts alone.
#[derive(Debug)]
pub enum Slot {
    /// This process holds the plaintext for the slot.
    Owned(Contribution),
    /// Another process holds the plaintext; only the shape is known here.
    Placeholder {
        /// Declared row count.
        rows: usize,
        /// Declared feature count.
        features: usize,
    },
}

impl Slot {
    /// Declared row count.
    pub fn rows(&self) -> usize {
        match self {
            Slot::Owned(c) => c.rows(),
            Slot::Placeholder { rows, .. } => *rows,
        }
    }

    /// Declared feature count.
    pub fn features(&self) -> usize {
        match self {
            Slot::Owned(c) => c.features(),
            Slot::Placeholder { features, .. } => *features,
        }
    }
}

/// The joint input gates over every slot, pooled into one system.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedInput {
    /// Per-slot design matrices, in slot order.
    pub matrices: Vec<SecretMatrix>,
    /// Per-slot label vectors, in slot order.
    pub labels: Vec<SecretVector>,
    /// All design rows stacked in slot order.
    pub design: SecretMatrix,
    /// All labels concatenated in slot order.
    pub outcomes: SecretVector,
}

impl CombinedInput {
    /// Pooled row count.
    pub fn observations(&self) -> usize {
        self.design.rows()
    }

    /// Shared feature count.
    pub fn features(&self) -> usize {
        self.design.cols()
    }
}

/// Issue the joint input gates for every slot and bind the plaintext of
/// each owned slot onto `tape`.
///
/// Slot index doubles as the zero-based party id. At least one slot with
/// at least one feature column is required, and every slot must declare
/// the feature count of the first one; rows may differ freely. All checks
/// run before any gate is issued.
pub fn combine(
    b: &mut CircuitBuilder,
    slots: &[Slot],
    tape: &mut InputTape,
) -> Result<CombinedInput> {
    let expected = match slots.first() {
        Some(slot) => slot.features(),
        None => {
            return Err(Error::InvalidConfig(
                "at least one party slot is required".into(),
            ));
        }
    };
    if expected == 0 {
        return Err(Error::InvalidConfig(
            "at least one feature column is required".into(),
        ));
    }
    for (index, slot) in slots.iter().enumerate() {
        if slot.features() != expected {
            return Err(Error::ShapeMismatch {
                slot: index,
                expected,
                found: slot.features(),
            });
        }
    }

    let mut matrices = Vec::with_capacity(slots.len());
    let mut labels = Vec::with_capacity(slots.len());
    for (party, slot) in slots.iter().enumerate() {
        let x = SecretMatrix::input(b, party, slot.rows(), slot.features());
        let y = SecretVector::input(b, party, slot.rows());
        if let Slot::Owned(contribution) = slot {
            for (r, row) in contribution.design().rows().into_iter().enumerate() {
                for (c, &value) in row.iter().enumerate() {
                    tape.bind(x.wire(r, c), value);
                }
            }
            for (r, &value) in contribution.labels().iter().enumerate() {
                tape.bind(y.wire(r), value);
            }
        }
        matrices.push(x);
        labels.push(y);
    }

    let design = SecretMatrix::vstack(&matrices)?;
    let outcomes = SecretVector::concat(&labels);
    Ok(CombinedInput {
        matrices,
        labels,
        design,
        outcomes,
    })
}
