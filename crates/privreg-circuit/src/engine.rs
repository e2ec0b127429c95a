//! The boundary between circuits and the secret arithmetic provider.

use std::collections::BTreeMap;

use crate::circuit::{Circuit, Wire};
use crate::error::{Error, Result};

/// Plaintext bindings for the input gates a party owns.
///
/// Each party binds values only for its own slots; the joint-input protocol
/// supplies the rest. A trusted single-process harness may [`merge`]
/// several parties' tapes to drive an insecure local engine.
///
/// [`merge`]: InputTape::merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTape {
    values: BTreeMap<u32, f64>,
}

impl InputTape {
    /// An empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a plaintext value to an input wire.
    pub fn bind(&mut self, wire: Wire, value: f64) {
        self.values.insert(wire.0, value);
    }

    /// Bind a slice of values to a slice of wires, pairwise.
    pub fn bind_all(&mut self, wires: &[Wire], values: &[f64]) -> Result<()> {
        if wires.len() != values.len() {
            return Err(Error::DimensionMismatch {
                left: wires.len(),
                right: values.len(),
            });
        }
        for (&wire, &value) in wires.iter().zip(values) {
            self.bind(wire, value);
        }
        Ok(())
    }

    /// Look up the binding for a wire.
    pub fn get(&self, wire: Wire) -> Option<f64> {
        self.values.get(&wire.0).copied()
    }

    /// Absorb another party's bindings. Test-harness use only: in a real
    /// deployment no process ever holds more than one party's plaintext.
    pub fn merge(&mut self, other: InputTape) {
        self.values.extend(other.values);
    }

    /// Number of bound wires.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the tape holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The outcome of one protocol run.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Revealed values, in reveal order.
    pub outputs: Vec<f64>,
    /// Network rounds the run consumed.
    pub rounds: usize,
}

/// A secret arithmetic provider session.
///
/// Implementations own every shared resource of a run: the network session,
/// preprocessing material, and the joint randomness behind `Rand` gates.
/// One fitting run owns its engine exclusively for its whole duration; any
/// failure mid-circuit is terminal for all parties, so `execute` either
/// completes the whole circuit or returns an error with nothing to resume.
pub trait Engine {
    /// Terminal failure of a run.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Zero-based slot of this party.
    fn party_id(&self) -> usize;

    /// Number of participating parties.
    fn num_parties(&self) -> usize;

    /// Evaluate a circuit to completion.
    fn execute(
        &mut self,
        circuit: &Circuit,
        inputs: &InputTape,
    ) -> std::result::Result<Execution, Self::Error>;
}
