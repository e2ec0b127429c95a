//! Incremental circuit construction with automatic round scheduling.

use crate::circuit::{Circuit, Gate, Wire};
use crate::error::{Error, Result};

/// Builds a [`Circuit`] gate by gate.
///
/// Every interactive gate is assigned a round level of one past the deepest
/// level among its operands; local gates inherit the deepest operand level.
/// Gates whose levels coincide are independent by construction and resolve
/// in the same round (a parallel batch); a data dependency forces the next
/// round (a sequential step). The schedule is therefore a pure function of
/// the order in which gates are issued, never of any secret value.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    gates: Vec<Gate>,
    levels: Vec<u32>,
    outputs: Vec<u32>,
}

impl CircuitBuilder {
    /// Start an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of gates issued so far.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether no gates have been issued yet.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    fn push(&mut self, gate: Gate) -> Wire {
        let mut level = self.operand_level(&gate);
        if gate.is_interactive() {
            level += 1;
        }
        self.gates.push(gate);
        self.levels.push(level);
        Wire(self.gates.len() as u32 - 1)
    }

    fn operand_level(&self, gate: &Gate) -> u32 {
        let level = |w: &Wire| self.levels[w.index()];
        match gate {
            Gate::Input { .. } | Gate::Const(_) | Gate::Rand => 0,
            Gate::Add(a, b) | Gate::Sub(a, b) | Gate::Mul(a, b) => level(a).max(level(b)),
            Gate::Scale(_, w)
            | Gate::Offset(_, w)
            | Gate::Sqrt(w)
            | Gate::Recip(w)
            | Gate::Exp(w)
            | Gate::Reveal(w) => level(w),
            Gate::InnerProduct(a, b) => a.iter().chain(b).map(level).max().unwrap_or(0),
        }
    }

    /// Joint input owned by the given zero-based party slot.
    pub fn input(&mut self, party: usize) -> Wire {
        self.push(Gate::Input { party })
    }

    /// Public constant.
    pub fn constant(&mut self, value: f64) -> Wire {
        self.push(Gate::Const(value))
    }

    /// Secret addition. Free.
    pub fn add(&mut self, a: Wire, b: Wire) -> Wire {
        self.push(Gate::Add(a, b))
    }

    /// Secret subtraction. Free.
    pub fn sub(&mut self, a: Wire, b: Wire) -> Wire {
        self.push(Gate::Sub(a, b))
    }

    /// Multiplication by a public scalar. Free.
    pub fn scale(&mut self, scalar: f64, w: Wire) -> Wire {
        self.push(Gate::Scale(scalar, w))
    }

    /// Addition of a public scalar. Free.
    pub fn offset(&mut self, scalar: f64, w: Wire) -> Wire {
        self.push(Gate::Offset(scalar, w))
    }

    /// Secret multiplication. One round.
    pub fn mul(&mut self, a: Wire, b: Wire) -> Wire {
        self.push(Gate::Mul(a, b))
    }

    /// Inner product of two secret vectors. One round.
    ///
    /// Lengths are public metadata; a mismatch fails here, before any gate
    /// is issued and therefore before any interaction could take place.
    pub fn inner_product(&mut self, a: &[Wire], b: &[Wire]) -> Result<Wire> {
        if a.len() != b.len() {
            return Err(Error::DimensionMismatch {
                left: a.len(),
                right: b.len(),
            });
        }
        Ok(self.push(Gate::InnerProduct(a.to_vec(), b.to_vec())))
    }

    /// Secret square root. One round.
    pub fn sqrt(&mut self, w: Wire) -> Wire {
        self.push(Gate::Sqrt(w))
    }

    /// Secret reciprocal. One round.
    pub fn recip(&mut self, w: Wire) -> Wire {
        self.push(Gate::Recip(w))
    }

    /// Secret natural exponential. One round.
    pub fn exp(&mut self, w: Wire) -> Wire {
        self.push(Gate::Exp(w))
    }

    /// Jointly sampled uniform draw in `[0, 1)`. One round.
    pub fn rand(&mut self) -> Wire {
        self.push(Gate::Rand)
    }

    /// Open a secret value to every party. Returns the position of the
    /// value in [`crate::Execution::outputs`].
    pub fn reveal(&mut self, w: Wire) -> usize {
        let gate = self.push(Gate::Reveal(w));
        self.outputs.push(gate.0);
        self.outputs.len() - 1
    }

    /// Finish the circuit.
    pub fn finish(self) -> Circuit {
        Circuit {
            gates: self.gates,
            levels: self.levels,
            outputs: self.outputs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_muls_share_a_round() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let y = b.input(1);
        let p = b.mul(x, y);
        let q = b.mul(y, x);
        let c = b.finish();
        assert_eq!(c.level(p), c.level(q));
        assert_eq!(c.rounds(), 2); // inputs, then both products
    }

    #[test]
    fn dependent_muls_serialize() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let p = b.mul(x, x);
        let q = b.mul(p, x);
        let c = b.finish();
        assert_eq!(c.level(q), c.level(p) + 1);
    }

    #[test]
    fn local_gates_are_free() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let y = b.input(0);
        let s = b.add(x, y);
        let t = b.scale(2.0, s);
        let u = b.offset(-1.0, t);
        let c = b.finish();
        assert_eq!(c.rounds(), 1);
        assert_eq!(c.level(u), 1);
    }

    #[test]
    fn inner_product_rejects_unequal_lengths() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let y = b.input(0);
        let issued = b.len();
        let err = b.inner_product(&[x, y], &[x]).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { left: 2, right: 1 });
        // Nothing was issued: the failure precedes any interaction.
        assert_eq!(b.len(), issued);
    }

    #[test]
    fn identical_builds_compare_equal() {
        let build = || {
            let mut b = CircuitBuilder::new();
            let x = b.input(0);
            let y = b.input(1);
            let p = b.mul(x, y);
            b.reveal(p);
            b.finish()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn schedule_lists_interactive_gates_per_round() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let y = b.input(0);
        let p = b.mul(x, y);
        let _free = b.add(x, y);
        b.reveal(p);
        let c = b.finish();
        let schedule = c.schedule();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].len(), 2); // both inputs
        assert_eq!(schedule[1], vec![p.index()]);
        assert_eq!(schedule[2].len(), 1); // the reveal
    }
}
