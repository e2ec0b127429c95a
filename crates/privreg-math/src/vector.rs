//! Vectors of secret values with public length.

use privreg_circuit::{CircuitBuilder, Wire};

use crate::error::{Error, Result};

/// A linear container of secret reals. The length is public metadata,
/// agreed by all parties before any protocol round.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretVector {
    wires: Vec<Wire>,
}

impl SecretVector {
    /// Wrap existing wires.
    pub fn from_wires(wires: Vec<Wire>) -> Self {
        Self { wires }
    }

    /// Issue one joint-input gate per element, owned by `party`.
    pub fn input(b: &mut CircuitBuilder, party: usize, len: usize) -> Self {
        Self {
            wires: (0..len).map(|_| b.input(party)).collect(),
        }
    }

    /// A vector of public zeros.
    pub fn zeros(b: &mut CircuitBuilder, len: usize) -> Self {
        Self {
            wires: (0..len).map(|_| b.constant(0.0)).collect(),
        }
    }

    /// The underlying wires.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Element wire at `index`.
    pub fn wire(&self, index: usize) -> Wire {
        self.wires[index]
    }

    /// Public length.
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Whether the vector is empty.
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    fn check_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::DimensionMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    /// Element-wise sum. Free.
    pub fn add(&self, b: &mut CircuitBuilder, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(Self {
            wires: self
                .wires
                .iter()
                .zip(&other.wires)
                .map(|(&x, &y)| b.add(x, y))
                .collect(),
        })
    }

    /// Element-wise difference. Free.
    pub fn sub(&self, b: &mut CircuitBuilder, other: &Self) -> Result<Self> {
        self.check_len(other)?;
        Ok(Self {
            wires: self
                .wires
                .iter()
                .zip(&other.wires)
                .map(|(&x, &y)| b.sub(x, y))
                .collect(),
        })
    }

    /// Multiply every element by a public scalar. Free.
    pub fn scale(&self, b: &mut CircuitBuilder, scalar: f64) -> Self {
        Self {
            wires: self.wires.iter().map(|&x| b.scale(scalar, x)).collect(),
        }
    }

    /// Inner product with another vector. One round.
    pub fn inner(&self, b: &mut CircuitBuilder, other: &Self) -> Result<Wire> {
        self.check_len(other)?;
        Ok(b.inner_product(&self.wires, &other.wires)?)
    }

    /// Concatenate several vectors in order.
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a SecretVector>) -> Self {
        Self {
            wires: parts
                .into_iter()
                .flat_map(|part| part.wires.iter().copied())
                .collect(),
        }
    }

    /// Reveal every element, in order.
    pub fn reveal(&self, b: &mut CircuitBuilder) {
        for &wire in &self.wires {
            b.reveal(wire);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privreg_circuit::{ClearEngine, Engine, InputTape};

    #[test]
    fn elementwise_ops_are_free_and_correct() {
        let mut b = CircuitBuilder::new();
        let x = SecretVector::input(&mut b, 0, 3);
        let y = SecretVector::input(&mut b, 1, 3);
        let s = x.add(&mut b, &y).unwrap();
        let d = s.sub(&mut b, &y).unwrap();
        let h = d.scale(&mut b, 0.5);
        h.reveal(&mut b);
        let circuit = b.finish();
        // inputs and reveals interact; the arithmetic itself adds no rounds
        assert_eq!(circuit.rounds(), 2);

        let mut tape = InputTape::new();
        tape.bind_all(x.wires(), &[1.0, 2.0, 3.0]).unwrap();
        tape.bind_all(y.wires(), &[4.0, 5.0, 6.0]).unwrap();
        let run = ClearEngine::seeded(2, 1).execute(&circuit, &tape).unwrap();
        assert_eq!(run.outputs, vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn mismatched_lengths_fail_before_any_gate() {
        let mut b = CircuitBuilder::new();
        let x = SecretVector::input(&mut b, 0, 3);
        let y = SecretVector::input(&mut b, 0, 2);
        let issued = b.len();
        assert!(matches!(
            x.add(&mut b, &y),
            Err(Error::DimensionMismatch { left: 3, right: 2 })
        ));
        assert!(x.inner(&mut b, &y).is_err());
        assert_eq!(b.len(), issued);
    }

    #[test]
    fn concat_preserves_order() {
        let mut b = CircuitBuilder::new();
        let x = SecretVector::input(&mut b, 0, 2);
        let y = SecretVector::input(&mut b, 1, 1);
        let joined = SecretVector::concat([&x, &y]);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined.wire(0), x.wire(0));
        assert_eq!(joined.wire(2), y.wire(0));
    }
}
