//! Insecure plaintext evaluation, for tests and local experiments.

use itertools::zip_eq;
use rand::{CryptoRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::circuit::{Circuit, Gate, Wire};
use crate::engine::{Engine, Execution, InputTape};
use crate::error::Error;

/// A dummy provider that evaluates circuits directly on `f64`s.
///
/// It simulates all parties in one process: the caller supplies a merged
/// input tape and the engine plays the joint randomness itself. Round
/// accounting matches what a real provider would incur, so latency-shape
/// tests run against this engine are meaningful. Nothing about it is
/// secure.
#[derive(Debug)]
pub struct ClearEngine<R> {
    rng: R,
    parties: usize,
}

impl ClearEngine<ChaCha20Rng> {
    /// A deterministic engine for reproducible tests.
    pub fn seeded(parties: usize, seed: u64) -> Self {
        Self::new(parties, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore + CryptoRng> ClearEngine<R> {
    /// Wrap an RNG as the joint randomness source.
    pub fn new(parties: usize, rng: R) -> Self {
        Self { rng, parties }
    }
}

impl<R: RngCore + CryptoRng> Engine for ClearEngine<R> {
    type Error = Error;

    fn party_id(&self) -> usize {
        0
    }

    fn num_parties(&self) -> usize {
        self.parties
    }

    fn execute(
        &mut self,
        circuit: &Circuit,
        inputs: &InputTape,
    ) -> Result<Execution, Self::Error> {
        let mut values = vec![0.0f64; circuit.len()];
        let mut outputs = Vec::with_capacity(circuit.output_count());

        for (index, gate) in circuit.gates().iter().enumerate() {
            let value = match gate {
                Gate::Input { .. } => inputs
                    .get(Wire(index as u32))
                    .ok_or(Error::UnboundInput(index))?,
                Gate::Const(c) => *c,
                Gate::Add(a, b) => values[a.index()] + values[b.index()],
                Gate::Sub(a, b) => values[a.index()] - values[b.index()],
                Gate::Scale(s, w) => s * values[w.index()],
                Gate::Offset(s, w) => s + values[w.index()],
                Gate::Mul(a, b) => values[a.index()] * values[b.index()],
                Gate::InnerProduct(a, b) => zip_eq(a, b)
                    .map(|(x, y)| values[x.index()] * values[y.index()])
                    .sum(),
                Gate::Sqrt(w) => {
                    let x = values[w.index()];
                    if x < 0.0 {
                        return Err(Error::NegativeSqrtArgument(index));
                    }
                    x.sqrt()
                }
                Gate::Recip(w) => {
                    let x = values[w.index()];
                    // a vanishing operand means a numerically singular
                    // system; fail loudly rather than emit huge values
                    if x.abs() < f64::EPSILON {
                        return Err(Error::ReciprocalOfZero(index));
                    }
                    1.0 / x
                }
                Gate::Exp(w) => values[w.index()].exp(),
                Gate::Rand => self.rng.gen::<f64>(),
                Gate::Reveal(w) => {
                    let x = values[w.index()];
                    outputs.push(x);
                    x
                }
            };
            values[index] = value;
        }

        Ok(Execution {
            outputs,
            rounds: circuit.rounds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CircuitBuilder;

    fn engine() -> ClearEngine<ChaCha20Rng> {
        ClearEngine::seeded(2, 7)
    }

    #[test]
    fn evaluates_arithmetic() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let y = b.input(1);
        let s = b.add(x, y);
        let p = b.mul(s, y);
        let q = b.scale(0.5, p);
        let r = b.offset(1.0, q);
        b.reveal(r);
        let circuit = b.finish();

        let mut tape = InputTape::new();
        tape.bind(x, 3.0);
        tape.bind(y, 4.0);

        let run = engine().execute(&circuit, &tape).unwrap();
        assert_eq!(run.outputs, vec![(3.0 + 4.0) * 4.0 * 0.5 + 1.0]);
    }

    #[test]
    fn evaluates_inner_product_sqrt_recip_exp() {
        let mut b = CircuitBuilder::new();
        let xs: Vec<_> = (0..3).map(|_| b.input(0)).collect();
        let ip = b.inner_product(&xs, &xs).unwrap();
        let root = b.sqrt(ip);
        let inv = b.recip(root);
        let e = b.exp(inv);
        b.reveal(root);
        b.reveal(e);
        let circuit = b.finish();

        let mut tape = InputTape::new();
        tape.bind_all(&xs, &[1.0, 2.0, 2.0]).unwrap();

        let run = engine().execute(&circuit, &tape).unwrap();
        assert!((run.outputs[0] - 3.0).abs() < 1e-12);
        assert!((run.outputs[1] - (1.0f64 / 3.0).exp()).abs() < 1e-12);
    }

    #[test]
    fn missing_input_is_terminal() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        b.reveal(x);
        let circuit = b.finish();
        let err = engine().execute(&circuit, &InputTape::new()).unwrap_err();
        assert_eq!(err, Error::UnboundInput(0));
    }

    #[test]
    fn negative_sqrt_is_terminal() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let root = b.sqrt(x);
        b.reveal(root);
        let circuit = b.finish();
        let mut tape = InputTape::new();
        tape.bind(x, -1.0);
        let err = engine().execute(&circuit, &tape).unwrap_err();
        assert!(matches!(err, Error::NegativeSqrtArgument(_)));
    }

    #[test]
    fn zero_reciprocal_is_terminal() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let inv = b.recip(x);
        b.reveal(inv);
        let circuit = b.finish();
        let mut tape = InputTape::new();
        tape.bind(x, 0.0);
        let err = engine().execute(&circuit, &tape).unwrap_err();
        assert!(matches!(err, Error::ReciprocalOfZero(_)));
    }

    #[test]
    fn near_zero_reciprocal_is_terminal() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let inv = b.recip(x);
        b.reveal(inv);
        let circuit = b.finish();
        let mut tape = InputTape::new();
        tape.bind(x, 1e-18);
        let err = engine().execute(&circuit, &tape).unwrap_err();
        assert!(matches!(err, Error::ReciprocalOfZero(_)));
    }

    #[test]
    fn rand_draws_land_in_unit_interval() {
        let mut b = CircuitBuilder::new();
        let draws: Vec<_> = (0..100).map(|_| b.rand()).collect();
        for &d in &draws {
            b.reveal(d);
        }
        let circuit = b.finish();
        assert_eq!(circuit.rounds(), 2); // one batch of draws, one of reveals
        let run = engine().execute(&circuit, &InputTape::new()).unwrap();
        assert!(run.outputs.iter().all(|&u| (0.0..1.0).contains(&u)));
    }

    #[test]
    fn reveal_order_is_preserved() {
        let mut b = CircuitBuilder::new();
        let x = b.input(0);
        let y = b.input(0);
        assert_eq!(b.reveal(y), 0);
        assert_eq!(b.reveal(x), 1);
        let circuit = b.finish();
        let mut tape = InputTape::new();
        tape.bind(x, 1.0);
        tape.bind(y, 2.0);
        let run = engine().execute(&circuit, &tape).unwrap();
        assert_eq!(run.outputs, vec![2.0, 1.0]);
    }
}
