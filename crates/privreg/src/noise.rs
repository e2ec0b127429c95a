//! Jointly sampled differential-privacy noise.
//!
//! The perturbation vector follows Chaudhuri and Monteleoni: a direction
//! drawn uniformly on the unit sphere, scaled by a Gamma-distributed
//! magnitude with shape equal to the model dimension and scale
//! `2 / (n·ε·λ)`, where `n` is the total number of observations. Each
//! party contributes one independent draw and the fit uses their secret
//! sum, so the noise a single party knows about its own contribution never
//! reveals the aggregate.

use privreg_circuit::CircuitBuilder;
use privreg_math::SecretVector;

use crate::error::Result;
use crate::sample;

/// Public parameters of the noise distribution. All fields are protocol
/// metadata; nothing here is secret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseModel {
    epsilon: f64,
    lambda: f64,
    features: usize,
    observations: usize,
    parties: usize,
}

impl NoiseModel {
    /// Describe the noise for a fit over `observations` pooled rows of
    /// `features` columns, shared among `parties` data holders.
    pub fn new(
        epsilon: f64,
        lambda: f64,
        features: usize,
        observations: usize,
        parties: usize,
    ) -> Self {
        Self {
            epsilon,
            lambda,
            features,
            observations,
            parties,
        }
    }

    /// The Gamma scale `2 / (n·ε·λ)`.
    pub fn scale(&self) -> f64 {
        2.0 / (self.observations as f64 * self.epsilon * self.lambda)
    }

    /// One spherically symmetric draw: `features` jointly sampled normals
    /// normalized to unit length, times a Gamma magnitude.
    fn draw(&self, b: &mut CircuitBuilder) -> Result<SecretVector> {
        let direction = SecretVector::from_wires(
            (0..self.features).map(|_| sample::normal(b)).collect(),
        );
        let squared = direction.inner(b, &direction)?;
        let norm = b.sqrt(squared);
        let inv_norm = b.recip(norm);
        let magnitude = sample::gamma(b, self.features, self.scale());
        // fold the scaling into one factor so every element costs one mul
        let factor = b.mul(inv_norm, magnitude);
        let wires = direction
            .wires()
            .iter()
            .map(|&w| b.mul(w, factor))
            .collect();
        Ok(SecretVector::from_wires(wires))
    }

    /// The secret sum of one draw per party.
    ///
    /// Only issues sampling and arithmetic gates; nothing is revealed
    /// here. Opening the perturbed coefficients is the caller's decision.
    pub fn generate(&self, b: &mut CircuitBuilder) -> Result<SecretVector> {
        tracing::debug!(
            epsilon = self.epsilon,
            lambda = self.lambda,
            features = self.features,
            observations = self.observations,
            parties = self.parties,
            gamma_scale = self.scale(),
            "sampling joint perturbation"
        );
        let mut total = self.draw(b)?;
        for _ in 1..self.parties {
            let next = self.draw(b)?;
            total = total.add(b, &next)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privreg_circuit::{ClearEngine, Engine, Gate, InputTape};

    fn mean_norm(epsilon: f64, runs: u64) -> f64 {
        let model = NoiseModel::new(epsilon, 1.0, 3, 32, 2);
        let mut b = CircuitBuilder::new();
        let noise = model.generate(&mut b).unwrap();
        noise.reveal(&mut b);
        let circuit = b.finish();

        let tape = InputTape::new();
        let mut total = 0.0;
        for seed in 0..runs {
            let run = ClearEngine::seeded(2, seed).execute(&circuit, &tape).unwrap();
            total += run.outputs.iter().map(|v| v * v).sum::<f64>().sqrt();
        }
        total / runs as f64
    }

    #[test]
    fn tighter_budgets_mean_larger_noise() {
        let norms: Vec<f64> = [1.0, 10.0, 100.0, 1000.0]
            .iter()
            .map(|&eps| mean_norm(eps, 200))
            .collect();
        for pair in norms.windows(2) {
            assert!(
                pair[0] > pair[1],
                "norm did not shrink as epsilon grew: {norms:?}"
            );
        }
    }

    #[test]
    fn expected_magnitude_tracks_the_gamma_mean() {
        // E‖noise per party‖ = shape · scale for a Gamma magnitude on a
        // unit direction; two parties double it.
        let model = NoiseModel::new(10.0, 1.0, 3, 32, 2);
        let expected = 2.0 * 3.0 * model.scale();
        let got = mean_norm(10.0, 2000);
        // the sum of two independent draws concentrates below the sum of
        // magnitudes only slightly; a loose band is enough here
        assert!(
            got > 0.5 * expected && got < 1.5 * expected,
            "mean norm {got} not near {expected}"
        );
    }

    #[test]
    fn generate_never_reveals() {
        let model = NoiseModel::new(1.0, 0.5, 4, 100, 3);
        let mut b = CircuitBuilder::new();
        model.generate(&mut b).unwrap();
        let circuit = b.finish();
        assert!(circuit
            .gates()
            .iter()
            .all(|g| !matches!(g, Gate::Reveal(_))));
        assert_eq!(circuit.output_count(), 0);
    }

    #[test]
    fn draw_count_scales_with_parties() {
        let rand_gates = |parties: usize| {
            let model = NoiseModel::new(1.0, 1.0, 2, 10, parties);
            let mut b = CircuitBuilder::new();
            model.generate(&mut b).unwrap();
            b.finish()
                .gates()
                .iter()
                .filter(|g| matches!(g, Gate::Rand))
                .count()
        };
        assert_eq!(rand_gates(3), 3 * rand_gates(1));
    }
}
