//! The joint fitting protocol: configuration, circuit assembly, and the
//! one-call driver.

use privreg_circuit::{Circuit, CircuitBuilder, Engine, InputTape, Wire};
use privreg_math::{cholesky, hessian, SecretMatrix, SecretVector};

use crate::error::{Error, Result};
use crate::input::{combine, Slot};
use crate::likelihood;
use crate::noise::NoiseModel;

/// Where differential-privacy noise enters the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseInjection {
    /// Perturb the finished coefficients once, just before they are
    /// opened.
    #[default]
    OutputPerturbation,
    /// Perturb the gradient inside every iteration, leaving the opened
    /// coefficients themselves unaltered.
    ObjectivePerturbation,
}

/// A differential-privacy budget for the revealed coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrivacyBudget {
    /// The ε of ε-differential privacy. Smaller is stricter.
    pub epsilon: f64,
    /// Where the noise enters.
    pub injection: NoiseInjection,
}

impl PrivacyBudget {
    /// A budget with the default injection point.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            injection: NoiseInjection::default(),
        }
    }
}

/// Public parameters of a fit. Every party must run with an identical
/// configuration or the circuits will not match.
#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    /// Ridge penalty λ. Must be positive when a privacy budget is set;
    /// otherwise zero is accepted but leaves positive-definiteness to the
    /// data.
    pub lambda: f64,
    /// Fixed Newton-type iteration count. The count is public protocol
    /// metadata; a data-dependent stopping rule would leak through the
    /// round count.
    pub iterations: usize,
    /// Optional differential-privacy budget. `None` fits exactly.
    pub privacy: Option<PrivacyBudget>,
}

impl FitConfig {
    /// A non-private configuration.
    pub fn new(lambda: f64, iterations: usize) -> Self {
        Self {
            lambda,
            iterations,
            privacy: None,
        }
    }

    /// Attach a privacy budget.
    pub fn with_privacy(mut self, budget: PrivacyBudget) -> Self {
        self.privacy = Some(budget);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig(
                "at least one iteration is required".into(),
            ));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "lambda must be finite and non-negative, got {}",
                self.lambda
            )));
        }
        if let Some(budget) = &self.privacy {
            if !budget.epsilon.is_finite() || budget.epsilon <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "epsilon must be finite and positive, got {}",
                    budget.epsilon
                )));
            }
            if self.lambda == 0.0 {
                return Err(Error::InvalidConfig(
                    "a privacy budget requires a positive lambda".into(),
                ));
            }
        }
        Ok(())
    }
}

/// A validated model ready to assemble fitting circuits.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    config: FitConfig,
}

impl LogisticRegression {
    /// Validate the configuration.
    pub fn new(config: FitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this model was built with.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Issue the whole fit into `b`, binding owned plaintext onto `tape`,
    /// and return the final secret coefficients without revealing them.
    ///
    /// Böhning's bound makes the curvature coefficient-free, so the
    /// penalized system `λI + ¼XᵀX` is factored exactly once and every
    /// iteration reuses the cached factor for its solve.
    pub fn build(
        &self,
        b: &mut CircuitBuilder,
        slots: &[Slot],
        tape: &mut InputTape,
    ) -> Result<SecretVector> {
        let joint = combine(b, slots, tape)?;
        let d = joint.features();

        let h = hessian::bound(b, &joint.design)?;
        let mut rows: Vec<Vec<Wire>> = Vec::with_capacity(d);
        for r in 0..d {
            let mut row = Vec::with_capacity(d);
            for c in 0..d {
                let flipped = b.scale(-1.0, h.wire(r, c));
                row.push(if r == c {
                    b.offset(self.config.lambda, flipped)
                } else {
                    flipped
                });
            }
            rows.push(row);
        }
        let system = SecretMatrix::from_rows(rows)?;
        let factor = cholesky::factor(b, &system)?;

        let perturbation = match &self.config.privacy {
            Some(budget) => {
                let model = NoiseModel::new(
                    budget.epsilon,
                    self.config.lambda,
                    d,
                    joint.observations(),
                    slots.len(),
                );
                Some((budget.injection, model.generate(b)?))
            }
            None => None,
        };

        let mut beta = SecretVector::zeros(b, d);
        for iteration in 0..self.config.iterations {
            tracing::debug!(iteration, "issuing update step");
            let p = likelihood::probabilities(b, &joint.design, &beta)?;
            let mut g = likelihood::gradient(
                b,
                &joint.design,
                &joint.outcomes,
                &p,
                self.config.lambda,
                &beta,
            )?;
            if let Some((NoiseInjection::ObjectivePerturbation, noise)) = &perturbation {
                g = g.sub(b, noise)?;
            }
            let step = cholesky::solve(b, &factor, &g)?;
            beta = beta.add(b, &step)?;
        }

        if let Some((NoiseInjection::OutputPerturbation, noise)) = &perturbation {
            beta = beta.add(b, noise)?;
        }
        Ok(beta)
    }

    /// Assemble the complete application: the fit followed by a reveal of
    /// every coefficient. Returns the circuit alongside the tape holding
    /// this party's plaintext bindings.
    pub fn application(&self, slots: &[Slot]) -> Result<(Circuit, InputTape)> {
        let mut b = CircuitBuilder::new();
        let mut tape = InputTape::new();
        let beta = self.build(&mut b, slots, &mut tape)?;
        beta.reveal(&mut b);
        let circuit = b.finish();
        tracing::info!(
            gates = circuit.len(),
            rounds = circuit.rounds(),
            coefficients = circuit.output_count(),
            "assembled fitting circuit"
        );
        Ok((circuit, tape))
    }

    /// Assemble and run the fit on the given engine.
    pub fn fit<E: Engine>(&self, engine: &mut E, slots: &[Slot]) -> Result<Vec<f64>> {
        let (circuit, tape) = self.application(slots)?;
        let run = engine
            .execute(&circuit, &tape)
            .map_err(|e| Error::Protocol(Box::new(e)))?;
        tracing::info!(rounds = run.rounds, "fit complete");
        Ok(run.outputs)
    }
}

/// Fit in one call: validate `config`, assemble the circuit over `slots`,
/// run it on `engine`, and return the revealed coefficients in column
/// order.
pub fn fit<E: Engine>(engine: &mut E, config: &FitConfig, slots: &[Slot]) -> Result<Vec<f64>> {
    LogisticRegression::new(config.clone())?.fit(engine, slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_iterations_are_rejected() {
        assert!(matches!(
            LogisticRegression::new(FitConfig::new(1.0, 0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn negative_lambda_is_rejected() {
        assert!(matches!(
            LogisticRegression::new(FitConfig::new(-0.5, 3)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn privacy_requires_positive_lambda_and_epsilon() {
        let budget = PrivacyBudget::new(1.0);
        assert!(LogisticRegression::new(FitConfig::new(0.0, 3).with_privacy(budget)).is_err());
        assert!(
            LogisticRegression::new(FitConfig::new(1.0, 3).with_privacy(PrivacyBudget::new(0.0)))
                .is_err()
        );
        assert!(LogisticRegression::new(FitConfig::new(1.0, 3).with_privacy(budget)).is_ok());
    }

    #[test]
    fn default_injection_is_output_perturbation() {
        assert_eq!(
            PrivacyBudget::new(2.0).injection,
            NoiseInjection::OutputPerturbation
        );
    }
}
