//! The logistic likelihood and the gradient of the penalized
//! log-likelihood, as circuit fragments.

use privreg_circuit::{CircuitBuilder, Wire};
use privreg_math::{SecretMatrix, SecretVector};

use crate::error::{Error, Result};

/// The predicted probability `σ(xᵢᵀβ) = 1 / (1 + exp(−xᵢᵀβ))` for a single
/// observation row.
///
/// Three interactive rounds after the inner product: the exponential, then
/// the reciprocal; the negation and the `+1` shift are free. A length
/// mismatch between the row and the coefficients fails before any gate is
/// issued.
pub fn likelihood(b: &mut CircuitBuilder, row: &[Wire], beta: &SecretVector) -> Result<Wire> {
    if row.len() != beta.len() {
        return Err(Error::DimensionMismatch {
            left: row.len(),
            right: beta.len(),
        });
    }
    let margin = b.inner_product(row, beta.wires())?;
    let negated = b.scale(-1.0, margin);
    let exp = b.exp(negated);
    let denom = b.offset(1.0, exp);
    Ok(b.recip(denom))
}

/// Predicted probabilities for every row of the design matrix.
///
/// The rows are independent, so the inner products batch into one round,
/// all the exponentials into the next, and all the reciprocals into a
/// third; the depth is that of a single [`likelihood`] regardless of the
/// number of observations.
pub fn probabilities(
    b: &mut CircuitBuilder,
    x: &SecretMatrix,
    beta: &SecretVector,
) -> Result<SecretVector> {
    if x.cols() != beta.len() {
        return Err(Error::DimensionMismatch {
            left: x.cols(),
            right: beta.len(),
        });
    }
    let mut margins = Vec::with_capacity(x.rows());
    for r in 0..x.rows() {
        margins.push(b.inner_product(x.row(r), beta.wires())?);
    }
    let wires = margins
        .into_iter()
        .map(|m| {
            let negated = b.scale(-1.0, m);
            let exp = b.exp(negated);
            let denom = b.offset(1.0, exp);
            b.recip(denom)
        })
        .collect();
    Ok(SecretVector::from_wires(wires))
}

/// Gradient of the ridge-penalized log-likelihood at the current
/// coefficients: `Xᵀ(y − p) − λβ`, where `p` holds the probabilities from
/// [`probabilities`].
///
/// One round for the column inner products; the residual and the penalty
/// are free.
pub fn gradient(
    b: &mut CircuitBuilder,
    x: &SecretMatrix,
    y: &SecretVector,
    p: &SecretVector,
    lambda: f64,
    beta: &SecretVector,
) -> Result<SecretVector> {
    let residual = y.sub(b, p)?;
    let pull = x.transpose_vec(b, &residual)?;
    let penalty = beta.scale(b, lambda);
    Ok(pull.sub(b, &penalty)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use privreg_circuit::{ClearEngine, Engine, InputTape};

    fn run(circuit: &privreg_circuit::Circuit, tape: &InputTape) -> Vec<f64> {
        ClearEngine::seeded(1, 7).execute(circuit, tape).unwrap().outputs
    }

    #[test]
    fn sigmoid_matches_plaintext() {
        let mut b = CircuitBuilder::new();
        let row = SecretVector::input(&mut b, 0, 2);
        let beta = SecretVector::input(&mut b, 0, 2);
        let p = likelihood(&mut b, row.wires(), &beta).unwrap();
        b.reveal(p);
        let circuit = b.finish();

        let mut tape = InputTape::new();
        tape.bind_all(row.wires(), &[1.0, 2.0]).unwrap();
        tape.bind_all(beta.wires(), &[0.1, 0.2]).unwrap();
        let got = run(&circuit, &tape)[0];
        // σ(0.5)
        assert!((got - 0.622459).abs() < 0.001);
    }

    #[test]
    fn sigmoid_of_zero_margin_is_half() {
        let mut b = CircuitBuilder::new();
        let row = SecretVector::input(&mut b, 0, 1);
        let beta = SecretVector::zeros(&mut b, 1);
        let p = likelihood(&mut b, row.wires(), &beta).unwrap();
        b.reveal(p);
        let circuit = b.finish();

        let mut tape = InputTape::new();
        tape.bind(row.wire(0), 123.456);
        assert_eq!(run(&circuit, &tape), vec![0.5]);
    }

    #[test]
    fn length_mismatch_fails_before_any_gate() {
        let mut b = CircuitBuilder::new();
        let row = SecretVector::input(&mut b, 0, 3);
        let beta = SecretVector::input(&mut b, 0, 2);
        let issued = b.len();
        assert!(matches!(
            likelihood(&mut b, row.wires(), &beta),
            Err(Error::DimensionMismatch { left: 3, right: 2 })
        ));
        assert_eq!(b.len(), issued);
    }

    #[test]
    fn probabilities_depth_is_independent_of_row_count() {
        let depth = |rows: usize| {
            let mut b = CircuitBuilder::new();
            let x = SecretMatrix::input(&mut b, 0, rows, 2);
            let beta = SecretVector::input(&mut b, 0, 2);
            let p = probabilities(&mut b, &x, &beta).unwrap();
            let c = b.finish();
            (0..p.len()).map(|i| c.level(p.wire(i))).max().unwrap()
        };
        assert_eq!(depth(1), depth(32));
    }

    #[test]
    fn gradient_matches_plaintext() {
        let mut b = CircuitBuilder::new();
        let x = SecretMatrix::input(&mut b, 0, 2, 2);
        let y = SecretVector::input(&mut b, 0, 2);
        let p = SecretVector::input(&mut b, 0, 2);
        let beta = SecretVector::input(&mut b, 0, 2);
        let g = gradient(&mut b, &x, &y, &p, 0.5, &beta).unwrap();
        g.reveal(&mut b);
        let circuit = b.finish();

        let mut tape = InputTape::new();
        tape.bind_all(x.wires(), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        tape.bind_all(y.wires(), &[1.0, 0.0]).unwrap();
        tape.bind_all(p.wires(), &[0.25, 0.75]).unwrap();
        tape.bind_all(beta.wires(), &[1.0, -2.0]).unwrap();
        let got = run(&circuit, &tape);
        // residual = [0.75, -0.75]; Xᵀr = [0.75 - 2.25, 1.5 - 3.0]
        let expected = [-1.5 - 0.5 * 1.0, -1.5 - 0.5 * (-2.0)];
        assert!((got[0] - expected[0]).abs() < 1e-12);
        assert!((got[1] - expected[1]).abs() < 1e-12);
    }
}
