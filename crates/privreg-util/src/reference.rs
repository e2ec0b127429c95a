//! Plaintext twin of the joint fitting arithmetic.
//!
//! Runs the identical sequence of operations (Böhning bound, Cholesky,
//! fixed-count Newton updates) directly on `f64`s. Protocol output can be
//! compared against it to separate numeric questions from protocol
//! questions.

use ndarray::{Array1, Array2};

/// Fit a ridge-penalized logistic model with the Böhning-bound Newton
/// iteration: the same fixed circuit the protocol runs, in plaintext.
///
/// Returns the coefficient vector, intercept last if the design carries a
/// trailing ones column. Panics on a non-positive-definite system, which
/// cannot happen for `lambda > 0`.
pub fn logistic_ridge_fit(
    x: &Array2<f64>,
    y: &Array1<f64>,
    lambda: f64,
    iterations: usize,
) -> Vec<f64> {
    let (n, d) = x.dim();
    assert_eq!(y.len(), n, "one label per row");

    // A = 0.25·XᵀX + λI, the sign-adjusted penalized bound
    let mut a = vec![vec![0.0; d]; d];
    for i in 0..d {
        for j in 0..d {
            for r in 0..n {
                a[i][j] += 0.25 * x[(r, i)] * x[(r, j)];
            }
        }
        a[i][i] += lambda;
    }
    let l = cholesky(&a);

    let mut beta = vec![0.0; d];
    for _ in 0..iterations {
        let mut gradient = vec![0.0; d];
        for r in 0..n {
            let z: f64 = (0..d).map(|c| x[(r, c)] * beta[c]).sum();
            let p = 1.0 / (1.0 + (-z).exp());
            for c in 0..d {
                gradient[c] += x[(r, c)] * (y[r] - p);
            }
        }
        for c in 0..d {
            gradient[c] -= lambda * beta[c];
        }
        let delta = back_substitute(&l, &forward_substitute(&l, &gradient));
        for c in 0..d {
            beta[c] += delta[c];
        }
    }
    beta
}

fn cholesky(a: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = a.len();
    let mut m: Vec<Vec<f64>> = a.to_vec();
    for j in 0..n {
        for k in 0..j {
            for i in j..n {
                m[i][j] -= m[i][k] * m[j][k];
            }
        }
        assert!(m[j][j] > 0.0, "matrix is not positive-definite");
        m[j][j] = m[j][j].sqrt();
        let inv = 1.0 / m[j][j];
        for i in j + 1..n {
            m[i][j] *= inv;
        }
    }
    for r in 0..n {
        for c in r + 1..n {
            m[r][c] = 0.0;
        }
    }
    m
}

fn forward_substitute(l: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut w = vec![0.0; n];
    for i in 0..n {
        let dot: f64 = (0..i).map(|k| l[i][k] * w[k]).sum();
        w[i] = (b[i] - dot) / l[i][i];
    }
    w
}

fn back_substitute(l: &[Vec<f64>], b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let dot: f64 = (i + 1..n).map(|k| l[k][i] * x[k]).sum();
        x[i] = (b[i] - dot) / l[i][i];
    }
    x
}
