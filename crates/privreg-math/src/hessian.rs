//! Böhning's global quadratic bound on the logistic-loss Hessian.

use privreg_circuit::{CircuitBuilder, Wire};

use crate::error::Result;
use crate::matrix::SecretMatrix;

/// Compute the bound matrix `H = -0.25 · XᵀX`.
///
/// The bound does not depend on the current coefficients, so callers
/// compute it once per fit, not per iteration. Only entries with `j ≤ i`
/// are computed, each as the inner product of columns `i` and `j` batched
/// into a single round, and the mirror entry reuses the same wire,
/// halving the interactive work.
///
/// `H` is negative semi-definite; the Newton step solves against the
/// sign-adjusted, ridge-penalized system `λI − H`, which is strictly
/// positive-definite whenever `λ > 0` or `X` has full column rank.
pub fn bound(b: &mut CircuitBuilder, x: &SecretMatrix) -> Result<SecretMatrix> {
    let d = x.cols();
    let columns: Vec<Vec<Wire>> = (0..d).map(|c| x.column(c)).collect();

    let mut tril: Vec<Vec<Wire>> = Vec::with_capacity(d);
    for i in 0..d {
        let mut row = Vec::with_capacity(i + 1);
        for j in 0..=i {
            let dot = b.inner_product(&columns[i], &columns[j])?;
            row.push(b.scale(-0.25, dot));
        }
        tril.push(row);
    }

    let rows = (0..d)
        .map(|i| {
            (0..d)
                .map(|j| if j <= i { tril[i][j] } else { tril[j][i] })
                .collect()
        })
        .collect();
    SecretMatrix::from_rows(rows)
}
