//! Cholesky factorization and triangular solves on secret matrices.

use privreg_circuit::{CircuitBuilder, Wire};

use crate::error::{Error, Result};
use crate::matrix::SecretMatrix;
use crate::vector::SecretVector;

/// A lower-triangular Cholesky factor together with the reciprocals of its
/// pivots.
///
/// The reciprocals fall out of the factorization for free; keeping them
/// lets [`solve`] run both substitution passes without issuing any further
/// `Recip` gates.
#[derive(Debug, Clone, PartialEq)]
pub struct CholeskyFactor {
    lower: SecretMatrix,
    inv_diag: SecretVector,
}

impl CholeskyFactor {
    /// The lower-triangular factor `L` with `L·Lᵀ ≈ A`. Strictly-upper
    /// entries are public zeros.
    pub fn lower(&self) -> &SecretMatrix {
        &self.lower
    }

    /// Reciprocals of the diagonal of `L`.
    pub fn inv_diag(&self) -> &SecretVector {
        &self.inv_diag
    }

    /// Size of the factored system.
    pub fn dim(&self) -> usize {
        self.inv_diag.len()
    }
}

/// Factor a symmetric positive-definite secret matrix in place.
///
/// One pivot column at a time: the subtractive updates
/// `a[i][j] -= a[i][k]·a[j][k]` are independent across `i` and batch into
/// one round per `k`; the pivot square root and its reciprocal chain
/// sequentially; the column scaling below the pivot batches again.
///
/// The square root and reciprocal are themselves approximating
/// sub-protocols, so `L·Lᵀ` reproduces `A` only up to their accuracy. A
/// non-positive pivot, such as `λ = 0` with a rank-deficient design,
/// means the matrix is not positive-definite and surfaces at evaluation
/// time as a
/// terminal engine error; there is no fallback.
pub fn factor(b: &mut CircuitBuilder, a: &SecretMatrix) -> Result<CholeskyFactor> {
    if a.rows() != a.cols() {
        return Err(Error::NotSquare {
            rows: a.rows(),
            cols: a.cols(),
        });
    }
    let n = a.rows();
    let mut m: Vec<Vec<Wire>> = (0..n).map(|r| a.row(r).to_vec()).collect();
    let mut inv_diag = Vec::with_capacity(n);

    for j in 0..n {
        for k in 0..j {
            for i in j..n {
                let prod = b.mul(m[i][k], m[j][k]);
                m[i][j] = b.sub(m[i][j], prod);
            }
        }
        m[j][j] = b.sqrt(m[j][j]);
        let inv = b.recip(m[j][j]);
        inv_diag.push(inv);
        for i in j + 1..n {
            m[i][j] = b.mul(m[i][j], inv);
        }
    }

    for r in 0..n {
        for c in r + 1..n {
            m[r][c] = b.constant(0.0);
        }
    }

    Ok(CholeskyFactor {
        lower: SecretMatrix::from_rows(m)?,
        inv_diag: SecretVector::from_wires(inv_diag),
    })
}

/// Solve `A·x = rhs` given the Cholesky factor of `A`, by forward then
/// back substitution. Arithmetic-only: inner products over row and column
/// prefixes plus multiplications by the cached pivot reciprocals.
pub fn solve(
    b: &mut CircuitBuilder,
    factor: &CholeskyFactor,
    rhs: &SecretVector,
) -> Result<SecretVector> {
    let n = factor.dim();
    if rhs.len() != n {
        return Err(Error::DimensionMismatch {
            left: n,
            right: rhs.len(),
        });
    }
    if n == 0 {
        return Ok(SecretVector::from_wires(Vec::new()));
    }
    let lower = &factor.lower;
    let inv = factor.inv_diag.wires();

    // L·w = rhs
    let mut w: Vec<Wire> = Vec::with_capacity(n);
    for i in 0..n {
        let residual = if i == 0 {
            rhs.wire(0)
        } else {
            let dot = b.inner_product(&lower.row(i)[..i], &w[..i])?;
            b.sub(rhs.wire(i), dot)
        };
        w.push(b.mul(residual, inv[i]));
    }

    // Lᵀ·x = w
    let mut x: Vec<Wire> = vec![w[n - 1]; n];
    x[n - 1] = b.mul(w[n - 1], inv[n - 1]);
    for i in (0..n.saturating_sub(1)).rev() {
        let below: Vec<Wire> = (i + 1..n).map(|k| lower.wire(k, i)).collect();
        let tail: Vec<Wire> = x[i + 1..].to_vec();
        let dot = b.inner_product(&below, &tail)?;
        let residual = b.sub(w[i], dot);
        x[i] = b.mul(residual, inv[i]);
    }

    Ok(SecretVector::from_wires(x))
}
