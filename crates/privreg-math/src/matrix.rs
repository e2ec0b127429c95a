//! Rectangular containers of secret values with public shape.

use privreg_circuit::{CircuitBuilder, Wire};

use crate::error::{Error, Result};
use crate::vector::SecretVector;

/// A row-major matrix of secret reals. Both dimensions are public
/// metadata, agreed by all parties before any protocol round.
#[derive(Debug, Clone, PartialEq)]
pub struct SecretMatrix {
    wires: Vec<Wire>,
    rows: usize,
    cols: usize,
}

impl SecretMatrix {
    /// Issue one joint-input gate per element, owned by `party`,
    /// row-major.
    pub fn input(b: &mut CircuitBuilder, party: usize, rows: usize, cols: usize) -> Self {
        Self {
            wires: (0..rows * cols).map(|_| b.input(party)).collect(),
            rows,
            cols,
        }
    }

    /// Assemble a matrix from equal-length rows of wires.
    pub fn from_rows(rows: Vec<Vec<Wire>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for row in &rows {
            if row.len() != width {
                return Err(Error::DimensionMismatch {
                    left: width,
                    right: row.len(),
                });
            }
        }
        Ok(Self {
            wires: rows.into_iter().flatten().collect(),
            rows: height,
            cols: width,
        })
    }

    /// Public row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Public column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The underlying wires, row-major.
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Element wire at `(row, col)`.
    pub fn wire(&self, row: usize, col: usize) -> Wire {
        self.wires[row * self.cols + col]
    }

    /// The wires of one row.
    pub fn row(&self, row: usize) -> &[Wire] {
        &self.wires[row * self.cols..(row + 1) * self.cols]
    }

    /// The wires of one column.
    pub fn column(&self, col: usize) -> Vec<Wire> {
        (0..self.rows).map(|r| self.wire(r, col)).collect()
    }

    /// Matrix-vector product `A·v`: one inner product per row, all in the
    /// same round.
    pub fn mat_vec(&self, b: &mut CircuitBuilder, v: &SecretVector) -> Result<SecretVector> {
        if self.cols != v.len() {
            return Err(Error::DimensionMismatch {
                left: self.cols,
                right: v.len(),
            });
        }
        let mut wires = Vec::with_capacity(self.rows);
        for r in 0..self.rows {
            wires.push(b.inner_product(self.row(r), v.wires())?);
        }
        Ok(SecretVector::from_wires(wires))
    }

    /// Transposed product `Aᵀ·v`: one inner product per column, all in the
    /// same round.
    pub fn transpose_vec(&self, b: &mut CircuitBuilder, v: &SecretVector) -> Result<SecretVector> {
        if self.rows != v.len() {
            return Err(Error::DimensionMismatch {
                left: self.rows,
                right: v.len(),
            });
        }
        let mut wires = Vec::with_capacity(self.cols);
        for c in 0..self.cols {
            let column = self.column(c);
            wires.push(b.inner_product(&column, v.wires())?);
        }
        Ok(SecretVector::from_wires(wires))
    }

    /// The transpose. Pure wire re-indexing; issues no gates.
    pub fn transpose(&self) -> Self {
        Self {
            wires: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.wire(r, c)))
                .collect(),
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Stack matrices vertically, in order. All parts must agree on the
    /// column count.
    pub fn vstack<'a>(parts: impl IntoIterator<Item = &'a SecretMatrix>) -> Result<Self> {
        let mut wires = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for part in parts {
            match cols {
                None => cols = Some(part.cols),
                Some(width) if width != part.cols => {
                    return Err(Error::ShapeMismatch {
                        left_rows: rows,
                        left_cols: width,
                        right_rows: part.rows,
                        right_cols: part.cols,
                    });
                }
                Some(_) => {}
            }
            rows += part.rows;
            wires.extend_from_slice(&part.wires);
        }
        Ok(Self {
            wires,
            rows,
            cols: cols.unwrap_or(0),
        })
    }

    /// Reveal every element, row-major.
    pub fn reveal(&self, b: &mut CircuitBuilder) {
        for &wire in &self.wires {
            b.reveal(wire);
        }
    }
}
