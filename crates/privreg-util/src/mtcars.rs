//! The mtcars reference dataset (Henderson & Velleman, 1981).
//!
//! Used by the integration tests and the example: transmission type (`am`)
//! regressed on gross horsepower (`hp`) and weight (`wt`). The rows are
//! split in half to mimic two data holders.

use ndarray::{Array1, Array2};

/// Gross horsepower, all 32 cars.
pub const HP: [f64; 32] = [
    110.0, 110.0, 93.0, 110.0, 175.0, 105.0, 245.0, 62.0, 95.0, 123.0, 123.0, 180.0, 180.0, 180.0,
    205.0, 215.0, 230.0, 66.0, 52.0, 65.0, 97.0, 150.0, 150.0, 245.0, 175.0, 66.0, 91.0, 113.0,
    264.0, 175.0, 335.0, 109.0,
];

/// Weight in thousands of pounds, all 32 cars.
pub const WT: [f64; 32] = [
    2.620, 2.875, 2.320, 3.215, 3.440, 3.460, 3.570, 3.190, 3.150, 3.440, 3.440, 4.070, 3.730,
    3.780, 5.250, 5.424, 5.345, 2.200, 1.615, 1.835, 2.465, 3.520, 3.435, 3.840, 3.845, 1.935,
    2.140, 1.513, 3.170, 2.770, 3.570, 2.780,
];

/// Transmission type: 1 = manual, 0 = automatic.
pub const AM: [f64; 32] = [
    1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
    1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0,
];

/// Design matrix for rows `range`: `[hp, wt, 1]`. The intercept column
/// comes last, matching the convention that the revealed coefficient
/// vector ends with the intercept.
pub fn design(range: std::ops::Range<usize>) -> Array2<f64> {
    let rows: Vec<[f64; 3]> = range.map(|r| [HP[r], WT[r], 1.0]).collect();
    let mut x = Array2::zeros((rows.len(), 3));
    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            x[(r, c)] = v;
        }
    }
    x
}

/// Labels for rows `range`.
pub fn labels(range: std::ops::Range<usize>) -> Array1<f64> {
    Array1::from_iter(range.map(|r| AM[r]))
}

/// The two-party split used throughout the tests: first half of the rows
/// to party 0, second half to party 1.
pub fn two_party_split() -> [(Array2<f64>, Array1<f64>); 2] {
    [
        (design(0..16), labels(0..16)),
        (design(16..32), labels(16..32)),
    ]
}

/// Reference coefficients for `lambda = 1.0`, five iterations:
/// `[hp, wt, intercept]`.
pub const REFERENCE_COEFFICIENTS: [f64; 3] = [0.00968555, -1.17481, 1.65707];
