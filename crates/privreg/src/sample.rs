//! Joint sampling primitives built on the provider's uniform draw.
//!
//! Every draw is produced through the engine's `Rand` gates, so no single
//! party can predict or bias a sample. All samplers are fixed-cost and
//! branch-free: the circuit they issue never depends on the values drawn.

use privreg_circuit::{CircuitBuilder, Wire};

/// Uniform draw in `[min, max)`: scale and shift of the base draw. One
/// round.
pub fn uniform(b: &mut CircuitBuilder, min: f64, max: f64) -> Wire {
    let base = b.rand();
    let scaled = b.scale(max - min, base);
    b.offset(min, scaled)
}

/// Standard normal draw via the Irwin–Hall approximation: the sum of
/// twelve independent uniform draws, minus six. The twelve draws are
/// independent and resolve in one round; the accuracy is a deliberate
/// approximation, accepted in exchange for a fixed, branch-free circuit.
pub fn normal(b: &mut CircuitBuilder) -> Wire {
    let mut sum = b.rand();
    for _ in 1..12 {
        let next = b.rand();
        sum = b.add(sum, next);
    }
    b.offset(-6.0, sum)
}

/// Gamma draw with integer shape `k` and the given scale, via the
/// Wilson–Hilferty approximation `k·scale·(c + d·Z)³` with
/// `c = 1 − 1/(9k)`, `d = √(1/(9k))` and `Z` a standard normal draw.
///
/// The provider op set has no secret logarithm, so the textbook
/// sum-of-exponentials construction is unavailable; Wilson–Hilferty needs
/// only multiplications and public scalars and keeps the circuit
/// branch-free. Two rounds past the normal draw (the cube).
pub fn gamma(b: &mut CircuitBuilder, shape: usize, scale: f64) -> Wire {
    debug_assert!(shape >= 1, "gamma shape must be positive");
    let k = shape as f64;
    let c = 1.0 - 1.0 / (9.0 * k);
    let d = (1.0 / (9.0 * k)).sqrt();

    let z = normal(b);
    let dz = b.scale(d, z);
    let t = b.offset(c, dz);
    let t2 = b.mul(t, t);
    let t3 = b.mul(t2, t);
    b.scale(k * scale, t3)
}
