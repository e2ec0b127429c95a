//! Two parties jointly fit a logistic model on the split mtcars data and
//! compare the opened coefficients against a local plaintext fit.
//!
//! Run with `RUST_LOG=debug` to watch the per-iteration assembly.

use privreg::{fit, Contribution, FitConfig, PrivacyBudget, Slot};
use privreg_circuit::ClearEngine;
use privreg_util::{mtcars, reference};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let [(x1, y1), (x2, y2)] = mtcars::two_party_split();
    let slots = vec![
        Slot::Owned(Contribution::new(x1, y1)?),
        Slot::Owned(Contribution::new(x2, y2)?),
    ];

    let mut engine = ClearEngine::seeded(2, 7);
    let exact = fit(&mut engine, &FitConfig::new(1.0, 5), &slots)?;

    let private_config = FitConfig::new(1.0, 5).with_privacy(PrivacyBudget::new(10.0));
    let private = fit(&mut engine, &private_config, &slots)?;

    let x = mtcars::design(0..32);
    let y = mtcars::labels(0..32);
    let local = reference::logistic_ridge_fit(&x, &y, 1.0, 5);

    println!("{:>12} {:>12} {:>12} {:>12}", "column", "joint", "private", "local");
    for (i, name) in ["hp", "wt", "intercept"].iter().enumerate() {
        println!(
            "{:>12} {:>12.6} {:>12.6} {:>12.6}",
            name, exact[i], private[i], local[i]
        );
    }
    Ok(())
}
