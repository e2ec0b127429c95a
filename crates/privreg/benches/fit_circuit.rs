use criterion::{criterion_group, criterion_main, Criterion};
use privreg::{Contribution, FitConfig, LogisticRegression, PrivacyBudget, Slot};
use privreg_circuit::{ClearEngine, Engine};
use privreg_util::mtcars;

fn slots() -> Vec<Slot> {
    let [(x1, y1), (x2, y2)] = mtcars::two_party_split();
    vec![
        Slot::Owned(Contribution::new(x1, y1).unwrap()),
        Slot::Owned(Contribution::new(x2, y2).unwrap()),
    ]
}

pub fn assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let slots = slots();

    for iterations in [1, 5, 10] {
        let model = LogisticRegression::new(FitConfig::new(1.0, iterations)).unwrap();
        group.bench_function(format!("iterations={iterations}"), |b| {
            b.iter(|| model.application(&slots).unwrap());
        });
    }

    let private = LogisticRegression::new(
        FitConfig::new(1.0, 5).with_privacy(PrivacyBudget::new(1.0)),
    )
    .unwrap();
    group.bench_function("iterations=5/private", |b| {
        b.iter(|| private.application(&slots).unwrap());
    });

    group.finish();
}

pub fn evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let slots = slots();

    for iterations in [1, 5, 10] {
        let model = LogisticRegression::new(FitConfig::new(1.0, iterations)).unwrap();
        let (circuit, tape) = model.application(&slots).unwrap();
        group.bench_function(format!("iterations={iterations}"), |b| {
            let mut engine = ClearEngine::seeded(2, 0);
            b.iter(|| engine.execute(&circuit, &tape).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, assemble, evaluate);
criterion_main!(benches);
