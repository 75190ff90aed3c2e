use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cutoff_curve::{net_gain_curve, roc_curve, CostGainMatrix};

/// Labels with a noisy dependence on the score, so the ROC curve is not trivial.
fn random_evaluation(n: usize, seed: u64) -> (Vec<u8>, Vec<f64>) {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    let mut labels = Vec::with_capacity(n);
    let mut scores = Vec::with_capacity(n);
    for _ in 0..n {
        let score = next();
        labels.push(u8::from(next() < score));
        scores.push(score);
    }
    (labels, scores)
}

fn bench_roc(c: &mut Criterion) {
    let mut group = c.benchmark_group("roc_curve");
    for n in [1_000, 100_000] {
        let (labels, scores) = random_evaluation(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| roc_curve(black_box(&labels), black_box(&scores)))
        });
    }
    group.finish();
}

fn bench_net_gain(c: &mut Criterion) {
    let mut group = c.benchmark_group("net_gain_curve");
    let costs = CostGainMatrix::new(10.0, 5.0).with_fn_cost(2.0);
    for n in [1_000, 100_000] {
        let (labels, scores) = random_evaluation(n, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| net_gain_curve(black_box(&labels), black_box(&scores), &costs, None))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_roc, bench_net_gain);
criterion_main!(benches);
