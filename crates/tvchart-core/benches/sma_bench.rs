use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tvchart_core::{calculate_sma, generate_bars_seeded, rolling_mean, GeneratorOptions};

fn bench_sma(c: &mut Criterion) {
    let bars = generate_bars_seeded(1, &GeneratorOptions::default()).unwrap_or_default();
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let mut group = c.benchmark_group("sma");
    for &period in &[5usize, 20usize, 100usize] {
        group.bench_with_input(BenchmarkId::new("bars", period), &period, |b, &p| {
            b.iter(|| {
                let _ = black_box(calculate_sma(&bars, p));
            });
        });
        group.bench_with_input(BenchmarkId::new("rolling_mean", period), &period, |b, &p| {
            b.iter(|| {
                let _ = black_box(rolling_mean(&closes, p));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sma);
criterion_main!(benches);
