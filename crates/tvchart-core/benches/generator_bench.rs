use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tvchart_core::{generate_bars_seeded, BusinessDay, GeneratorOptions, Period};

fn options(days: i64) -> GeneratorOptions {
    let from = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let to = from + chrono::Duration::days(days);
    GeneratorOptions {
        period: Period::new(BusinessDay::from_date(from), BusinessDay::from_date(to)),
        ..GeneratorOptions::default()
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_bars");
    for &days in &[365i64, 3_650, 36_500] {
        let opts = options(days);
        group.bench_with_input(BenchmarkId::from_parameter(format!("d{days}")), &opts, |b, o| {
            b.iter(|| {
                let _ = black_box(generate_bars_seeded(7, o));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
