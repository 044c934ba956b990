// File: crates/tvchart-core/tests/generator.rs
// Purpose: Synthetic bar generation: OHLC ordering, day stepping and degenerate periods.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tvchart_core::generator::{control_points, random_price};
use tvchart_core::{generate_bars_seeded, BusinessDay, ChartError, GeneratorOptions, Period, Time};

fn period(from: (i32, u32, u32), to: (i32, u32, u32)) -> GeneratorOptions {
    GeneratorOptions {
        period: Period::new(BusinessDay::new(from.0, from.1, from.2), BusinessDay::new(to.0, to.1, to.2)),
        ..GeneratorOptions::default()
    }
}

#[test]
fn default_period_is_one_bar_per_day_of_2018() {
    let bars = generate_bars_seeded(7, &GeneratorOptions::default()).expect("generate");
    assert_eq!(bars.len(), 365);
    assert_eq!(bars[0].time, Time::Day(BusinessDay::new(2018, 1, 1)));
    assert_eq!(bars[364].time, Time::Day(BusinessDay::new(2018, 12, 31)));
}

#[test]
fn days_roll_over_months_and_include_weekends() {
    let bars = generate_bars_seeded(1, &period((2020, 2, 27), (2020, 3, 3))).expect("generate");
    let days: Vec<Time> = bars.iter().map(|b| b.time).collect();
    assert_eq!(
        days,
        vec![
            Time::Day(BusinessDay::new(2020, 2, 27)),
            Time::Day(BusinessDay::new(2020, 2, 28)),
            Time::Day(BusinessDay::new(2020, 2, 29)),
            Time::Day(BusinessDay::new(2020, 3, 1)),
            Time::Day(BusinessDay::new(2020, 3, 2)),
        ]
    );
}

#[test]
fn single_day_range_gives_one_finite_bar() {
    for opts in [period((2021, 5, 4), (2021, 5, 5)), period((2021, 5, 4), (2021, 5, 4))] {
        let bars = generate_bars_seeded(42, &opts).expect("generate");
        assert_eq!(bars.len(), 1);
        let b = bars[0];
        for v in [b.open, b.high, b.low, b.close] {
            assert!(v.is_finite(), "bar has non-finite value: {b:?}");
        }
        assert!(b.is_consistent());
    }
}

#[test]
fn reversed_period_is_rejected() {
    let err = generate_bars_seeded(0, &period((2019, 1, 1), (2018, 1, 1))).unwrap_err();
    assert!(matches!(err, ChartError::InvalidPeriod { .. }));
}

#[test]
fn same_seed_same_bars() {
    let opts = period((2018, 1, 1), (2018, 3, 1));
    assert_eq!(generate_bars_seeded(99, &opts).unwrap(), generate_bars_seeded(99, &opts).unwrap());
}

#[test]
fn control_points_span_first_and_last_index() {
    let mut rng = StdRng::seed_from_u64(3);
    let opts = GeneratorOptions { anchor_probability: 1.0, ..GeneratorOptions::default() };
    let points = control_points(&mut rng, 10, &opts);
    let indices: Vec<usize> = points.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let none = GeneratorOptions { anchor_probability: 0.0, ..GeneratorOptions::default() };
    let points = control_points(&mut rng, 10, &none);
    assert_eq!(points.iter().map(|p| p.index).collect::<Vec<_>>(), vec![0, 9]);
}

#[test]
fn random_prices_are_cents_in_range() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1000 {
        let p = random_price(&mut rng);
        assert!((10.0..=110.0).contains(&p));
        let cents = (p * 100.0).round();
        assert!((p * 100.0 - cents).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn generated_bars_keep_ohlc_ordering(seed in any::<u64>(), days in 1i64..400) {
        let from = chrono::NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let to = from + chrono::Duration::days(days);
        let opts = GeneratorOptions {
            period: Period::new(BusinessDay::from_date(from), BusinessDay::from_date(to)),
            ..GeneratorOptions::default()
        };
        let bars = generate_bars_seeded(seed, &opts).unwrap();
        prop_assert_eq!(bars.len() as i64, days);
        for b in &bars {
            prop_assert!(b.high >= b.open && b.high >= b.close);
            prop_assert!(b.low <= b.open && b.low <= b.close);
        }
    }
}
