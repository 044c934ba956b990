// File: crates/tvchart-core/src/generator.rs
// Summary: Synthetic daily OHLC bars from a random walk through sparse control points.
// Notes:
// - Bars are generated for every calendar day in the period, weekends included.
// - The random source is injected so runs are reproducible with a seeded `StdRng`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::types::{Bar, BusinessDay, Time};

/// Anchor price at a bar index; prices between anchors are interpolated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub index: usize,
    pub price: f64,
}

/// Half-open date range `[from, to)`; equal endpoints mean a single day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub from: BusinessDay,
    pub to: BusinessDay,
}

impl Period {
    pub const fn new(from: BusinessDay, to: BusinessDay) -> Self {
        Self { from, to }
    }

    /// Number of bars the period produces (at least one).
    pub fn days(&self) -> Result<usize> {
        let invalid = || ChartError::InvalidPeriod { from: self.from, to: self.to };
        let from = self.from.to_date().ok_or_else(invalid)?;
        let to = self.to.to_date().ok_or_else(invalid)?;
        let days = (to - from).num_days();
        if days < 0 {
            return Err(invalid());
        }
        Ok((days as usize).max(1))
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::new(BusinessDay::new(2018, 1, 1), BusinessDay::new(2019, 1, 1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorOptions {
    pub period: Period,
    /// Scales every control-point price.
    pub price_multiplier: f64,
    /// Chance that an interior day becomes a control point.
    pub anchor_probability: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { period: Period::default(), price_multiplier: 1.0, anchor_probability: 0.05 }
    }
}

/// Uniform price in `[10, 110]`, rounded to cents.
pub fn random_price<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    10.0 + (rng.gen::<f64>() * 10000.0).round() / 100.0
}

/// Start and end anchors plus randomly chosen interior anchors, ordered by index.
pub fn control_points<R: Rng + ?Sized>(rng: &mut R, days: usize, opts: &GeneratorOptions) -> Vec<ControlPoint> {
    let last = days.saturating_sub(1);
    let mut points = vec![ControlPoint { index: 0, price: random_price(rng) * opts.price_multiplier }];
    for i in 1..last {
        if rng.gen::<f64>() < opts.anchor_probability {
            points.push(ControlPoint { index: i, price: random_price(rng) * opts.price_multiplier });
        }
    }
    points.push(ControlPoint { index: last, price: random_price(rng) * opts.price_multiplier });
    points
}

fn fill_segment<R: Rng + ?Sized>(rng: &mut R, left: ControlPoint, right: ControlPoint, bars: &mut [Bar]) {
    let dx = right.index - left.index;
    let slope = if dx == 0 { 0.0 } else { (right.price - left.price) / dx as f64 };
    for (offset, bar) in bars[left.index..=right.index].iter_mut().enumerate() {
        let base = left.price + offset as f64 * slope;
        let open = base * (1.1 - rng.gen::<f64>() * 0.2);
        let close = base * (1.1 - rng.gen::<f64>() * 0.2);
        let high = (base * (1.0 + rng.gen::<f64>() * 0.2)).max(open).max(close);
        let low = (base * (1.0 - rng.gen::<f64>() * 0.2)).min(open).min(close);
        bar.open = open;
        bar.high = high;
        bar.low = low;
        bar.close = close;
    }
}

/// One bar per calendar day of `opts.period`.
pub fn generate_bars<R: Rng + ?Sized>(rng: &mut R, opts: &GeneratorOptions) -> Result<Vec<Bar>> {
    let days = opts.period.days()?;
    let mut bars = Vec::with_capacity(days);
    let mut day = opts.period.from;
    for _ in 0..days {
        bars.push(Bar { time: Time::Day(day), open: 0.0, high: 0.0, low: 0.0, close: 0.0 });
        day = day
            .next_day()
            .ok_or(ChartError::InvalidPeriod { from: opts.period.from, to: opts.period.to })?;
    }

    let points = control_points(rng, days, opts);
    debug!(days, anchors = points.len(), "generating synthetic bars");
    for pair in points.windows(2) {
        fill_segment(rng, pair[0], pair[1], &mut bars);
    }
    Ok(bars)
}

/// Convenience wrapper over [`generate_bars`] with a seeded `StdRng`.
pub fn generate_bars_seeded(seed: u64, opts: &GeneratorOptions) -> Result<Vec<Bar>> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_bars(&mut rng, opts)
}
