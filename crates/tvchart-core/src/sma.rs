// File: crates/tvchart-core/src/sma.rs
// Summary: Simple moving averages over bar closes and over raw value columns.

use crate::types::{Bar, LinePoint};

/// Mean close over the trailing `period` bars, the current bar included.
/// One point per index `period-1 .. len-1`; empty when `period` is 0 or exceeds the data.
pub fn calculate_sma(bars: &[Bar], period: usize) -> Vec<LinePoint> {
    if period == 0 || bars.len() < period {
        return Vec::new();
    }
    bars.windows(period)
        .map(|window| {
            let sum: f64 = window.iter().map(|b| b.close).sum();
            LinePoint { time: window[period - 1].time, value: sum / period as f64 }
        })
        .collect()
}

/// Rolling mean aligned with `values`: NaN until a full window exists, and
/// NaN for any window containing a NaN.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for (i, window) in values.windows(period).enumerate() {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i + period - 1] = window.iter().sum::<f64>() / period as f64;
    }
    out
}
