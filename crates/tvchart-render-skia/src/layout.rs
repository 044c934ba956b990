// File: crates/tvchart-render-skia/src/layout.rs
// Summary: Plot rectangle, time (X) and value (Y) scales fitted to a scene.

use crate::scene::Scene;

/// Padding around the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Insets {
    fn default() -> Self {
        Self { left: 8.0, right: 56.0, top: 8.0, bottom: 24.0 }
    }
}

/// Horizontal scale mapping UNIX seconds to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    pub t_min: i64,
    pub t_max: i64,
}

impl TimeScale {
    pub fn new(left_px: f32, right_px: f32, t_min: i64, t_max: i64) -> Self {
        let t_max = if t_max <= t_min { t_min.saturating_add(1) } else { t_max };
        Self { left_px, right_px, t_min, t_max }
    }

    /// Offsets are taken in `f64`; the full `i64` range must not overflow.
    #[inline]
    pub fn to_px(&self, t: i64) -> f32 {
        let span = (self.t_max as f64 - self.t_min as f64).max(1.0);
        let frac = (t as f64 - self.t_min as f64) / span;
        self.left_px + frac as f32 * (self.right_px - self.left_px)
    }

    /// Width available to one of `n` evenly spaced bars.
    pub fn bar_width(&self, n: usize) -> f32 {
        ((self.right_px - self.left_px) / n.max(1) as f32).max(3.0) * 0.7
    }
}

/// Vertical linear scale mapping a value range to `[top, bottom]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 {
            s.vmax = s.vmin + 1.0;
        }
        s
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
}

/// Scales for one frame: prices over the full plot, volume in its bottom band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub time: TimeScale,
    pub price: ValueScale,
    pub volume: ValueScale,
}

/// Fraction of the plot height left above the volume band.
pub const VOLUME_TOP_MARGIN: f32 = 0.8;
const PRICE_PADDING: f64 = 0.02;

impl PlotLayout {
    pub fn fit(scene: &Scene, insets: &Insets) -> Self {
        let (w, h) = scene.size();
        let left = insets.left;
        let top = insets.top;
        let right = (w as f32 - insets.right).max(left + 1.0);
        let bottom = (h as f32 - insets.bottom).max(top + 1.0);

        let (t_min, t_max) = scene.time_range().unwrap_or((0, 1));
        let (lo, hi) = scene.price_range().unwrap_or((0.0, 1.0));
        let pad = (hi - lo) * PRICE_PADDING;
        let volume_top = top + (bottom - top) * VOLUME_TOP_MARGIN;

        Self {
            left,
            top,
            right,
            bottom,
            time: TimeScale::new(left, right, t_min, t_max),
            price: ValueScale::new(top, bottom, lo - pad, hi + pad),
            volume: ValueScale::new(volume_top, bottom, 0.0, scene.max_volume().unwrap_or(1.0)),
        }
    }
}

/// `n` evenly spaced values from `a` to `b` inclusive.
pub fn linspace(a: f32, b: f32, n: usize) -> Vec<f32> {
    if n < 2 {
        return vec![a];
    }
    let step = (b - a) / (n - 1) as f32;
    (0..n).map(|i| a + step * i as f32).collect()
}
