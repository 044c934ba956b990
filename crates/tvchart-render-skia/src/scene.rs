// File: crates/tvchart-render-skia/src/scene.rs
// Summary: In-memory chart scene and the `ChartBackend` that builds it.
// Notes:
// - One chart per backend. Series and legend handles are indices into the scene.
// - Data pushed to a series must match the kind the series was created with.

use tracing::{debug, warn};
use tvchart_core::options::{CandlestickOptions, ChartOptions, HistogramOptions, LineOptions};
use tvchart_core::{ChartBackend, ChartError, LegendText, Marker, Result, SeriesData, SeriesKind};

/// Style a series was created with.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesStyle {
    Candlestick(CandlestickOptions),
    Line(LineOptions),
    Histogram(HistogramOptions),
}

impl SeriesStyle {
    pub fn kind(&self) -> SeriesKind {
        match self {
            SeriesStyle::Candlestick(_) => SeriesKind::Candlestick,
            SeriesStyle::Line(_) => SeriesKind::Line,
            SeriesStyle::Histogram(_) => SeriesKind::Volume,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneSeries {
    pub style: SeriesStyle,
    pub data: Option<SeriesData>,
    pub markers: Vec<Marker>,
}

impl SceneSeries {
    pub fn kind(&self) -> SeriesKind {
        self.style.kind()
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, SeriesData::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLegend {
    pub container: String,
    pub top_em: f64,
    pub text: Option<LegendText>,
}

/// Everything the page would show, kept as plain data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub container: Option<String>,
    pub options: ChartOptions,
    pub series: Vec<SceneSeries>,
    pub legends: Vec<SceneLegend>,
}

impl Scene {
    pub fn size(&self) -> (u32, u32) {
        (self.options.width, self.options.height)
    }

    /// Series drawn against the main price scale.
    pub fn price_series(&self) -> impl Iterator<Item = &SceneSeries> {
        self.series.iter().filter(|s| s.kind() != SeriesKind::Volume)
    }

    pub fn volume_series(&self) -> impl Iterator<Item = &SceneSeries> {
        self.series.iter().filter(|s| s.kind() == SeriesKind::Volume)
    }

    /// `(first, last)` time across all series, as UNIX seconds.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        let keys = self.series.iter().filter_map(|s| s.data.as_ref()).flat_map(time_keys);
        keys.fold(None, |acc, t| match acc {
            None => Some((t, t)),
            Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
        })
    }

    /// Lowest low and highest high over the price series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for data in self.price_series().filter_map(|s| s.data.as_ref()) {
            match data {
                SeriesData::Candlestick(bars) => {
                    for b in bars {
                        lo = lo.min(b.low);
                        hi = hi.max(b.high);
                    }
                }
                SeriesData::Line(points) => {
                    for p in points {
                        lo = lo.min(p.value);
                        hi = hi.max(p.value);
                    }
                }
                SeriesData::Volume(_) => {}
            }
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }

    pub fn max_volume(&self) -> Option<f64> {
        self.volume_series()
            .filter_map(|s| match &s.data {
                Some(SeriesData::Volume(points)) => Some(points.iter().map(|p| p.value)),
                _ => None,
            })
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }
}

fn time_keys(data: &SeriesData) -> Vec<i64> {
    match data {
        SeriesData::Candlestick(bars) => bars.iter().map(|b| b.time.sort_key()).collect(),
        SeriesData::Line(points) => points.iter().map(|p| p.time.sort_key()).collect(),
        SeriesData::Volume(points) => points.iter().map(|p| p.time.sort_key()).collect(),
    }
}

/// Chart backend that records the page as a [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBackend {
    scene: Scene,
    created: bool,
}

impl SceneBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    fn push_series(&mut self, style: SeriesStyle) -> Result<usize> {
        if !self.created {
            return Err(ChartError::Backend("series added before the chart was created".into()));
        }
        self.scene.series.push(SceneSeries { style, data: None, markers: Vec::new() });
        Ok(self.scene.series.len() - 1)
    }

    fn series_mut(&mut self, id: usize) -> Result<&mut SceneSeries> {
        self.scene
            .series
            .get_mut(id)
            .ok_or_else(|| ChartError::Backend(format!("no series with handle {id}")))
    }
}

impl ChartBackend for SceneBackend {
    type Container = String;
    type Chart = ();
    type Series = usize;
    type Legend = usize;

    fn create_chart(&mut self, container: &String, options: &ChartOptions) -> Result<()> {
        if self.created {
            return Err(ChartError::Backend("chart already created".into()));
        }
        self.created = true;
        self.scene.container = Some(container.clone());
        self.scene.options = options.clone();
        debug!(container = %container, "scene chart created");
        Ok(())
    }

    fn apply_size(&mut self, _chart: &(), width: u32, height: u32) {
        self.scene.options.width = width;
        self.scene.options.height = height;
    }

    fn add_candlestick_series(&mut self, _chart: &(), options: &CandlestickOptions) -> Result<usize> {
        self.push_series(SeriesStyle::Candlestick(options.clone()))
    }

    fn add_line_series(&mut self, _chart: &(), options: &LineOptions) -> Result<usize> {
        self.push_series(SeriesStyle::Line(options.clone()))
    }

    fn add_histogram_series(&mut self, _chart: &(), options: &HistogramOptions) -> Result<usize> {
        self.push_series(SeriesStyle::Histogram(options.clone()))
    }

    fn remove_series(&mut self, _chart: &(), series: usize) {
        // Handles are indices, so only the newest series can go without renumbering.
        if series + 1 == self.scene.series.len() {
            self.scene.series.pop();
        } else {
            warn!(series, "only the most recent series can be removed");
        }
    }

    fn set_data(&mut self, series: &usize, data: &SeriesData) -> Result<()> {
        let s = self.series_mut(*series)?;
        if s.kind() != data.kind() {
            return Err(ChartError::Backend(format!("{} data pushed to a {} series", data.kind(), s.kind())));
        }
        s.data = Some(data.clone());
        Ok(())
    }

    fn set_markers(&mut self, series: &usize, markers: &[Marker]) -> Result<()> {
        self.series_mut(*series)?.markers = markers.to_vec();
        Ok(())
    }

    fn create_legend(&mut self, container: &String, top_em: f64) -> Result<usize> {
        self.scene.legends.push(SceneLegend { container: container.clone(), top_em, text: None });
        Ok(self.scene.legends.len() - 1)
    }

    fn set_legend_text(&mut self, legend: &usize, text: &LegendText) {
        if let Some(l) = self.scene.legends.get_mut(*legend) {
            l.text = Some(text.clone());
        }
    }
}
