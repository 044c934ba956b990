// File: crates/tvchart-core/src/renderer.rs
// Summary: Render flow: one chart per container, one series per envelope, crosshair legends.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::backend::ChartBackend;
use crate::error::Result;
use crate::legend::{CrosshairValue, Legend};
use crate::marker::Marker;
use crate::options::{CandlestickOptions, ChartOptions, HistogramOptions, LineOptions};
use crate::payload::ChartPayload;
use crate::series::{SeriesData, SeriesEnvelope, SeriesKind};
use crate::theme::LayoutConfig;
use crate::types::Time;

/// Position of a rendered series within its renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(pub usize);

/// Crosshair notification: the hovered time and each series' value there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrosshairMove {
    pub time: Option<Time>,
    pub values: HashMap<SeriesId, CrosshairValue>,
}

/// Value of `data` at `time`, as the crosshair would report it. A business day and
/// the timestamp of its UTC midnight name the same point.
pub fn value_at(data: &SeriesData, time: Time) -> Option<CrosshairValue> {
    let key = time.sort_key();
    match data {
        SeriesData::Candlestick(bars) => {
            bars.iter().find(|b| b.time.sort_key() == key).map(CrosshairValue::from_bar)
        }
        SeriesData::Line(points) => {
            points.iter().find(|p| p.time.sort_key() == key).map(|p| CrosshairValue::Price(p.value))
        }
        SeriesData::Volume(points) => {
            points.iter().find(|p| p.time.sort_key() == key).map(|p| CrosshairValue::Price(p.value))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesFailure {
    /// Index of the entry in the payload's series list.
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    pub rendered: Vec<SeriesId>,
    pub failed: Vec<SeriesFailure>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

struct RenderedSeries<S> {
    id: SeriesId,
    kind: SeriesKind,
    handle: S,
    data: SeriesData,
}

struct LegendBinding<L> {
    series: SeriesId,
    legend: Legend,
    handle: L,
}

pub struct Renderer<B: ChartBackend> {
    backend: B,
    container: B::Container,
    chart: B::Chart,
    layout: LayoutConfig,
    size: (u32, u32),
    series: Vec<RenderedSeries<B::Series>>,
    legends: Vec<LegendBinding<B::Legend>>,
}

impl<B: ChartBackend> Renderer<B> {
    /// Create the chart surface on `container`.
    pub fn new(mut backend: B, container: B::Container, layout: LayoutConfig) -> Result<Self> {
        let options = ChartOptions::from_layout(&layout);
        let chart = backend.create_chart(&container, &options)?;
        Ok(Self {
            backend,
            container,
            chart,
            layout,
            size: (options.width, options.height),
            series: Vec::new(),
            legends: Vec::new(),
        })
    }

    /// Render every decoded series of `payload`. Failed entries are reported and skipped;
    /// series rendered before a failure stay in place.
    pub fn render(&mut self, payload: &ChartPayload) -> RenderReport {
        let mut report = RenderReport::default();
        for (index, entry) in payload.series.iter().enumerate() {
            let outcome = match entry {
                Ok(envelope) => self.render_series(envelope, &payload.markers),
                Err(e) => {
                    report.failed.push(SeriesFailure { index, reason: e.to_string() });
                    continue;
                }
            };
            match outcome {
                Ok(id) => report.rendered.push(id),
                Err(e) => {
                    warn!(index, error = %e, "series not rendered");
                    report.failed.push(SeriesFailure { index, reason: e.to_string() });
                }
            }
        }
        info!(rendered = report.rendered.len(), failed = report.failed.len(), "payload rendered");
        report
    }

    /// Build, fill and annotate one series. `markers` are applied only when the
    /// envelope's markers flag is set. A series whose data, markers or legend are refused
    /// is removed from the chart again.
    pub fn render_series(&mut self, envelope: &SeriesEnvelope, markers: &[Marker]) -> Result<SeriesId> {
        let kind = envelope.kind();
        let handle = self.create_series(kind, envelope)?;
        if let Err(e) = self.fill_series(&handle, envelope, markers) {
            self.backend.remove_series(&self.chart, handle);
            return Err(e);
        }

        let id = SeriesId(self.series.len());
        if envelope.config.show_legend {
            let legend = Legend::for_series(&envelope.config, kind, &self.layout);
            let legend_handle = match self.backend.create_legend(&self.container, legend.top_em()) {
                Ok(h) => h,
                Err(e) => {
                    self.backend.remove_series(&self.chart, handle);
                    return Err(e);
                }
            };
            self.backend.set_legend_text(&legend_handle, &legend.text(None));
            self.legends.push(LegendBinding { series: id, legend, handle: legend_handle });
        }
        debug!(id = id.0, %kind, points = envelope.data.len(), "series rendered");
        self.series.push(RenderedSeries { id, kind, handle, data: envelope.data.clone() });
        Ok(id)
    }

    fn fill_series(&mut self, handle: &B::Series, envelope: &SeriesEnvelope, markers: &[Marker]) -> Result<()> {
        self.backend.set_data(handle, &envelope.data)?;
        if envelope.markers && !markers.is_empty() {
            self.backend.set_markers(handle, markers)?;
        }
        Ok(())
    }

    fn create_series(&mut self, kind: SeriesKind, envelope: &SeriesEnvelope) -> Result<B::Series> {
        let config = &envelope.config;
        match kind {
            SeriesKind::Candlestick => self
                .backend
                .add_candlestick_series(&self.chart, &CandlestickOptions::from_config(config)),
            SeriesKind::Line => self.backend.add_line_series(&self.chart, &LineOptions::from_config(config)),
            SeriesKind::Volume => self
                .backend
                .add_histogram_series(&self.chart, &HistogramOptions::from_config(config)),
        }
    }

    /// Container layout changed; the chart follows its exact dimensions.
    pub fn on_container_resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.backend.apply_size(&self.chart, width, height);
    }

    /// Redraw every legend from the values carried by `event`.
    pub fn on_crosshair_move(&mut self, event: &CrosshairMove) {
        for binding in &self.legends {
            let text = binding.legend.text(event.values.get(&binding.series));
            self.backend.set_legend_text(&binding.handle, &text);
        }
    }

    /// Crosshair event for `time` resolved against the data pushed so far.
    pub fn crosshair_at(&self, time: Time) -> CrosshairMove {
        let values = self
            .series
            .iter()
            .filter_map(|s| value_at(&s.data, time).map(|v| (s.id, v)))
            .collect();
        CrosshairMove { time: Some(time), values }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn series_kinds(&self) -> Vec<(SeriesId, SeriesKind)> {
        self.series.iter().map(|s| (s.id, s.kind)).collect()
    }

    pub fn container(&self) -> &B::Container {
        &self.container
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
