// File: crates/tvchart-core/src/testing.rs
// Summary: Recording backend that logs every call, for exercising the render flow headlessly.

use crate::backend::ChartBackend;
use crate::error::{ChartError, Result};
use crate::legend::LegendText;
use crate::marker::Marker;
use crate::options::{CandlestickOptions, ChartOptions, HistogramOptions, LineOptions};
use crate::series::{SeriesData, SeriesKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateChart { container: String, options: ChartOptions },
    ApplySize { width: u32, height: u32 },
    AddSeries { kind: SeriesKind, series: usize },
    RemoveSeries { series: usize },
    SetData { series: usize, points: usize },
    SetMarkers { series: usize, markers: Vec<Marker> },
    CreateLegend { legend: usize, top_em: f64 },
    SetLegendText { legend: usize, text: LegendText },
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<Call>,
    /// Series kind whose creation is refused with a backend error.
    pub reject: Option<SeriesKind>,
    /// Series kind whose data is refused after creation.
    pub reject_data: Option<SeriesKind>,
    next_series: usize,
    next_legend: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(kind: SeriesKind) -> Self {
        Self { reject: Some(kind), ..Self::default() }
    }

    pub fn rejecting_data(kind: SeriesKind) -> Self {
        Self { reject_data: Some(kind), ..Self::default() }
    }

    fn add(&mut self, kind: SeriesKind) -> Result<usize> {
        if self.reject == Some(kind) {
            return Err(ChartError::Backend(format!("{kind} series refused")));
        }
        let id = self.next_series;
        self.next_series += 1;
        self.calls.push(Call::AddSeries { kind, series: id });
        Ok(id)
    }

    pub fn size_updates(&self) -> Vec<(u32, u32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::ApplySize { width, height } => Some((*width, *height)),
                _ => None,
            })
            .collect()
    }

    pub fn added_kinds(&self) -> Vec<SeriesKind> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::AddSeries { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Most recent text set on `legend`.
    pub fn legend_text(&self, legend: usize) -> Option<&LegendText> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetLegendText { legend: l, text } if *l == legend => Some(text),
            _ => None,
        })
    }
}

impl ChartBackend for RecordingBackend {
    type Container = String;
    type Chart = ();
    type Series = usize;
    type Legend = usize;

    fn create_chart(&mut self, container: &String, options: &ChartOptions) -> Result<()> {
        self.calls.push(Call::CreateChart { container: container.clone(), options: options.clone() });
        Ok(())
    }

    fn apply_size(&mut self, _chart: &(), width: u32, height: u32) {
        self.calls.push(Call::ApplySize { width, height });
    }

    fn add_candlestick_series(&mut self, _chart: &(), _options: &CandlestickOptions) -> Result<usize> {
        self.add(SeriesKind::Candlestick)
    }

    fn add_line_series(&mut self, _chart: &(), _options: &LineOptions) -> Result<usize> {
        self.add(SeriesKind::Line)
    }

    fn add_histogram_series(&mut self, _chart: &(), _options: &HistogramOptions) -> Result<usize> {
        self.add(SeriesKind::Volume)
    }

    fn remove_series(&mut self, _chart: &(), series: usize) {
        self.calls.push(Call::RemoveSeries { series });
    }

    fn set_data(&mut self, series: &usize, data: &SeriesData) -> Result<()> {
        if self.reject_data == Some(data.kind()) {
            return Err(ChartError::Backend(format!("{} data refused", data.kind())));
        }
        self.calls.push(Call::SetData { series: *series, points: data.len() });
        Ok(())
    }

    fn set_markers(&mut self, series: &usize, markers: &[Marker]) -> Result<()> {
        self.calls.push(Call::SetMarkers { series: *series, markers: markers.to_vec() });
        Ok(())
    }

    fn create_legend(&mut self, _container: &String, top_em: f64) -> Result<usize> {
        let id = self.next_legend;
        self.next_legend += 1;
        self.calls.push(Call::CreateLegend { legend: id, top_em });
        Ok(id)
    }

    fn set_legend_text(&mut self, legend: &usize, text: &LegendText) {
        self.calls.push(Call::SetLegendText { legend: *legend, text: text.clone() });
    }
}
