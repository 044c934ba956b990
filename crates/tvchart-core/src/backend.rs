// File: crates/tvchart-core/src/backend.rs
// Summary: Seam between the render flow and a concrete charting surface.

use crate::error::Result;
use crate::legend::LegendText;
use crate::marker::Marker;
use crate::options::{CandlestickOptions, ChartOptions, HistogramOptions, LineOptions};
use crate::series::SeriesData;

/// Operations the renderer needs from a charting library.
///
/// Handles are opaque to the renderer; the container is passed explicitly to every
/// call that places something on the page.
pub trait ChartBackend {
    type Container;
    type Chart;
    type Series;
    type Legend;

    fn create_chart(&mut self, container: &Self::Container, options: &ChartOptions) -> Result<Self::Chart>;
    fn apply_size(&mut self, chart: &Self::Chart, width: u32, height: u32);

    fn add_candlestick_series(&mut self, chart: &Self::Chart, options: &CandlestickOptions) -> Result<Self::Series>;
    fn add_line_series(&mut self, chart: &Self::Chart, options: &LineOptions) -> Result<Self::Series>;
    fn add_histogram_series(&mut self, chart: &Self::Chart, options: &HistogramOptions) -> Result<Self::Series>;

    /// Drop a series created on `chart`. Called only for the most recently added one.
    fn remove_series(&mut self, chart: &Self::Chart, series: Self::Series);

    fn set_data(&mut self, series: &Self::Series, data: &SeriesData) -> Result<()>;
    fn set_markers(&mut self, series: &Self::Series, markers: &[Marker]) -> Result<()>;

    fn create_legend(&mut self, container: &Self::Container, top_em: f64) -> Result<Self::Legend>;
    fn set_legend_text(&mut self, legend: &Self::Legend, text: &LegendText);
}
