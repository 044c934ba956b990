// File: crates/tvchart-render-skia/src/lib.rs
// Summary: Scene backend for the chart render flow, with optional Skia rasterisation.

pub mod color;
pub mod layout;
#[cfg(feature = "raster")]
pub mod raster;
pub mod scene;

pub use color::{parse_color, Rgba};
pub use layout::{Insets, PlotLayout, TimeScale, ValueScale};
#[cfg(feature = "raster")]
pub use raster::{render_png, render_png_bytes, RenderOptions};
pub use scene::{Scene, SceneBackend, SceneLegend, SceneSeries, SeriesStyle};
