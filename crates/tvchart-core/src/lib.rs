// File: crates/tvchart-core/src/lib.rs
// Summary: Core library entry point; payload model, render flow, figure builder and data helpers.

pub mod backend;
pub mod error;
pub mod figure;
pub mod generator;
pub mod host;
pub mod legend;
pub mod marker;
pub mod options;
pub mod payload;
pub mod renderer;
pub mod series;
pub mod sma;
#[doc(hidden)]
pub mod testing;
pub mod theme;
pub mod types;

pub use backend::ChartBackend;
pub use error::{ChartError, Result};
pub use figure::{CandlestickSpec, EventSpec, Figure, Figures, LineSpec, OhlcRow, TimeInput, VolumeSpec};
pub use generator::{generate_bars, generate_bars_seeded, GeneratorOptions, Period};
pub use host::{HostBridge, PageSession};
pub use legend::{CrosshairValue, Legend, LegendText};
pub use marker::{EventKind, Marker, MarkerPosition, MarkerShape};
pub use payload::{ChartPayload, RawPayload};
pub use renderer::{CrosshairMove, RenderReport, Renderer, SeriesId};
pub use series::{SeriesConfig, SeriesData, SeriesEnvelope, SeriesKind};
pub use sma::{calculate_sma, rolling_mean};
pub use theme::{LayoutConfig, Theme};
pub use types::{Bar, BusinessDay, LinePoint, Time, VolumePoint};
