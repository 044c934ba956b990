// File: crates/tvchart-core/src/options.rs
// Summary: Option structs handed to the chart backend, one constructor per series variant.

use serde::Serialize;

use crate::series::SeriesConfig;
use crate::theme::LayoutConfig;
use crate::types::{HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CrosshairMode {
    Normal,
    Magnet,
}

/// Chart-level options: size, layout colours, grid, crosshair and scale borders.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub grid_color: Option<String>,
    pub border_color: Option<String>,
    pub crosshair_mode: CrosshairMode,
}

impl ChartOptions {
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            background_color: layout.background_color.clone(),
            text_color: layout.text_color.clone(),
            grid_color: layout.grid_color.clone(),
            border_color: layout.border_color.clone(),
            crosshair_mode: CrosshairMode::Normal,
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_layout(&LayoutConfig::default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlestickOptions {
    pub up_color: Option<String>,
    pub down_color: Option<String>,
    pub wick_up_color: Option<String>,
    pub wick_down_color: Option<String>,
}

impl CandlestickOptions {
    pub fn from_config(config: &SeriesConfig) -> Self {
        Self {
            up_color: config.up_colour.clone(),
            down_color: config.down_colour.clone(),
            wick_up_color: config.wick_up_colour.clone(),
            wick_down_color: config.wick_down_colour.clone(),
        }
    }
}

/// Overlay line style: fixed width, no price line, base line, marker or last value label.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOptions {
    pub color: Option<String>,
    pub line_width: f32,
    pub price_line_visible: bool,
    pub base_line_visible: bool,
    pub crosshair_marker_visible: bool,
    pub last_value_visible: bool,
}

impl LineOptions {
    pub fn from_config(config: &SeriesConfig) -> Self {
        Self {
            color: config.colour.clone(),
            line_width: 2.0,
            price_line_visible: false,
            base_line_visible: false,
            crosshair_marker_visible: false,
            last_value_visible: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceFormat {
    Price,
    Volume,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaleMargins {
    pub top: f32,
    pub bottom: f32,
}

/// Volume histogram on its own overlay scale, squeezed into the bottom fifth.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramOptions {
    pub color: Option<String>,
    pub price_format: PriceFormat,
    pub price_scale_id: String,
    pub scale_margins: ScaleMargins,
}

impl HistogramOptions {
    pub fn from_config(config: &SeriesConfig) -> Self {
        Self {
            color: config.volume_colour_up.clone().or_else(|| config.colour.clone()),
            price_format: PriceFormat::Volume,
            price_scale_id: String::new(),
            scale_margins: ScaleMargins { top: 0.8, bottom: 0.0 },
        }
    }
}
