// File: crates/tvchart-core/src/series.rs
// Summary: Series model: kind tag, per-series config, typed data and the wire envelope.
// Notes:
// - Envelopes are decoded in two steps: the `type` tag first, then config and data
//   against the matching variant. An unknown tag never reaches the renderer.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, Result};
use crate::types::{Bar, LinePoint, Time, VolumePoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    #[serde(rename = "ohlc")]
    Candlestick,
    #[serde(rename = "line")]
    Line,
    #[serde(rename = "volume")]
    Volume,
}

impl SeriesKind {
    /// Wire tag used in the `type` field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SeriesKind::Candlestick => "ohlc",
            SeriesKind::Line => "line",
            SeriesKind::Volume => "volume",
        }
    }
}

impl FromStr for SeriesKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ohlc" => Ok(SeriesKind::Candlestick),
            "line" => Ok(SeriesKind::Line),
            "volume" => Ok(SeriesKind::Volume),
            other => Err(ChartError::UnknownSeriesType(other.to_string())),
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-series display settings. Both `colour` and `color` spellings are accepted
/// on input; output always uses the `colour` spelling.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub name: String,
    #[serde(alias = "color", skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    #[serde(alias = "up_color", skip_serializing_if = "Option::is_none")]
    pub up_colour: Option<String>,
    #[serde(alias = "down_color", skip_serializing_if = "Option::is_none")]
    pub down_colour: Option<String>,
    #[serde(alias = "wick_up_color", skip_serializing_if = "Option::is_none")]
    pub wick_up_colour: Option<String>,
    #[serde(alias = "wick_down_color", skip_serializing_if = "Option::is_none")]
    pub wick_down_colour: Option<String>,
    #[serde(alias = "volume_color_up", skip_serializing_if = "Option::is_none")]
    pub volume_colour_up: Option<String>,
    #[serde(alias = "volume_color_down", skip_serializing_if = "Option::is_none")]
    pub volume_colour_down: Option<String>,
    pub show_legend: bool,
    #[serde(alias = "index")]
    pub legend_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl SeriesConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Colour used for this series' legend value.
    pub fn accent_colour(&self, kind: SeriesKind) -> Option<&str> {
        match kind {
            SeriesKind::Line => self.colour.as_deref(),
            SeriesKind::Candlestick => self.up_colour.as_deref().or(self.colour.as_deref()),
            SeriesKind::Volume => self.volume_colour_up.as_deref().or(self.colour.as_deref()),
        }
    }
}

/// Data array of a series, typed by kind.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Candlestick(Vec<Bar>),
    Line(Vec<LinePoint>),
    Volume(Vec<VolumePoint>),
}

impl SeriesData {
    pub fn kind(&self) -> SeriesKind {
        match self {
            SeriesData::Candlestick(_) => SeriesKind::Candlestick,
            SeriesData::Line(_) => SeriesKind::Line,
            SeriesData::Volume(_) => SeriesKind::Volume,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesData::Candlestick(v) => v.len(),
            SeriesData::Line(v) => v.len(),
            SeriesData::Volume(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First time that names no calendar date.
    fn invalid_time(&self) -> Option<Time> {
        match self {
            SeriesData::Candlestick(v) => v.iter().map(|b| b.time).find(|t| !t.is_valid()),
            SeriesData::Line(v) => v.iter().map(|p| p.time).find(|t| !t.is_valid()),
            SeriesData::Volume(v) => v.iter().map(|p| p.time).find(|t| !t.is_valid()),
        }
    }

    fn decode(kind: SeriesKind, value: Value) -> Result<Self> {
        let what = "series data";
        let data = match kind {
            SeriesKind::Candlestick => {
                SeriesData::Candlestick(serde_json::from_value(value).map_err(ChartError::json(what))?)
            }
            SeriesKind::Line => SeriesData::Line(serde_json::from_value(value).map_err(ChartError::json(what))?),
            SeriesKind::Volume => SeriesData::Volume(serde_json::from_value(value).map_err(ChartError::json(what))?),
        };
        if let Some(time) = data.invalid_time() {
            return Err(ChartError::InvalidTime { value: time.to_string(), format: "{year, month, day}".into() });
        }
        Ok(data)
    }
}

/// One series as carried by the payload: data, config and the explicit markers flag.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesEnvelope {
    pub config: SeriesConfig,
    pub data: SeriesData,
    /// Whether payload markers are attached to this series.
    pub markers: bool,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    config: Value,
    #[serde(default = "empty_array")]
    series: Value,
    #[serde(default)]
    markers: Option<bool>,
}

fn empty_array() -> Value {
    Value::Array(Vec::new())
}

#[derive(Serialize)]
struct WireEnvelope<'a> {
    #[serde(rename = "type")]
    kind: SeriesKind,
    config: &'a SeriesConfig,
    series: &'a SeriesData,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    markers: bool,
}

impl SeriesEnvelope {
    pub fn new(config: SeriesConfig, data: SeriesData) -> Self {
        Self { config, data, markers: false }
    }

    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    pub fn kind(&self) -> SeriesKind {
        self.data.kind()
    }

    /// Decode one JSON-encoded envelope. Also returns whether `markers` was present.
    pub(crate) fn decode(text: &str) -> Result<(Self, Option<bool>)> {
        let raw: RawEnvelope = serde_json::from_str(text).map_err(ChartError::json("series envelope"))?;
        let kind: SeriesKind = raw.kind.parse()?;
        let config = match raw.config {
            Value::Null => SeriesConfig::default(),
            v => serde_json::from_value(v).map_err(ChartError::json("series config"))?,
        };
        let data = SeriesData::decode(kind, raw.series)?;
        let envelope = Self { config, data, markers: raw.markers.unwrap_or(false) };
        Ok((envelope, raw.markers))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::decode(text).map(|(envelope, _)| envelope)
    }

    pub fn to_json(&self) -> Result<String> {
        let wire = WireEnvelope {
            kind: self.kind(),
            config: &self.config,
            series: &self.data,
            markers: self.markers,
        };
        serde_json::to_string(&wire).map_err(ChartError::json("series envelope"))
    }
}
