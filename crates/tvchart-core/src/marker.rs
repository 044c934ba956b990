// File: crates/tvchart-core/src/marker.rs
// Summary: Event markers (buy/sell and free-form annotations) attached to a series.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::types::Time;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerPosition {
    #[default]
    AboveBar,
    BelowBar,
    InBar,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerShape {
    Circle,
    Square,
    ArrowUp,
    #[default]
    ArrowDown,
}

/// Trade direction; selects a fixed marker style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Buy,
    Sell,
}

impl FromStr for MarkerPosition {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s {
            "" | "aboveBar" => Ok(MarkerPosition::AboveBar),
            "belowBar" => Ok(MarkerPosition::BelowBar),
            "inBar" => Ok(MarkerPosition::InBar),
            other => Err(ChartError::InvalidOption { field: "position", value: other.to_string() }),
        }
    }
}

impl FromStr for MarkerShape {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s {
            "circle" => Ok(MarkerShape::Circle),
            "square" => Ok(MarkerShape::Square),
            "arrowUp" => Ok(MarkerShape::ArrowUp),
            "" | "arrowDown" => Ok(MarkerShape::ArrowDown),
            other => Err(ChartError::InvalidOption { field: "shape", value: other.to_string() }),
        }
    }
}

impl FromStr for EventKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, ChartError> {
        match s {
            "buy" => Ok(EventKind::Buy),
            "sell" => Ok(EventKind::Sell),
            other => Err(ChartError::InvalidOption { field: "event type", value: other.to_string() }),
        }
    }
}

pub const DEFAULT_MARKER_COLOUR: &str = "#000";
pub const BUY_COLOUR: &str = "#2196F3";
pub const SELL_COLOUR: &str = "#e91e63";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub time: Time,
    pub text: String,
    #[serde(default)]
    pub position: MarkerPosition,
    #[serde(default)]
    pub shape: MarkerShape,
    #[serde(default = "default_colour")]
    pub color: String,
}

fn default_colour() -> String {
    DEFAULT_MARKER_COLOUR.to_string()
}

impl Marker {
    pub fn new(time: Time, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
            position: MarkerPosition::default(),
            shape: MarkerShape::default(),
            color: default_colour(),
        }
    }

    /// Buy/sell marker: buys point up from below the bar, sells point down from above.
    pub fn trade(time: Time, text: &str, kind: EventKind) -> Self {
        match kind {
            EventKind::Buy => Self {
                time,
                text: format!("Buy @ {text}"),
                position: MarkerPosition::BelowBar,
                shape: MarkerShape::ArrowUp,
                color: BUY_COLOUR.to_string(),
            },
            EventKind::Sell => Self {
                time,
                text: format!("Sell @ {text}"),
                position: MarkerPosition::AboveBar,
                shape: MarkerShape::ArrowDown,
                color: SELL_COLOUR.to_string(),
            },
        }
    }
}
