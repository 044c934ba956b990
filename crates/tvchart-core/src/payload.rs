// File: crates/tvchart-core/src/payload.rs
// Summary: Host wire payload and its one-time decoding into typed chart input.
// Notes:
// - On the wire every field is itself a JSON string: `config`, each `series` entry
//   and each `events`/`markers` entry are decoded a second time here, once.
// - Series entries decode independently, so one malformed or unknown entry does not
//   prevent the others from rendering.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChartError, Result};
use crate::marker::Marker;
use crate::series::SeriesEnvelope;
use crate::theme::LayoutConfig;

/// Exact shape returned by the host's `request_data()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub config: String,
    #[serde(default)]
    pub series: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<String>>,
}

impl RawPayload {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(ChartError::json("payload"))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ChartError::json("payload"))
    }
}

/// Decoded payload. Series keep their position so failures can be reported per entry.
#[derive(Debug)]
pub struct ChartPayload {
    pub layout: LayoutConfig,
    pub series: Vec<Result<SeriesEnvelope>>,
    pub markers: Vec<Marker>,
}

impl ChartPayload {
    /// Decode every double-encoded field. A bad `config` or marker fails the whole
    /// payload; a bad series entry only fails that entry.
    ///
    /// When no entry carries an explicit `markers` flag, the first decodable series
    /// receives the markers.
    pub fn decode(raw: &RawPayload) -> Result<Self> {
        let layout = if raw.config.trim().is_empty() {
            LayoutConfig::default()
        } else {
            serde_json::from_str(&raw.config).map_err(ChartError::json("chart config"))?
        };

        let mut any_flag = false;
        let mut series: Vec<Result<SeriesEnvelope>> = raw
            .series
            .iter()
            .enumerate()
            .map(|(i, text)| match SeriesEnvelope::decode(text) {
                Ok((envelope, flag)) => {
                    any_flag |= flag.is_some();
                    Ok(envelope)
                }
                Err(e) => {
                    warn!(index = i, error = %e, "dropping series entry");
                    Err(e)
                }
            })
            .collect();

        if !any_flag {
            if let Some(first) = series.iter_mut().find_map(|s| s.as_mut().ok()) {
                first.markers = true;
            }
        }

        let markers = raw
            .events
            .iter()
            .flatten()
            .chain(raw.markers.iter().flatten())
            .map(|text| serde_json::from_str::<Marker>(text).map_err(ChartError::json("marker")))
            .collect::<Result<Vec<_>>>()?;

        debug!(series = series.len(), markers = markers.len(), "payload decoded");
        Ok(Self { layout, series, markers })
    }

    /// Successfully decoded series, in payload order.
    pub fn envelopes(&self) -> impl Iterator<Item = &SeriesEnvelope> {
        self.series.iter().filter_map(|s| s.as_ref().ok())
    }
}
