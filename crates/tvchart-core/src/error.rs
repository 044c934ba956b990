// File: crates/tvchart-core/src/error.rs
// Summary: Error type shared by payload decoding, figure building and rendering.

use thiserror::Error;

use crate::types::BusinessDay;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("series type not supported: {0:?}")]
    UnknownSeriesType(String),

    #[error("malformed {what}: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid period {from:?} .. {to:?}")]
    InvalidPeriod { from: BusinessDay, to: BusinessDay },

    #[error("only one candlestick series is allowed per figure")]
    DuplicateCandlestick,

    #[error("a candlestick series must be plotted before overlays")]
    MissingCandlestick,

    #[error("series length {got} does not match candlestick length {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("expected at least 5 columns (time, open, high, low, close) but got {0}")]
    InvalidColumns(usize),

    #[error("cannot parse time {value:?} with format {format:?}")]
    InvalidTime { value: String, format: String },

    #[error("invalid {field}: {value:?}")]
    InvalidOption { field: &'static str, value: String },

    #[error("backend: {0}")]
    Backend(String),
}

impl ChartError {
    pub(crate) fn json(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| ChartError::Json { what, source }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
