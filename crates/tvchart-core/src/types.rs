// File: crates/tvchart-core/src/types.rs
// Summary: Shared data types (time, bars, line and volume points) and default sizes.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Initial chart width in pixels, before the first container resize.
pub const WIDTH: u32 = 600;
/// Initial chart height in pixels, before the first container resize.
pub const HEIGHT: u32 = 400;

/// Calendar day in the shape the charting library accepts (`{year, month, day}`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BusinessDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl BusinessDay {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month(), date.day())
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// The following calendar day. Month and year roll over; weekends are not skipped.
    pub fn next_day(&self) -> Option<Self> {
        self.to_date()?.succ_opt().map(Self::from_date)
    }

    /// UTC midnight of this day as a UNIX timestamp in seconds.
    pub fn timestamp(&self) -> Option<i64> {
        Some(self.to_date()?.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
    }
}

/// Horizontal coordinate of a data point: UNIX seconds or a business day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Time {
    Timestamp(i64),
    Day(BusinessDay),
}

impl Time {
    /// Seconds since the epoch; invalid business days sort first.
    pub fn sort_key(&self) -> i64 {
        match self {
            Time::Timestamp(t) => *t,
            Time::Day(d) => d.timestamp().unwrap_or(i64::MIN),
        }
    }

    /// False for business days that name no calendar date, such as month 13.
    pub fn is_valid(&self) -> bool {
        match self {
            Time::Timestamp(_) => true,
            Time::Day(d) => d.to_date().is_some(),
        }
    }
}

impl From<i64> for Time {
    fn from(t: i64) -> Self {
        Time::Timestamp(t)
    }
}

impl From<BusinessDay> for Time {
    fn from(d: BusinessDay) -> Self {
        Time::Day(d)
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Time::Timestamp(t) => write!(f, "{t}"),
            Time::Day(d) => write!(f, "{:04}-{:02}-{:02}", d.year, d.month, d.day),
        }
    }
}

/// One trading period summarised by open/high/low/close.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn is_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }

    pub fn is_up(&self) -> bool {
        self.open < self.close
    }
}

/// Single-valued point, used by line overlays such as moving averages.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: Time,
    pub value: f64,
}

/// Histogram point with an optional per-bar colour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub time: Time,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
