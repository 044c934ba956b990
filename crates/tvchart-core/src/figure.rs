// File: crates/tvchart-core/src/figure.rs
// Summary: Host-side figure builder: validates plotted series and events and emits the wire payload.
// Notes:
// - A figure holds at most one candlestick series, always first and always carrying
//   the markers flag. Line and volume overlays are aligned 1:1 with its bars.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::marker::{EventKind, Marker, MarkerPosition, MarkerShape, DEFAULT_MARKER_COLOUR};
use crate::payload::RawPayload;
use crate::series::{SeriesConfig, SeriesData, SeriesEnvelope, SeriesKind};
use crate::theme::{LayoutConfig, Theme};
use crate::types::{Bar, LinePoint, Time, VolumePoint};

/// Time as supplied by the caller: already a timestamp, or text to be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeInput {
    Timestamp(i64),
    Text(String),
}

impl From<i64> for TimeInput {
    fn from(t: i64) -> Self {
        TimeInput::Timestamp(t)
    }
}

impl From<&str> for TimeInput {
    fn from(s: &str) -> Self {
        TimeInput::Text(s.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(s: String) -> Self {
        TimeInput::Text(s)
    }
}

/// Resolve `input` to a UTC timestamp. Text without a format must be an integer.
pub fn parse_time(input: &TimeInput, date_format: Option<&str>) -> Result<Time> {
    let text = match input {
        TimeInput::Timestamp(t) => return Ok(Time::Timestamp(*t)),
        TimeInput::Text(s) => s.trim(),
    };
    let invalid = || ChartError::InvalidTime {
        value: text.to_string(),
        format: date_format.unwrap_or_default().to_string(),
    };
    let Some(format) = date_format else {
        return text.parse::<i64>().map(Time::Timestamp).map_err(|_| invalid());
    };
    let datetime = NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| NaiveDate::parse_from_str(text, format).ok()?.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    Ok(Time::Timestamp(datetime.and_utc().timestamp()))
}

/// One input row: time followed by open, high, low, close.
#[derive(Clone, Debug, PartialEq)]
pub struct OhlcRow {
    pub time: TimeInput,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcRow {
    /// Parse `time, open, high, low, close[, ...]`. Extra columns are ignored and
    /// `,` thousands separators in prices are accepted.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() < 5 {
            return Err(ChartError::InvalidColumns(fields.len()));
        }
        let time = match fields[0].trim().parse::<i64>() {
            Ok(t) => TimeInput::Timestamp(t),
            Err(_) => TimeInput::Text(fields[0].trim().to_string()),
        };
        let price = |s: &str| {
            s.trim()
                .replace(',', "")
                .parse::<f64>()
                .map_err(|_| ChartError::InvalidOption { field: "price", value: s.to_string() })
        };
        Ok(Self {
            time,
            open: price(fields[1])?,
            high: price(fields[2])?,
            low: price(fields[3])?,
            close: price(fields[4])?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandlestickSpec {
    pub name: String,
    pub date_format: Option<String>,
    pub show_legend: bool,
}

impl Default for CandlestickSpec {
    fn default() -> Self {
        Self { name: String::new(), date_format: None, show_legend: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSpec {
    /// Defaults to `Line {n}`.
    pub name: Option<String>,
    /// Defaults to the theme palette entry for this line.
    pub colour: Option<String>,
    pub show_legend: bool,
}

impl Default for LineSpec {
    fn default() -> Self {
        Self { name: None, colour: None, show_legend: true }
    }
}

impl LineSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VolumeSpec {
    pub name: String,
    pub colour_up: Option<String>,
    pub colour_down: Option<String>,
    pub show_legend: bool,
}

impl Default for VolumeSpec {
    fn default() -> Self {
        Self { name: "Vol".to_string(), colour_up: None, colour_down: None, show_legend: true }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EventSpec {
    pub time: TimeInput,
    pub text: String,
    /// Buy/sell override position, shape, colour and prefix the text.
    pub kind: Option<EventKind>,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub colour: String,
    /// Falls back to the candlestick series' date format.
    pub date_format: Option<String>,
}

impl EventSpec {
    pub fn new(time: impl Into<TimeInput>, text: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            text: text.into(),
            kind: None,
            position: MarkerPosition::AboveBar,
            shape: MarkerShape::ArrowDown,
            colour: DEFAULT_MARKER_COLOUR.to_string(),
            date_format: None,
        }
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// One chart window worth of series and events.
#[derive(Clone, Debug)]
pub struct Figure {
    title: String,
    theme: Theme,
    series: Vec<SeriesEnvelope>,
    events: Vec<Marker>,
}

impl Figure {
    pub fn new(title: impl Into<String>, theme: Theme) -> Self {
        Self { title: title.into(), theme, series: Vec::new(), events: Vec::new() }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn series(&self) -> &[SeriesEnvelope] {
        &self.series
    }

    pub fn events(&self) -> &[Marker] {
        &self.events
    }

    pub fn layout(&self) -> LayoutConfig {
        self.theme.layout()
    }

    /// Add a prepared envelope. A candlestick goes first and takes the markers flag.
    pub fn add_series(&mut self, mut envelope: SeriesEnvelope) -> Result<()> {
        if envelope.kind() == SeriesKind::Candlestick {
            if self.candlestick().is_some() {
                return Err(ChartError::DuplicateCandlestick);
            }
            envelope.markers = true;
            self.series.insert(0, envelope);
        } else {
            self.series.push(envelope);
        }
        Ok(())
    }

    fn candlestick(&self) -> Option<(&SeriesConfig, &[Bar])> {
        self.series.iter().find_map(|s| match &s.data {
            SeriesData::Candlestick(bars) => Some((&s.config, bars.as_slice())),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&SeriesEnvelope) -> bool) -> usize {
        self.series.iter().filter(|s| pred(s)).count()
    }

    fn legend_rows(&self) -> usize {
        self.count(|s| s.config.show_legend)
    }

    /// Plot rows as the figure's candlestick series.
    pub fn add_candlestick(&mut self, rows: Vec<OhlcRow>, spec: CandlestickSpec) -> Result<()> {
        let format = spec.date_format.as_deref();
        let bars = rows
            .into_iter()
            .map(|r| -> Result<Bar> {
                Ok(Bar { time: parse_time(&r.time, format)?, open: r.open, high: r.high, low: r.low, close: r.close })
            })
            .collect::<Result<Vec<_>>>()?;
        self.add_bars(bars, spec)
    }

    /// Plot already-typed bars as the figure's candlestick series.
    pub fn add_bars(&mut self, bars: Vec<Bar>, spec: CandlestickSpec) -> Result<()> {
        let config = SeriesConfig {
            name: spec.name,
            up_colour: Some(self.theme.candle_up.to_string()),
            down_colour: Some(self.theme.candle_down.to_string()),
            wick_up_colour: Some(self.theme.wick_up.to_string()),
            wick_down_colour: Some(self.theme.wick_down.to_string()),
            show_legend: spec.show_legend,
            legend_index: 0,
            date_format: spec.date_format,
            ..SeriesConfig::default()
        };
        debug!(bars = bars.len(), "candlestick series added");
        self.add_series(SeriesEnvelope::new(config, SeriesData::Candlestick(bars)))
    }

    fn aligned_bars(&self, got: usize) -> Result<Vec<Bar>> {
        let (_, bars) = self.candlestick().ok_or(ChartError::MissingCandlestick)?;
        if bars.len() != got {
            return Err(ChartError::LengthMismatch { expected: bars.len(), got });
        }
        Ok(bars.to_vec())
    }

    /// Overlay a line aligned with the candlestick bars. NaN values are skipped.
    pub fn add_line(&mut self, values: &[f64], spec: LineSpec) -> Result<()> {
        let bars = self.aligned_bars(values.len())?;
        let points = bars
            .iter()
            .zip(values)
            .filter(|(_, v)| !v.is_nan())
            .map(|(b, v)| LinePoint { time: b.time, value: *v })
            .collect::<Vec<_>>();

        let lines = self.count(|s| s.kind() == SeriesKind::Line);
        let config = SeriesConfig {
            name: spec.name.unwrap_or_else(|| format!("Line {}", lines + 1)),
            colour: Some(spec.colour.unwrap_or_else(|| self.theme.line_colour(lines).to_string())),
            show_legend: spec.show_legend,
            legend_index: self.legend_rows(),
            ..SeriesConfig::default()
        };
        self.add_series(SeriesEnvelope::new(config, SeriesData::Line(points)))
    }

    /// Overlay volume bars, coloured by the direction of the aligned candle.
    pub fn add_volume(&mut self, values: &[f64], spec: VolumeSpec) -> Result<()> {
        let bars = self.aligned_bars(values.len())?;
        let up = spec.colour_up.unwrap_or_else(|| self.theme.volume_up.to_string());
        let down = spec.colour_down.unwrap_or_else(|| self.theme.volume_down.to_string());
        let points = bars
            .iter()
            .zip(values)
            .filter(|(_, v)| !v.is_nan())
            .map(|(b, v)| VolumePoint {
                time: b.time,
                value: *v,
                color: Some(if b.is_up() { up.clone() } else { down.clone() }),
            })
            .collect::<Vec<_>>();

        let config = SeriesConfig {
            name: spec.name,
            volume_colour_up: Some(up),
            volume_colour_down: Some(down),
            show_legend: spec.show_legend,
            legend_index: self.legend_rows(),
            ..SeriesConfig::default()
        };
        self.add_series(SeriesEnvelope::new(config, SeriesData::Volume(points)))
    }

    /// Add an event marker, keeping events ordered by time.
    pub fn add_event(&mut self, spec: EventSpec) -> Result<()> {
        let format = spec
            .date_format
            .clone()
            .or_else(|| self.candlestick().and_then(|(c, _)| c.date_format.clone()));
        let time = parse_time(&spec.time, format.as_deref())?;
        let marker = match spec.kind {
            Some(kind) => Marker::trade(time, &spec.text, kind),
            None => Marker {
                time,
                text: spec.text,
                position: spec.position,
                shape: spec.shape,
                color: spec.colour,
            },
        };
        self.events.push(marker);
        self.events.sort_by_key(|m| m.time.sort_key());
        Ok(())
    }

    /// Double-encoded payload as the page expects it from `request_data()`.
    pub fn to_payload(&self) -> Result<RawPayload> {
        let config = serde_json::to_string(&self.layout()).map_err(ChartError::json("chart config"))?;
        let series = self.series.iter().map(SeriesEnvelope::to_json).collect::<Result<Vec<_>>>()?;
        let events = self
            .events
            .iter()
            .map(|m| serde_json::to_string(m).map_err(ChartError::json("marker")))
            .collect::<Result<Vec<_>>>()?;
        Ok(RawPayload { config, series, events: Some(events), markers: None })
    }
}

/// Registry of figures with a current one, mirroring one window per figure.
#[derive(Debug, Default)]
pub struct Figures {
    figures: Vec<(String, Figure)>,
    current: Option<usize>,
    next_id: usize,
}

impl Figures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to figure `id` if it exists, otherwise create it (generating an id when
    /// none is given) and make it current. Returns the id.
    pub fn figure(&mut self, id: Option<&str>, title: &str, theme: Theme) -> String {
        if let Some(id) = id {
            if let Some(pos) = self.figures.iter().position(|(k, _)| k == id) {
                self.current = Some(pos);
                return id.to_string();
            }
        }
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                self.next_id += 1;
                format!("figure-{}", self.next_id)
            }
        };
        self.figures.push((id.clone(), Figure::new(title, theme)));
        self.current = Some(self.figures.len() - 1);
        id
    }

    /// Current figure, creating an untitled one first if there is none.
    pub fn current_mut(&mut self) -> &mut Figure {
        let index = match self.current {
            Some(i) => i,
            None => {
                self.figure(None, "", Theme::default());
                self.figures.len() - 1
            }
        };
        &mut self.figures[index].1
    }

    pub fn get(&self, id: &str) -> Option<&Figure> {
        self.figures.iter().find(|(k, _)| k == id).map(|(_, f)| f)
    }

    /// Window title and figure, in creation order. Untitled figures are numbered.
    pub fn windows(&self) -> Vec<(String, &Figure)> {
        self.figures
            .iter()
            .enumerate()
            .map(|(i, (_, f))| {
                let title = if f.title.is_empty() { format!("Figure {}", i + 1) } else { f.title.clone() };
                (title, f)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}
