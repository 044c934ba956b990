// File: crates/tvchart-core/src/legend.rs
// Summary: Crosshair legend formatting: hovered values to display text, one legend row per series.

use serde_json::Value;

use crate::series::{SeriesConfig, SeriesKind};
use crate::theme::LayoutConfig;
use crate::types::Bar;

/// Text shown when the crosshair has no value for a series.
pub const MISSING: &str = "n/a";

/// Vertical distance between legend rows, in em.
pub const ROW_HEIGHT_EM: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// Value reported by the crosshair for one series.
#[derive(Clone, Debug, PartialEq)]
pub enum CrosshairValue {
    Price(f64),
    /// Keyed fields in their original order; the first one is the time field.
    Composite(Vec<(String, FieldValue)>),
}

impl CrosshairValue {
    pub fn from_bar(bar: &Bar) -> Self {
        CrosshairValue::Composite(vec![
            ("time".to_string(), FieldValue::Text(bar.time.to_string())),
            ("open".to_string(), FieldValue::Number(bar.open)),
            ("high".to_string(), FieldValue::Number(bar.high)),
            ("low".to_string(), FieldValue::Number(bar.low)),
            ("close".to_string(), FieldValue::Number(bar.close)),
        ])
    }

    /// Numbers become prices, objects become composites; anything else has no value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(CrosshairValue::Price),
            Value::Object(map) => Some(CrosshairValue::Composite(
                map.iter()
                    .map(|(k, v)| {
                        let field = match v {
                            Value::Number(n) => n.as_f64().map(FieldValue::Number),
                            Value::String(s) => Some(FieldValue::Text(s.clone())),
                            _ => None,
                        }
                        .unwrap_or_else(|| FieldValue::Text(v.to_string()));
                        (k.clone(), field)
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

/// Round half up to two decimals, always printing both digits.
pub fn format_price(value: f64) -> String {
    let rounded = (value * 100.0 + 0.5).floor() / 100.0;
    format!("{rounded:.2}")
}

/// Plain number rendering: integers without a fractional part, others shortest form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub fn format_value(value: Option<&CrosshairValue>) -> String {
    match value {
        None => MISSING.to_string(),
        Some(CrosshairValue::Price(p)) => format_price(*p),
        Some(CrosshairValue::Composite(fields)) => fields
            .iter()
            .skip(1)
            .map(|(key, field)| match field {
                FieldValue::Number(n) => format!("{key}: {}", format_number(*n)),
                FieldValue::Text(t) => format!("{key}: {t}"),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Static part of a legend row: label, colours and row position.
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub name: String,
    pub row: usize,
    pub name_colour: Option<String>,
    pub value_colour: Option<String>,
}

impl Legend {
    pub fn for_series(config: &SeriesConfig, kind: SeriesKind, layout: &LayoutConfig) -> Self {
        Self {
            name: config.name.clone(),
            row: config.legend_index,
            name_colour: layout.text_color.clone(),
            value_colour: config.accent_colour(kind).map(str::to_string),
        }
    }

    pub fn top_em(&self) -> f64 {
        ROW_HEIGHT_EM * self.row as f64
    }

    pub fn text(&self, value: Option<&CrosshairValue>) -> LegendText {
        LegendText {
            name: self.name.clone(),
            value: format_value(value),
            name_colour: self.name_colour.clone(),
            value_colour: self.value_colour.clone(),
        }
    }
}

/// Fully resolved legend content for one crosshair position.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendText {
    pub name: String,
    pub value: String,
    pub name_colour: Option<String>,
    pub value_colour: Option<String>,
}

impl LegendText {
    pub fn to_html(&self) -> String {
        let span = |colour: &Option<String>, text: &str| match colour {
            Some(c) => format!(r#"<span style="color:{}">{}</span>"#, escape(c), escape(text)),
            None => format!("<span>{}</span>", escape(text)),
        };
        format!(
            "<div><p>{} {}</p></div>",
            span(&self.name_colour, &self.name),
            span(&self.value_colour, &self.value)
        )
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
