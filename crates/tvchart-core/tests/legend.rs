// File: crates/tvchart-core/tests/legend.rs
// Purpose: Legend value formatting for prices, composites and missing values.

use serde_json::json;
use tvchart_core::legend::{format_value, CrosshairValue, FieldValue, Legend};
use tvchart_core::{Bar, LayoutConfig, SeriesConfig, SeriesKind, Time};

#[test]
fn numeric_values_round_to_two_decimals() {
    assert_eq!(format_value(Some(&CrosshairValue::Price(12.345))), "12.35");
    assert_eq!(format_value(Some(&CrosshairValue::Price(7.0))), "7.00");
}

#[test]
fn missing_value_is_placeholder() {
    assert_eq!(format_value(None), "n/a");
}

#[test]
fn composite_skips_leading_time_key() {
    let value = CrosshairValue::from_json(&json!({"time": 1600000000, "open": 1, "close": 2})).expect("object");
    assert_eq!(format_value(Some(&value)), "open: 1, close: 2");
}

#[test]
fn composite_from_bar_lists_ohlc() {
    let bar = Bar { time: Time::Timestamp(5), open: 1.5, high: 3.0, low: 1.0, close: 2.25 };
    assert_eq!(
        format_value(Some(&CrosshairValue::from_bar(&bar))),
        "open: 1.5, high: 3, low: 1, close: 2.25"
    );
}

#[test]
fn non_numeric_json_has_no_value() {
    assert_eq!(CrosshairValue::from_json(&json!(null)), None);
    assert_eq!(CrosshairValue::from_json(&json!(4.5)), Some(CrosshairValue::Price(4.5)));
    assert_eq!(
        CrosshairValue::from_json(&json!({"time": "2018-01-01", "value": "x"})),
        Some(CrosshairValue::Composite(vec![
            ("time".into(), FieldValue::Text("2018-01-01".into())),
            ("value".into(), FieldValue::Text("x".into())),
        ]))
    );
}

#[test]
fn legend_row_offset_and_colours() {
    let config = SeriesConfig {
        colour: Some("rgba(170,70,67,255)".into()),
        legend_index: 2,
        show_legend: true,
        ..SeriesConfig::named("SMA 20")
    };
    let layout = LayoutConfig { text_color: Some("#191919".into()), ..LayoutConfig::default() };
    let legend = Legend::for_series(&config, SeriesKind::Line, &layout);
    assert_eq!(legend.top_em(), 3.0);

    let text = legend.text(Some(&CrosshairValue::Price(101.0)));
    assert_eq!(text.value, "101.00");
    assert_eq!(
        text.to_html(),
        r#"<div><p><span style="color:#191919">SMA 20</span> <span style="color:rgba(170,70,67,255)">101.00</span></p></div>"#
    );
}
