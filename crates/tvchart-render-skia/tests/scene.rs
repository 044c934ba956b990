// File: crates/tvchart-render-skia/tests/scene.rs
// Purpose: The render flow builds the expected scene: series, data, markers, legends, size.

use serde_json::json;
use tvchart_core::{ChartBackend, ChartError, ChartPayload, PageSession, RawPayload, SeriesData, SeriesKind, Time};
use tvchart_render_skia::{Insets, PlotLayout, SceneBackend, SeriesStyle};

fn raw() -> RawPayload {
    let ohlc = json!({
        "type": "ohlc",
        "config": {"name": "BTC", "up_colour": "rgb(38,166,154)", "show_legend": true, "legend_index": 0},
        "series": [
            {"time": 100, "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0},
            {"time": 200, "open": 11.0, "high": 11.5, "low": 8.0, "close": 9.0}
        ]
    });
    let sma = json!({
        "type": "line",
        "config": {"name": "SMA 2", "colour": "#ff0000", "show_legend": true, "legend_index": 1},
        "series": [{"time": 200, "value": 10.0}]
    });
    let volume = json!({
        "type": "volume",
        "config": {"name": "Vol", "volume_colour_up": "green"},
        "series": [{"time": 100, "value": 500.0, "color": "green"}, {"time": 200, "value": 800.0, "color": "red"}]
    });
    RawPayload {
        config: json!({"backgroundColor": "#000000"}).to_string(),
        series: vec![ohlc.to_string(), sma.to_string(), volume.to_string()],
        events: Some(vec![json!({"time": 200, "text": "Sell @ 9", "position": "aboveBar"}).to_string()]),
        markers: None,
    }
}

fn rendered() -> PageSession<impl FnMut() -> tvchart_core::Result<RawPayload>, SceneBackend> {
    let mut session = PageSession::new(|| -> tvchart_core::Result<RawPayload> { Ok(raw()) }, SceneBackend::new(), "chart".to_string());
    session.on_ready().expect("render");
    session
}

#[test]
fn scene_holds_one_entry_per_series() {
    let session = rendered();
    let scene = session.renderer().expect("renderer").backend().scene();
    assert_eq!(scene.container.as_deref(), Some("chart"));
    assert_eq!(scene.options.background_color.as_deref(), Some("#000000"));
    let kinds: Vec<SeriesKind> = scene.series.iter().map(|s| s.kind()).collect();
    assert_eq!(kinds, vec![SeriesKind::Candlestick, SeriesKind::Line, SeriesKind::Volume]);
    assert_eq!(scene.series[0].len(), 2);
    match &scene.series[2].style {
        SeriesStyle::Histogram(o) => assert_eq!(o.scale_margins.top, 0.8),
        other => panic!("expected histogram style, got {other:?}"),
    }
}

#[test]
fn markers_land_on_the_candlestick_only() {
    let session = rendered();
    let scene = session.renderer().unwrap().backend().scene();
    assert_eq!(scene.series[0].markers.len(), 1);
    assert_eq!(scene.series[0].markers[0].time, Time::Timestamp(200));
    assert!(scene.series[1].markers.is_empty());
}

#[test]
fn legends_track_crosshair_and_resize_updates_size() {
    let mut session = rendered();
    let renderer = session.renderer_mut().unwrap();
    let event = renderer.crosshair_at(Time::Timestamp(200));
    renderer.on_crosshair_move(&event);
    renderer.on_container_resize(1024, 300);

    let scene = renderer.backend().scene();
    assert_eq!(scene.size(), (1024, 300));
    let values: Vec<&str> = scene.legends.iter().map(|l| l.text.as_ref().unwrap().value.as_str()).collect();
    assert_eq!(values, vec!["open: 11, high: 11.5, low: 8, close: 9", "10.00"]);
    assert_eq!(scene.legends[1].top_em, 1.5);
}

#[test]
fn ranges_cover_prices_and_volume_separately() {
    let session = rendered();
    let scene = session.renderer().unwrap().backend().scene();
    assert_eq!(scene.time_range(), Some((100, 200)));
    assert_eq!(scene.price_range(), Some((8.0, 12.0)));
    assert_eq!(scene.max_volume(), Some(800.0));

    let layout = PlotLayout::fit(scene, &Insets::default());
    assert!(layout.volume.top_px > layout.price.top_px);
    assert_eq!(layout.volume.bottom_px, layout.bottom);
    assert_eq!(layout.time.to_px(100), layout.left);
    assert_eq!(layout.time.to_px(200), layout.right);
    assert!(layout.price.to_px(12.0) > layout.top, "prices are padded away from the edge");
}

#[test]
fn mismatched_data_and_unknown_handles_are_refused() {
    let mut backend = SceneBackend::new();
    let options = tvchart_core::options::LineOptions::from_config(&Default::default());
    assert!(matches!(backend.add_line_series(&(), &options), Err(ChartError::Backend(_))));

    backend.create_chart(&"c".to_string(), &Default::default()).unwrap();
    assert!(backend.create_chart(&"c".to_string(), &Default::default()).is_err());
    let line = backend.add_line_series(&(), &options).unwrap();
    let err = backend.set_data(&line, &SeriesData::Candlestick(vec![])).unwrap_err();
    assert!(err.to_string().contains("ohlc data pushed to a line series"));
    assert!(backend.set_markers(&7, &[]).is_err());
}

#[test]
fn empty_payload_decodes_to_an_empty_scene() {
    let payload = ChartPayload::decode(&RawPayload::default()).unwrap();
    let mut r = tvchart_core::Renderer::new(SceneBackend::new(), "c".to_string(), payload.layout.clone()).unwrap();
    assert!(r.render(&payload).is_complete());
    let scene = r.into_backend().into_scene();
    assert!(scene.series.is_empty());
    assert_eq!(scene.time_range(), None);
    assert_eq!(scene.size(), (600, 400));
}

#[test]
fn impossible_business_day_fails_only_its_series() {
    let bad = json!({
        "type": "line",
        "config": {"name": "bad"},
        "series": [{"time": {"year": 2020, "month": 13, "day": 1}, "value": 1.0}]
    });
    let raw = RawPayload { series: vec![raw().series[0].clone(), bad.to_string()], ..RawPayload::default() };
    let payload = ChartPayload::decode(&raw).unwrap();
    let mut r = tvchart_core::Renderer::new(SceneBackend::new(), "c".to_string(), payload.layout.clone()).unwrap();
    let report = r.render(&payload);

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].index, 1);
    assert!(report.failed[0].reason.contains("2020-13-01"), "{}", report.failed[0].reason);
    let scene = r.backend().scene();
    assert_eq!(scene.series.len(), 1);
    assert_eq!(scene.time_range(), Some((100, 200)));
}

#[test]
fn time_scale_spans_the_full_timestamp_range() {
    let far = json!({
        "type": "line",
        "config": {"name": "far"},
        "series": [{"time": -9_000_000_000_000_000_000i64, "value": 1.0}, {"time": 9_000_000_000_000_000_000i64, "value": 2.0}]
    });
    let raw = RawPayload { series: vec![far.to_string()], ..RawPayload::default() };
    let payload = ChartPayload::decode(&raw).unwrap();
    let mut r = tvchart_core::Renderer::new(SceneBackend::new(), "c".to_string(), payload.layout.clone()).unwrap();
    assert!(r.render(&payload).is_complete());

    let layout = PlotLayout::fit(r.backend().scene(), &Insets::default());
    assert_eq!(layout.time.to_px(-9_000_000_000_000_000_000), layout.left);
    let mid = layout.time.to_px(0);
    assert!((mid - (layout.left + layout.right) / 2.0).abs() < 0.5, "{mid}");
    assert!(layout.time.to_px(i64::MIN).is_finite());
}

#[test]
fn newest_series_can_be_removed() {
    let mut backend = SceneBackend::new();
    let options = tvchart_core::options::LineOptions::from_config(&Default::default());
    backend.create_chart(&"c".to_string(), &Default::default()).unwrap();
    let first = backend.add_line_series(&(), &options).unwrap();
    let second = backend.add_line_series(&(), &options).unwrap();

    backend.remove_series(&(), first);
    assert_eq!(backend.scene().series.len(), 2, "older handles stay valid");
    backend.remove_series(&(), second);
    assert_eq!(backend.scene().series.len(), 1);
}
