// File: crates/tvchart-core/tests/host.rs
// Purpose: Page session gating: one data request per page load, failures stay failed.

use std::cell::Cell;

use serde_json::json;
use tvchart_core::testing::RecordingBackend;
use tvchart_core::{ChartError, PageSession, RawPayload, SeriesKind};

fn payload() -> RawPayload {
    RawPayload {
        config: String::new(),
        series: vec![json!({"type": "line", "config": {"name": "L"}, "series": [{"time": 1, "value": 2.0}]}).to_string()],
        events: None,
        markers: None,
    }
}

#[test]
fn nothing_happens_before_ready() {
    let requests = Cell::new(0);
    let session = PageSession::new(
        || -> tvchart_core::Result<RawPayload> {
            requests.set(requests.get() + 1);
            Ok(payload())
        },
        RecordingBackend::new(),
        "c".to_string(),
    );
    assert_eq!(requests.get(), 0);
    assert!(session.renderer().is_none());
    assert!(!session.is_failed());
}

#[test]
fn ready_requests_once_and_renders() {
    let requests = Cell::new(0);
    let mut session = PageSession::new(
        || -> tvchart_core::Result<RawPayload> {
            requests.set(requests.get() + 1);
            Ok(payload())
        },
        RecordingBackend::new(),
        "c".to_string(),
    );

    let report = session.on_ready().expect("render").expect("first ready renders");
    assert!(report.is_complete());
    assert_eq!(report.rendered.len(), 1);

    assert!(session.on_ready().expect("ignored").is_none());
    assert_eq!(requests.get(), 1);

    let renderer = session.renderer().expect("rendered");
    assert_eq!(renderer.backend().added_kinds(), vec![SeriesKind::Line]);
    // Empty config text means the default layout.
    assert_eq!(renderer.size(), (600, 400));
}

#[test]
fn failed_request_is_not_retried() {
    let requests = Cell::new(0);
    let mut session = PageSession::new(
        || -> tvchart_core::Result<RawPayload> {
            requests.set(requests.get() + 1);
            Err(ChartError::Backend("host went away".into()))
        },
        RecordingBackend::new(),
        "c".to_string(),
    );

    assert!(matches!(session.on_ready(), Err(ChartError::Backend(_))));
    assert!(session.is_failed());
    assert!(session.on_ready().expect("ignored").is_none());
    assert_eq!(requests.get(), 1);
}

#[test]
fn undecodable_payload_fails_the_session() {
    let mut session = PageSession::new(
        || -> tvchart_core::Result<RawPayload> { Ok(RawPayload { config: "{".into(), ..payload() }) },
        RecordingBackend::new(),
        "c".to_string(),
    );
    assert!(matches!(session.on_ready(), Err(ChartError::Json { .. })));
    assert!(session.renderer().is_none());
}
