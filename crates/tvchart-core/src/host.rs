// File: crates/tvchart-core/src/host.rs
// Summary: Host bridge seam and the page session gated on the host-ready notification.

use tracing::{info, warn};

use crate::backend::ChartBackend;
use crate::error::Result;
use crate::payload::{ChartPayload, RawPayload};
use crate::renderer::{RenderReport, Renderer};

/// Data source living on the host side of the embedded view.
pub trait HostBridge {
    fn request_data(&mut self) -> Result<RawPayload>;
}

impl<F> HostBridge for F
where
    F: FnMut() -> Result<RawPayload>,
{
    fn request_data(&mut self) -> Result<RawPayload> {
        self()
    }
}

enum SessionState<B: ChartBackend> {
    Waiting { backend: B, container: B::Container },
    Rendered { renderer: Renderer<B>, report: RenderReport },
    Failed,
}

/// One page load: waits for the ready signal, requests data once and renders it.
pub struct PageSession<H: HostBridge, B: ChartBackend> {
    bridge: H,
    state: SessionState<B>,
}

impl<H: HostBridge, B: ChartBackend> PageSession<H, B> {
    pub fn new(bridge: H, backend: B, container: B::Container) -> Self {
        Self { bridge, state: SessionState::Waiting { backend, container } }
    }

    /// Host-ready notification. The first call requests and renders the payload;
    /// later calls are ignored and return `Ok(None)`. A failed request is not retried.
    pub fn on_ready(&mut self) -> Result<Option<&RenderReport>> {
        let (backend, container) = match std::mem::replace(&mut self.state, SessionState::Failed) {
            SessionState::Waiting { backend, container } => (backend, container),
            other => {
                warn!("repeated ready notification ignored");
                self.state = other;
                return Ok(None);
            }
        };

        let raw = self.bridge.request_data()?;
        let payload = ChartPayload::decode(&raw)?;
        let mut renderer = Renderer::new(backend, container, payload.layout.clone())?;
        let report = renderer.render(&payload);
        info!(rendered = report.rendered.len(), "page session rendered");
        self.state = SessionState::Rendered { renderer, report };

        match &self.state {
            SessionState::Rendered { report, .. } => Ok(Some(report)),
            _ => Ok(None),
        }
    }

    pub fn renderer(&self) -> Option<&Renderer<B>> {
        match &self.state {
            SessionState::Rendered { renderer, .. } => Some(renderer),
            _ => None,
        }
    }

    pub fn renderer_mut(&mut self) -> Option<&mut Renderer<B>> {
        match &mut self.state {
            SessionState::Rendered { renderer, .. } => Some(renderer),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, SessionState::Failed)
    }
}
