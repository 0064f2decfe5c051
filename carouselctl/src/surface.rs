//! In-memory rendering surface for the CLI
//!
//! Wraps the recording adapters from [`carousel_core::testing`] and mirrors
//! every call to `tracing`, so `RUST_LOG=carouselctl=trace` shows exactly
//! what a browser host would have been told to do.

use carousel_core::testing::{RecordingEnvironment, RecordingRenderer};
use carousel_core::{
    Arrow, ClonePlacement, ElementId, EnvSource, EnvironmentPort,
    RenderAdapter, SlideRole, SubscriptionId,
};
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct TracingRenderer {
    inner: RecordingRenderer,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> &RecordingRenderer {
        &self.inner
    }
}

impl RenderAdapter for TracingRenderer {
    fn insert_clone(
        &mut self,
        container: ElementId,
        source: ElementId,
        placement: ClonePlacement,
    ) -> ElementId {
        let clone = self.inner.insert_clone(container, source, placement);
        debug!(%source, %clone, ?placement, "insert clone");
        clone
    }

    fn remove_element(&mut self, element: ElementId) {
        debug!(%element, "remove element");
        self.inner.remove_element(element);
    }

    fn set_transition_enabled(&mut self, enabled: bool) {
        trace!(enabled, "transition");
        self.inner.set_transition_enabled(enabled);
    }

    fn set_offset(&mut self, percent: f32) {
        trace!(percent, animated = self.inner.transition_enabled(), "offset");
        self.inner.set_offset(percent);
    }

    fn flush_layout(&mut self) {
        trace!("flush layout");
        self.inner.flush_layout();
    }

    fn classify_slide(&mut self, element: ElementId, role: SlideRole) {
        trace!(%element, ?role, "classify");
        self.inner.classify_slide(element, role);
    }

    fn create_indicator(
        &mut self,
        container: ElementId,
        logical: usize,
    ) -> ElementId {
        let element = self.inner.create_indicator(container, logical);
        debug!(%element, logical, "create indicator");
        element
    }

    fn create_arrow(
        &mut self,
        container: ElementId,
        arrow: Arrow,
    ) -> ElementId {
        let element = self.inner.create_arrow(container, arrow);
        debug!(%element, %arrow, "create arrow");
        element
    }

    fn set_indicator_active(&mut self, indicator: ElementId, active: bool) {
        trace!(%indicator, active, "indicator");
        self.inner.set_indicator_active(indicator, active);
    }

    fn set_arrow_disabled(&mut self, arrow: ElementId, disabled: bool) {
        trace!(%arrow, disabled, "arrow");
        self.inner.set_arrow_disabled(arrow, disabled);
    }

    fn load_deferred_media(&mut self, element: ElementId) {
        debug!(%element, "load deferred media");
        self.inner.load_deferred_media(element);
    }
}

#[derive(Debug, Default)]
pub struct TracingEnvironment {
    inner: RecordingEnvironment,
}

impl TracingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &RecordingEnvironment {
        &self.inner
    }
}

impl EnvironmentPort for TracingEnvironment {
    fn subscribe(&mut self, source: EnvSource) -> SubscriptionId {
        let id = self.inner.subscribe(source);
        debug!(?source, id = id.0, "environment subscribe");
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        debug!(id = id.0, "environment unsubscribe");
        self.inner.unsubscribe(id);
    }
}
