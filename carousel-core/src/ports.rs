//! Host-facing ports
//!
//! [`RenderAdapter`] turns engine decisions ("offset the track to -300%",
//! "this slide is a clone") into whatever the rendering surface needs.
//! [`EnvironmentPort`] stands in for window/document-level listeners. The
//! engine registers interest through it at init and drops it at destroy; the
//! host forwards the resulting events through
//! [`Carousel::handle_input`](crate::Carousel::handle_input).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// Presentation role of one slot on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideRole {
    /// The settled current slide: active, visible to assistive tooling.
    Current,
    /// A real slide that is not current: hidden from assistive tooling.
    Offscreen,
    /// An engine-owned clone: never active, never interactive, always hidden.
    Clone,
}

/// Where a boundary clone is inserted into the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClonePlacement {
    /// Before the first real slide.
    Start,
    /// After the last real slide.
    End,
}

/// Prev/next arrow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arrow {
    Prev,
    Next,
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev => write!(f, "prev"),
            Self::Next => write!(f, "next"),
        }
    }
}

/// Rendering surface the engine drives.
pub trait RenderAdapter {
    /// Duplicate `source`'s visual content into a new, non-interactive
    /// element placed at `placement` inside `container`.
    fn insert_clone(
        &mut self,
        container: ElementId,
        source: ElementId,
        placement: ClonePlacement,
    ) -> ElementId;

    /// Remove an element the engine created (clones, generated controls).
    fn remove_element(&mut self, element: ElementId);

    /// Enable or disable the timed visual transition on the track.
    fn set_transition_enabled(&mut self, enabled: bool);

    /// Set the track offset, in percent of one slide's width (negative moves
    /// the track left).
    fn set_offset(&mut self, percent: f32);

    /// Force a synchronous layout flush so an offset written with the
    /// transition disabled is applied before the transition is re-enabled.
    fn flush_layout(&mut self);

    /// Apply the active/hidden/clone classification to one slot.
    fn classify_slide(&mut self, element: ElementId, role: SlideRole);

    /// Generate an indicator for `logical` inside `container`.
    fn create_indicator(
        &mut self,
        container: ElementId,
        logical: usize,
    ) -> ElementId;

    /// Generate a prev/next arrow inside `container`.
    fn create_arrow(&mut self, container: ElementId, arrow: Arrow)
    -> ElementId;

    fn set_indicator_active(&mut self, indicator: ElementId, active: bool);

    fn set_arrow_disabled(&mut self, arrow: ElementId, disabled: bool);

    /// Promote the element's deferred media sources to active loading.
    fn load_deferred_media(&mut self, element: ElementId);
}

/// Global event sources the engine listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvSource {
    Resize,
    Visibility,
    GlobalKeydown,
}

/// Handle for one registration with the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Window/document-level listener registry.
pub trait EnvironmentPort {
    /// Start delivering `source` events to the carousel.
    fn subscribe(&mut self, source: EnvSource) -> SubscriptionId;

    /// Stop delivering events for a registration.
    fn unsubscribe(&mut self, id: SubscriptionId);

    fn on_resize(&mut self) -> SubscriptionId {
        self.subscribe(EnvSource::Resize)
    }

    fn on_visibility_change(&mut self) -> SubscriptionId {
        self.subscribe(EnvSource::Visibility)
    }

    fn on_global_keydown(&mut self) -> SubscriptionId {
        self.subscribe(EnvSource::GlobalKeydown)
    }
}
