//! Host-owned render handles
//!
//! The engine never inspects what a handle points at. It only passes handles
//! back to the [`RenderAdapter`](crate::ports::RenderAdapter).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to an element on the host rendering surface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Controls the host already rendered inside the container. Missing ones are
/// generated at init when `show_dots` / `show_arrows` ask for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Controls {
    /// One indicator per logical slide, in order.
    pub indicators: Vec<ElementId>,
    pub prev_arrow: Option<ElementId>,
    pub next_arrow: Option<ElementId>,
}

/// Everything the engine reads from the host at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselMount {
    /// Track container. `None` models a selector that matched nothing.
    pub container: Option<ElementId>,
    /// Real slides discovered in the container, in logical order.
    pub slides: Vec<ElementId>,
    pub controls: Controls,
}

impl CarouselMount {
    pub fn new(container: ElementId, slides: Vec<ElementId>) -> Self {
        Self {
            container: Some(container),
            slides,
            controls: Controls::default(),
        }
    }

    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }
}
