//! Input coordinators
//!
//! Pointer, keyboard and control-click recognizers. None of them navigates on
//! its own: each one turns raw host events into a command the
//! [`Carousel`](crate::Carousel) routes through its single navigation entry
//! point.

pub mod controls;
pub mod keyboard;
pub mod pointer;

pub use controls::ControlSet;
pub use keyboard::{Key, KeyCommand, KeyboardNavigator};
pub use pointer::{Point, SwipeOutcome, SwipeRecognizer};

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// Raw event forwarded by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerCancel,
    /// Pointer entered the container (hover start).
    PointerEnter,
    /// Pointer left the container (hover end).
    PointerLeave,
    /// Key pressed anywhere in the document. `focus_within` tells whether
    /// focus is currently inside the carousel container.
    KeyDown { key: Key, focus_within: bool },
    /// Click on an indicator or arrow element.
    Click { target: ElementId },
    Resize,
    VisibilityChanged { hidden: bool },
}

/// What the host should do with the native event after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Not for the carousel; let it through untouched.
    Ignored,
    /// Consumed; default behaviour may still run.
    Handled,
    /// Consumed; suppress the default action (page scroll, key scroll).
    PreventDefault,
}

impl Disposition {
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::PreventDefault)
    }
}
