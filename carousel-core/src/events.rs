//! Lifecycle notifications
//!
//! Listeners run synchronously, in subscription order. A listener that
//! returns an error or panics is logged and skipped; the remaining listeners
//! still run and the state change that triggered the event is never undone.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::warn;

use crate::element::ElementId;

/// Change event delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CarouselEvent {
    /// A move was accepted and is about to animate.
    BeforeChange { from: usize, to: usize },
    /// A move settled; `element` is the new current slide's handle.
    Changed {
        from: usize,
        to: usize,
        element: ElementId,
    },
    /// Visibility bookkeeping was refreshed after a debounced resize.
    Resized { current: usize },
}

impl CarouselEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeChange { .. } => "before-change",
            Self::Changed { .. } => "changed",
            Self::Resized { .. } => "resized",
        }
    }
}

impl fmt::Display for CarouselEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeforeChange { from, to } => {
                write!(f, "before-change {from} -> {to}")
            }
            Self::Changed { from, to, element } => {
                write!(f, "changed {from} -> {to} ({element})")
            }
            Self::Resized { current } => write!(f, "resized at {current}"),
        }
    }
}

/// Handle returned by [`LifecycleEmitter::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub type Listener = Box<dyn FnMut(&CarouselEvent) -> anyhow::Result<()>>;

#[derive(Default)]
pub struct LifecycleEmitter {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl fmt::Debug for LifecycleEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleEmitter")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl LifecycleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CarouselEvent) -> anyhow::Result<()> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener. Returns how many listeners failed.
    pub fn emit(&mut self, event: &CarouselEvent) -> usize {
        let mut failures = 0;
        for (id, listener) in &mut self.listeners {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failures += 1;
                    warn!(
                        listener = ?id,
                        event = event.name(),
                        error = %err,
                        "carousel listener failed"
                    );
                }
                Err(_) => {
                    failures += 1;
                    warn!(
                        listener = ?id,
                        event = event.name(),
                        "carousel listener panicked"
                    );
                }
            }
        }
        failures
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
