//! Mounts, event capture and a ready-made headless harness

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::clock::ManualClock;
use crate::element::{CarouselMount, Controls, ElementId};
use crate::engine::Carousel;
use crate::events::CarouselEvent;
use crate::options::CarouselOptions;

use super::{RecordingEnvironment, RecordingRenderer};

/// Container handle used by [`mount`].
pub const CONTAINER: ElementId = ElementId(1);

/// Handle of the first slide created by [`mount`]; slide `i` is
/// `FIRST_SLIDE + i`.
pub const FIRST_SLIDE: u64 = 100;

/// Mount with `slides` real slides and no host controls.
pub fn mount(slides: usize) -> CarouselMount {
    let slides = (0..slides as u64)
        .map(|i| ElementId(FIRST_SLIDE + i))
        .collect();
    CarouselMount::new(CONTAINER, slides)
}

/// Mount with host-supplied indicators (`500 + i`) and arrows (`600`, `601`).
pub fn mount_with_controls(slides: usize) -> CarouselMount {
    let controls = Controls {
        indicators: (0..slides as u64).map(|i| ElementId(500 + i)).collect(),
        prev_arrow: Some(ElementId(600)),
        next_arrow: Some(ElementId(601)),
    };
    mount(slides).with_controls(controls)
}

/// Listener sink that keeps every event it sees.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<CarouselEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener closure to hand to [`Carousel::subscribe`].
    pub fn listener(
        &self,
    ) -> impl FnMut(&CarouselEvent) -> anyhow::Result<()> + 'static {
        let events = Rc::clone(&self.events);
        move |event| {
            events.borrow_mut().push(*event);
            Ok(())
        }
    }

    pub fn events(&self) -> Vec<CarouselEvent> {
        self.events.borrow().clone()
    }

    pub fn before_changes(&self) -> usize {
        self.count(|e| matches!(e, CarouselEvent::BeforeChange { .. }))
    }

    pub fn changes(&self) -> usize {
        self.count(|e| matches!(e, CarouselEvent::Changed { .. }))
    }

    pub fn resizes(&self) -> usize {
        self.count(|e| matches!(e, CarouselEvent::Resized { .. }))
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn count(&self, pred: impl Fn(&CarouselEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

/// Initialised carousel on a manual clock with an event recorder attached.
#[derive(Debug)]
pub struct Harness {
    pub carousel: Carousel<RecordingRenderer, RecordingEnvironment>,
    pub clock: ManualClock,
    pub events: EventRecorder,
}

impl Harness {
    pub fn new(mount: CarouselMount, options: CarouselOptions) -> Self {
        let clock = ManualClock::new();
        let mut carousel = Carousel::new(
            mount,
            options,
            RecordingRenderer::new(),
            RecordingEnvironment::new(),
            clock.clone(),
        );
        let events = EventRecorder::new();
        carousel.subscribe(events.listener());
        carousel.init();
        Self {
            carousel,
            clock,
            events,
        }
    }

    /// `slides` slides, default options with autoplay off.
    pub fn with_slides(slides: usize) -> Self {
        Self::new(
            mount(slides),
            CarouselOptions {
                auto_play: false,
                ..CarouselOptions::default()
            },
        )
    }

    /// Move the clock forward by `millis` and process what came due.
    pub fn advance_ms(&mut self, millis: u64) -> usize {
        self.clock.advance_ms(millis);
        self.carousel.tick()
    }

    /// Move the clock past the settlement window and process it.
    pub fn settle(&mut self) -> usize {
        let window = self.carousel.options().settlement_window();
        self.clock.advance(window);
        self.carousel.tick()
    }

    /// Advance by `duration` in frame-sized steps, ticking each frame.
    pub fn run_for(&mut self, duration: Duration, frame: Duration) -> usize {
        if frame.is_zero() {
            self.clock.advance(duration);
            return self.carousel.tick();
        }
        let mut elapsed = Duration::ZERO;
        let mut processed = 0;
        while elapsed < duration {
            let step = frame.min(duration - elapsed);
            self.clock.advance(step);
            processed += self.carousel.tick();
            elapsed += step;
        }
        processed
    }
}
