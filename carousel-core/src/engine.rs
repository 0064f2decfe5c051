//! The carousel engine
//!
//! [`Carousel`] wires the track, index mapper, transition engine, input
//! coordinators, autoplay scheduler, lazy loader and lifecycle emitter
//! together behind one navigation entry point. The host owns the event loop:
//! it forwards raw input through [`Carousel::handle_input`] and calls
//! [`Carousel::tick`] whenever [`Carousel::next_deadline`] comes due.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::autoplay::{AutoplayScheduler, PauseReason};
use crate::clock::Clock;
use crate::element::{CarouselMount, ElementId};
use crate::error::{CarouselError, Result};
use crate::events::{CarouselEvent, LifecycleEmitter, ListenerId};
use crate::index::{IndexMapper, Step};
use crate::input::{
    ControlSet, Disposition, InputEvent, KeyCommand, KeyboardNavigator, Point,
    SwipeOutcome, SwipeRecognizer,
};
use crate::lazy::LazyAssetLoader;
use crate::options::CarouselOptions;
use crate::ports::{Arrow, EnvironmentPort, RenderAdapter, SlideRole, SubscriptionId};
use crate::track::PhysicalTrack;
use crate::transition::{TransitionEngine, TransitionState};

/// Where the engine is in its life.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Constructed, `init` not called yet.
    #[default]
    Unmounted,
    /// `init` hit a configuration error; every operation is a no-op.
    Inert(CarouselError),
    Ready,
    Destroyed,
}

/// Timers the engine owns, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Deadline {
    Settle,
    Autoplay,
    Resize,
}

pub struct Carousel<R: RenderAdapter, E: EnvironmentPort> {
    mount: CarouselMount,
    options: CarouselOptions,
    renderer: R,
    environment: E,
    clock: Box<dyn Clock>,
    lifecycle: Lifecycle,
    track: PhysicalTrack,
    transition: TransitionEngine,
    autoplay: AutoplayScheduler,
    swipe: SwipeRecognizer,
    keyboard: KeyboardNavigator,
    controls: ControlSet,
    lazy: LazyAssetLoader,
    events: LifecycleEmitter,
    subscriptions: Vec<SubscriptionId>,
    resize_due: Option<Instant>,
}

impl<R: RenderAdapter, E: EnvironmentPort> fmt::Debug for Carousel<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("lifecycle", &self.lifecycle)
            .field("current", &self.transition.current())
            .field("total", &self.track.total())
            .field("state", &self.transition.state())
            .field("autoplay", &self.autoplay)
            .field("listeners", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<R: RenderAdapter, E: EnvironmentPort> Carousel<R, E> {
    /// Capture the mount and options. Nothing touches the host until
    /// [`init`](Self::init).
    pub fn new<C: Clock>(
        mount: CarouselMount,
        options: CarouselOptions,
        renderer: R,
        environment: E,
        clock: C,
    ) -> Self {
        Self {
            swipe: SwipeRecognizer::new(options.swipe_threshold),
            keyboard: KeyboardNavigator::new(options.keyboard_enabled),
            autoplay: AutoplayScheduler::new(options.auto_play_interval, false),
            transition: TransitionEngine::new(
                IndexMapper::default(),
                options.animation_duration,
                options.settle_buffer,
            )
            .with_easing(options.easing),
            mount,
            options,
            renderer,
            environment,
            clock: Box::new(clock),
            lifecycle: Lifecycle::Unmounted,
            track: PhysicalTrack::default(),
            controls: ControlSet::default(),
            lazy: LazyAssetLoader::new(),
            events: LifecycleEmitter::new(),
            subscriptions: Vec::new(),
            resize_due: None,
        }
    }

    // ===== Lifecycle =====

    /// Build the track, generate missing controls, register global listeners
    /// and start autoplay when configured.
    ///
    /// Configuration errors are logged and leave the engine inert instead of
    /// being returned; see [`lifecycle`](Self::lifecycle).
    pub fn init(&mut self) {
        if self.lifecycle != Lifecycle::Unmounted {
            trace!(lifecycle = ?self.lifecycle, "carousel init ignored");
            return;
        }
        let container = match self.preflight() {
            Ok(container) => container,
            Err(err) => {
                warn!(error = %err, "carousel disabled by configuration error");
                self.lifecycle = Lifecycle::Inert(err);
                return;
            }
        };

        let total = self.mount.slides.len();
        self.track = PhysicalTrack::build(
            container,
            &self.mount.slides,
            self.options.looping,
            &mut self.renderer,
        );
        self.transition = TransitionEngine::new(
            IndexMapper::new(total, self.options.looping),
            self.options.animation_duration,
            self.options.settle_buffer,
        )
        .with_easing(self.options.easing);
        self.transition.place(&mut self.renderer);

        self.controls = ControlSet::mount(
            container,
            std::mem::take(&mut self.mount.controls),
            total,
            self.options.show_dots,
            self.options.show_arrows,
            &mut self.renderer,
        );
        self.swipe = SwipeRecognizer::new(self.options.swipe_threshold);
        self.keyboard = KeyboardNavigator::new(self.options.keyboard_enabled);
        self.autoplay =
            AutoplayScheduler::new(self.options.auto_play_interval, total > 1);

        self.subscriptions.push(self.environment.on_resize());
        self.subscriptions.push(self.environment.on_visibility_change());
        if self.keyboard.is_enabled() {
            self.subscriptions.push(self.environment.on_global_keydown());
        }

        self.lifecycle = Lifecycle::Ready;
        self.refresh_presentation();
        self.lazy.prime(
            &self.track,
            self.transition.resting_position(),
            &mut self.renderer,
        );

        if self.options.auto_play {
            self.autoplay.start(self.clock.now());
        }

        info!(
            total,
            looping = self.track.is_looping(),
            autoplay = self.autoplay.is_active(),
            "carousel initialised"
        );
    }

    fn preflight(&self) -> Result<ElementId> {
        let container =
            self.mount.container.ok_or(CarouselError::MissingContainer)?;
        if self.mount.slides.is_empty() {
            return Err(CarouselError::NoSlides);
        }
        self.options.validate()?;
        Ok(container)
    }

    /// Stop timers, drop global listeners and remove every element the engine
    /// created. Listeners are forgotten; the engine cannot be re-initialised.
    pub fn destroy(&mut self) {
        match self.lifecycle {
            Lifecycle::Ready => {}
            Lifecycle::Inert(_) | Lifecycle::Unmounted => {
                self.events.clear();
                self.lifecycle = Lifecycle::Destroyed;
                return;
            }
            Lifecycle::Destroyed => return,
        }

        if let Some(pending) = self.transition.abandon() {
            debug!(
                from = pending.from,
                to = pending.to,
                "abandoned in-flight transition"
            );
        }
        self.autoplay.clear();
        self.swipe.cancel();
        self.resize_due = None;

        for id in self.subscriptions.drain(..) {
            self.environment.unsubscribe(id);
        }
        self.controls.teardown(&mut self.renderer);
        let clones = self.track.teardown(&mut self.renderer);
        self.lazy.clear();
        self.events.clear();
        self.lifecycle = Lifecycle::Destroyed;

        info!(clones = clones.len(), "carousel destroyed");
    }

    // ===== Navigation =====

    /// Advance one slide, wrapping when looping. Returns whether the move was
    /// accepted.
    pub fn next_slide(&mut self) -> bool {
        self.catch_up();
        self.step(Step::Forward, self.clock.now())
    }

    /// Go back one slide, wrapping when looping.
    pub fn prev_slide(&mut self) -> bool {
        self.catch_up();
        self.step(Step::Backward, self.clock.now())
    }

    /// The single navigation entry point. Rejected while a transition is in
    /// flight, for the current index, for an out-of-range index and on an
    /// engine that is not ready.
    pub fn go_to_slide(&mut self, index: usize) -> bool {
        self.catch_up();
        self.navigate(index, Step::Jump, self.clock.now())
    }

    fn step(&mut self, step: Step, now: Instant) -> bool {
        if !self.is_ready() {
            trace!(?step, "navigation ignored: carousel not ready");
            return false;
        }
        let current = self.transition.current();
        match self.transition.mapper().step_target(current, step) {
            Some(next) => self.navigate(next, step, now),
            None => {
                trace!(?step, current, "navigation ignored: at the end");
                false
            }
        }
    }

    fn navigate(&mut self, next: usize, step: Step, now: Instant) -> bool {
        if !self.is_ready() {
            trace!(next, "navigation ignored: carousel not ready");
            return false;
        }
        match self.transition.begin(next, step, now) {
            Ok(pending) => {
                debug!(
                    from = pending.from,
                    to = pending.to,
                    ?step,
                    position = pending.target.position,
                    "navigating"
                );
                self.events.emit(&CarouselEvent::BeforeChange {
                    from: pending.from,
                    to: pending.to,
                });
                self.transition.animate(&pending, &mut self.renderer);
                true
            }
            Err(rejection) => {
                trace!(next, ?rejection, "navigation rejected");
                false
            }
        }
    }

    // ===== Autoplay =====

    /// Want autoplay. Returns whether the timer is running afterwards; it
    /// stays held while hover, a gesture or a hidden page pauses it.
    pub fn start_autoplay(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.catch_up();
        self.autoplay.start(self.clock.now())
    }

    /// Stop autoplay until it is explicitly started again.
    pub fn pause_autoplay(&mut self) {
        if self.is_ready() {
            self.catch_up();
            self.autoplay.stop();
        }
    }

    /// Returns whether autoplay runs afterwards.
    pub fn toggle_autoplay(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.catch_up();
        self.autoplay.toggle(self.clock.now())
    }

    // ===== Queries =====

    /// Settled logical index. Does not change until a transition settles.
    pub fn current_slide(&self) -> usize {
        self.transition.current()
    }

    pub fn total_slides(&self) -> usize {
        self.track.total()
    }

    /// Whether the autoplay timer is armed right now.
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_active()
    }

    pub fn is_in_transition(&self) -> bool {
        self.transition.is_transitioning()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn state(&self) -> TransitionState {
        self.transition.state()
    }

    pub fn options(&self) -> &CarouselOptions {
        &self.options
    }

    pub fn track(&self) -> &PhysicalTrack {
        &self.track
    }

    pub fn autoplay(&self) -> &AutoplayScheduler {
        &self.autoplay
    }

    pub fn lazy_loader(&self) -> &LazyAssetLoader {
        &self.lazy
    }

    /// Indicator element for `logical`, supplied or generated.
    pub fn indicator(&self, logical: usize) -> Option<ElementId> {
        self.controls.indicator(logical)
    }

    pub fn arrow(&self, arrow: Arrow) -> Option<ElementId> {
        self.controls.arrow(arrow)
    }

    /// Interpolated track offset in percent, for hosts that draw the motion
    /// frame by frame.
    pub fn visual_offset(&self) -> f32 {
        self.transition.visual_offset(self.clock.now())
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    // ===== Events =====

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CarouselEvent) -> anyhow::Result<()> + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ===== Input =====

    /// Route one host event to its coordinator.
    pub fn handle_input(&mut self, event: InputEvent) -> Disposition {
        if !self.is_ready() {
            return Disposition::Ignored;
        }
        self.catch_up();
        let now = self.clock.now();

        match event {
            InputEvent::PointerDown { x, y } => {
                if !self.options.swipe_enabled {
                    return Disposition::Ignored;
                }
                self.swipe.begin(Point::new(x, y));
                self.autoplay.suspend(PauseReason::Interaction);
                Disposition::Handled
            }
            InputEvent::PointerMove { x, y } => {
                if !self.swipe.is_tracking() {
                    Disposition::Ignored
                } else if self.swipe.track(Point::new(x, y)) {
                    Disposition::PreventDefault
                } else {
                    Disposition::Handled
                }
            }
            InputEvent::PointerUp { x, y } => {
                let Some(outcome) = self.swipe.finish(Point::new(x, y)) else {
                    return Disposition::Ignored;
                };
                trace!(?outcome, "swipe finished");
                match outcome {
                    SwipeOutcome::Next => {
                        self.step(Step::Forward, now);
                    }
                    SwipeOutcome::Prev => {
                        self.step(Step::Backward, now);
                    }
                    SwipeOutcome::Discarded => {}
                }
                self.end_interaction(now);
                Disposition::Handled
            }
            InputEvent::PointerCancel => {
                if self.swipe.cancel() {
                    self.end_interaction(now);
                    Disposition::Handled
                } else {
                    Disposition::Ignored
                }
            }
            InputEvent::PointerEnter => {
                if !self.options.pause_on_hover {
                    return Disposition::Ignored;
                }
                self.autoplay.suspend(PauseReason::Hover);
                Disposition::Handled
            }
            InputEvent::PointerLeave => {
                if !self.options.pause_on_hover {
                    return Disposition::Ignored;
                }
                self.autoplay.resume(PauseReason::Hover, now);
                Disposition::Handled
            }
            InputEvent::KeyDown { key, focus_within } => {
                let Some(command) = self.keyboard.interpret(key, focus_within)
                else {
                    return Disposition::Ignored;
                };
                let last = self.total_slides().saturating_sub(1);
                match command {
                    KeyCommand::Prev => {
                        self.step(Step::Backward, now);
                    }
                    KeyCommand::Next => {
                        self.step(Step::Forward, now);
                    }
                    KeyCommand::First => {
                        self.navigate(0, Step::Jump, now);
                    }
                    KeyCommand::Last => {
                        self.navigate(last, Step::Jump, now);
                    }
                    KeyCommand::ToggleAutoplay => {
                        self.autoplay.toggle(now);
                    }
                }
                Disposition::PreventDefault
            }
            InputEvent::Click { target } => {
                if let Some(index) = self.controls.indicator_index(target) {
                    self.navigate(index, Step::Jump, now);
                    Disposition::Handled
                } else if let Some(arrow) = self.controls.arrow_for(target) {
                    let step = match arrow {
                        Arrow::Prev => Step::Backward,
                        Arrow::Next => Step::Forward,
                    };
                    self.step(step, now);
                    Disposition::Handled
                } else {
                    Disposition::Ignored
                }
            }
            InputEvent::Resize => {
                self.resize_due = Some(now + self.options.resize_debounce);
                Disposition::Handled
            }
            InputEvent::VisibilityChanged { hidden } => {
                if hidden {
                    self.autoplay.suspend(PauseReason::PageHidden);
                } else {
                    self.autoplay.resume(PauseReason::PageHidden, now);
                }
                Disposition::Handled
            }
        }
    }

    fn end_interaction(&mut self, now: Instant) {
        if !self.options.resume_after_interaction {
            self.autoplay.stop();
        }
        self.autoplay.resume(PauseReason::Interaction, now);
    }

    // ===== Timers =====

    /// Process every deadline due at the clock's current instant, each at its
    /// own scheduled time. Returns how many deadlines ran.
    pub fn tick(&mut self) -> usize {
        if !self.is_ready() {
            return 0;
        }
        self.run_due(self.clock.now())
    }

    /// Earliest pending deadline, for hosts that sleep between ticks.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.is_ready() {
            return None;
        }
        self.next_due().map(|(at, _)| at)
    }

    fn catch_up(&mut self) {
        if self.is_ready() {
            self.run_due(self.clock.now());
        }
    }

    fn next_due(&self) -> Option<(Instant, Deadline)> {
        [
            (self.transition.settles_at(), Deadline::Settle),
            (self.autoplay.next_fire(), Deadline::Autoplay),
            (self.resize_due, Deadline::Resize),
        ]
        .into_iter()
        .filter_map(|(at, deadline)| at.map(|at| (at, deadline)))
        .min()
    }

    fn run_due(&mut self, now: Instant) -> usize {
        let mut processed = 0;
        while let Some((at, deadline)) = self.next_due() {
            if at > now {
                break;
            }
            match deadline {
                Deadline::Settle => self.finish_transition(at),
                Deadline::Autoplay => self.autoplay_tick(at),
                Deadline::Resize => self.finish_resize(),
            }
            processed += 1;
        }
        processed
    }

    fn finish_transition(&mut self, at: Instant) {
        let Some(settled) = self.transition.settle(at, &mut self.renderer)
        else {
            return;
        };
        self.refresh_presentation();
        debug!(from = settled.from, to = settled.to, "transition settled");

        if let Some(element) = self.track.real_element(settled.to) {
            self.events.emit(&CarouselEvent::Changed {
                from: settled.from,
                to: settled.to,
                element,
            });
        }
        self.lazy.prime(
            &self.track,
            self.transition.resting_position(),
            &mut self.renderer,
        );
    }

    fn autoplay_tick(&mut self, at: Instant) {
        if self.autoplay.fire(at) {
            trace!("autoplay tick");
            self.step(Step::Forward, at);
        }
    }

    fn finish_resize(&mut self) {
        self.resize_due = None;
        self.refresh_presentation();
        let current = self.transition.current();
        debug!(current, "resize settled");
        self.events.emit(&CarouselEvent::Resized { current });
    }

    /// Re-apply slot classification and control state for the settled index.
    fn refresh_presentation(&mut self) {
        let current = self.transition.current();
        for slot in self.track.slots() {
            let role = if slot.is_clone() {
                SlideRole::Clone
            } else if slot.logical == current {
                SlideRole::Current
            } else {
                SlideRole::Offscreen
            };
            self.renderer.classify_slide(slot.element, role);
        }
        self.controls.sync(
            current,
            self.track.total(),
            self.track.is_looping(),
            &mut self.renderer,
        );
    }
}
