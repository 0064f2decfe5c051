//! Headless runs on a virtual clock

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use carousel_core::testing::mount;
use carousel_core::{
    Carousel, CarouselOptions, Clock, EnvironmentPort, InputEvent, Lifecycle,
    ManualClock, RenderAdapter,
};
use tracing::debug;

use crate::output::{Record, Summary, millis};
use crate::script::ScriptStep;
use crate::surface::{TracingEnvironment, TracingRenderer};

/// Where a simulated swipe starts, in container pixels.
const SWIPE_ORIGIN: (f32, f32) = (200.0, 100.0);

pub type HeadlessCarousel = Carousel<TracingRenderer, TracingEnvironment>;

/// Apply one non-`wait` step. Returns whether the engine took it, for the
/// steps that can be refused.
pub fn apply_step<R, E>(
    carousel: &mut Carousel<R, E>,
    step: ScriptStep,
) -> Option<bool>
where
    R: RenderAdapter,
    E: EnvironmentPort,
{
    match step {
        ScriptStep::Next => Some(carousel.next_slide()),
        ScriptStep::Prev => Some(carousel.prev_slide()),
        ScriptStep::Goto(index) => Some(carousel.go_to_slide(index)),
        ScriptStep::Play => Some(carousel.start_autoplay()),
        ScriptStep::Pause => {
            carousel.pause_autoplay();
            None
        }
        ScriptStep::Toggle => {
            carousel.toggle_autoplay();
            None
        }
        ScriptStep::Swipe { dx, dy } => {
            let (x, y) = SWIPE_ORIGIN;
            carousel.handle_input(InputEvent::PointerDown { x, y });
            carousel.handle_input(InputEvent::PointerMove {
                x: x + dx / 2.0,
                y: y + dy / 2.0,
            });
            carousel.handle_input(InputEvent::PointerUp {
                x: x + dx,
                y: y + dy,
            });
            None
        }
        ScriptStep::Key(key) => {
            carousel.handle_input(InputEvent::KeyDown {
                key,
                focus_within: true,
            });
            None
        }
        ScriptStep::Hover(true) => {
            carousel.handle_input(InputEvent::PointerEnter);
            None
        }
        ScriptStep::Hover(false) => {
            carousel.handle_input(InputEvent::PointerLeave);
            None
        }
        ScriptStep::Hidden(hidden) => {
            carousel.handle_input(InputEvent::VisibilityChanged { hidden });
            None
        }
        ScriptStep::Resize => {
            carousel.handle_input(InputEvent::Resize);
            None
        }
        ScriptStep::Wait(_) => None,
    }
}

/// A carousel of `slides` generated slides on a [`ManualClock`], with every
/// lifecycle event captured as a [`Record`].
#[derive(Debug)]
pub struct Simulation {
    carousel: HeadlessCarousel,
    clock: ManualClock,
    records: Rc<RefCell<Vec<Record>>>,
}

impl Simulation {
    pub fn new(slides: usize, options: CarouselOptions) -> Self {
        let clock = ManualClock::new();
        let mut carousel = Carousel::new(
            mount(slides),
            options,
            TracingRenderer::new(),
            TracingEnvironment::new(),
            clock.clone(),
        );
        let records: Rc<RefCell<Vec<Record>>> = Rc::default();

        let sink = Rc::clone(&records);
        let timer = clock.clone();
        carousel.subscribe(move |event| {
            sink.borrow_mut().push(Record::event(timer.elapsed(), *event));
            Ok(())
        });
        carousel.init();

        Self {
            carousel,
            clock,
            records,
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        self.carousel.lifecycle()
    }

    pub fn carousel(&self) -> &HeadlessCarousel {
        &self.carousel
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn step(&mut self, step: ScriptStep) {
        let at_ms = millis(self.clock.elapsed());
        let index = {
            let mut records = self.records.borrow_mut();
            records.push(Record::Step {
                at_ms,
                step: step.to_string(),
                accepted: None,
            });
            records.len() - 1
        };

        let accepted = match step {
            ScriptStep::Wait(duration) => {
                self.wait(duration);
                None
            }
            other => apply_step(&mut self.carousel, other),
        };
        if let Some(Record::Step { accepted: slot, .. }) =
            self.records.borrow_mut().get_mut(index)
        {
            *slot = accepted;
        }
    }

    /// Run every step, then append the final [`Summary`].
    pub fn run<I>(&mut self, steps: I) -> Vec<Record>
    where
        I: IntoIterator<Item = ScriptStep>,
    {
        for step in steps {
            self.step(step);
        }
        let mut records = self.take_records();
        records.push(Record::Summary(self.summary()));
        records
    }

    /// Advance virtual time by `duration`, stopping at every deadline on the
    /// way so each one runs at its own instant.
    pub fn wait(&mut self, duration: Duration) {
        let target = self.clock.now() + duration;
        while let Some(due) = self.carousel.next_deadline() {
            if due > target {
                break;
            }
            self.clock.advance_to(due);
            if self.carousel.tick() == 0 {
                break;
            }
        }
        self.clock.advance_to(target);
        let ran = self.carousel.tick();
        debug!(
            elapsed = ?self.clock.elapsed(),
            ran,
            "virtual wait finished"
        );
    }

    pub fn take_records(&mut self) -> Vec<Record> {
        std::mem::take(&mut *self.records.borrow_mut())
    }

    pub fn summary(&self) -> Summary {
        Summary::capture(&self.carousel, self.clock.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use carousel_core::{CarouselEvent, ElementId};

    use super::*;
    use crate::script::parse_script;

    fn quiet() -> CarouselOptions {
        CarouselOptions {
            auto_play: false,
            ..CarouselOptions::default()
        }
    }

    fn events(records: &[Record]) -> Vec<(u64, CarouselEvent)> {
        records
            .iter()
            .filter_map(|record| match record {
                Record::Event { at_ms, event } => Some((*at_ms, *event)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn navigation_is_timestamped_on_the_virtual_clock() {
        let mut sim = Simulation::new(4, quiet());
        let records = sim.run(parse_script("next; wait 1s").unwrap());

        assert_eq!(
            events(&records),
            vec![
                (0, CarouselEvent::BeforeChange { from: 0, to: 1 }),
                (
                    650,
                    CarouselEvent::Changed {
                        from: 0,
                        to: 1,
                        element: ElementId(101),
                    }
                ),
            ]
        );
        assert_eq!(
            records.last(),
            Some(&Record::Summary(Summary {
                elapsed_ms: 1000,
                current: 1,
                total: 4,
                autoplaying: false,
                in_transition: false,
            }))
        );
    }

    #[test]
    fn locked_navigation_is_reported_as_ignored() {
        let mut sim = Simulation::new(3, quiet());
        let records = sim.run(parse_script("next; next").unwrap());
        let accepted: Vec<_> = records
            .iter()
            .filter_map(|record| match record {
                Record::Step { accepted, .. } => Some(*accepted),
                _ => None,
            })
            .collect();
        assert_eq!(accepted, vec![Some(true), Some(false)]);
    }

    #[test]
    fn autoplay_fires_at_each_interval() {
        let mut sim = Simulation::new(3, CarouselOptions::default());
        let records = sim.run([ScriptStep::Wait(Duration::from_millis(10_700))]);
        let before: Vec<u64> = events(&records)
            .into_iter()
            .filter(|(_, event)| matches!(event, CarouselEvent::BeforeChange { .. }))
            .map(|(at, _)| at)
            .collect();
        assert_eq!(before, vec![5000, 10_000]);
        assert_eq!(sim.carousel().current_slide(), 2);
    }

    #[test]
    fn swipe_left_moves_forward() {
        let mut sim = Simulation::new(3, quiet());
        sim.run(parse_script("swipe -120 4; wait 700ms").unwrap());
        assert_eq!(sim.carousel().current_slide(), 1);
    }

    #[test]
    fn wrap_through_the_leading_clone() {
        let mut sim = Simulation::new(4, quiet());
        sim.run(parse_script("key left; wait 700ms").unwrap());
        assert_eq!(sim.carousel().current_slide(), 3);
        let surface = sim.carousel().renderer().surface();
        assert!(surface.transition_enabled());
        assert_eq!(surface.offset(), -400.0);
    }

    #[test]
    fn zero_slides_leave_the_engine_inert() {
        let sim = Simulation::new(0, quiet());
        assert!(matches!(sim.lifecycle(), Lifecycle::Inert(_)));
    }
}
