//! Wall-clock runs
//!
//! The engine owns no timers. This loop sleeps on tokio until the engine's
//! next deadline (or the end of the run) and calls `tick`, which is all a
//! real host event loop has to do.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use carousel_core::testing::mount;
use carousel_core::{Carousel, CarouselOptions, Lifecycle, SystemClock};
use tokio::time;
use tracing::{debug, info};

use crate::output::{OutputFormat, Record, Summary, write_record};
use crate::script::ScriptStep;
use crate::simulate::{HeadlessCarousel, apply_step};
use crate::surface::{TracingEnvironment, TracingRenderer};

#[derive(Debug, Clone)]
pub struct RealtimeRun {
    pub slides: usize,
    pub options: CarouselOptions,
    /// Applied in order; `wait` steps sleep for real.
    pub steps: Vec<ScriptStep>,
    /// How long to keep running after the last step.
    pub duration: Duration,
    pub format: OutputFormat,
}

impl RealtimeRun {
    /// Drive the carousel until the steps and `duration` have elapsed. Events
    /// are written to stdout as they happen.
    pub async fn execute(self) -> anyhow::Result<Summary> {
        let started = Instant::now();
        let mut carousel: HeadlessCarousel = Carousel::new(
            mount(self.slides),
            self.options,
            TracingRenderer::new(),
            TracingEnvironment::new(),
            SystemClock,
        );

        let format = self.format;
        carousel.subscribe(move |event| {
            let record = Record::event(started.elapsed(), *event);
            write_record(&mut io::stdout().lock(), format, &record)
                .context("failed to write event")
        });
        carousel.init();
        if let Lifecycle::Inert(err) = carousel.lifecycle() {
            bail!("carousel did not start: {err}");
        }
        info!(slides = self.slides, "real-time run started");

        for step in self.steps {
            match step {
                ScriptStep::Wait(duration) => {
                    drive(&mut carousel, duration).await;
                }
                other => {
                    let accepted = apply_step(&mut carousel, other);
                    debug!(step = %other, ?accepted, "applied step");
                }
            }
        }
        drive(&mut carousel, self.duration).await;

        let summary = Summary::capture(&carousel, started.elapsed());
        carousel.destroy();
        io::stdout().flush().context("failed to flush stdout")?;
        Ok(summary)
    }
}

/// Sleep from deadline to deadline for `duration`, ticking at each one.
async fn drive(carousel: &mut HeadlessCarousel, duration: Duration) {
    let end = time::Instant::now() + duration;
    loop {
        let wake = carousel
            .next_deadline()
            .map(time::Instant::from_std)
            .map_or(end, |due| due.min(end));
        time::sleep_until(wake).await;
        carousel.tick();
        if wake >= end {
            break;
        }
    }
}
