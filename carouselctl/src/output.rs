//! Report records and their text / JSON-lines rendering

use std::io::{self, Write};
use std::time::Duration;

use carousel_core::{Carousel, CarouselEvent, EnvironmentPort, RenderAdapter};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// One line of simulator output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Record {
    /// A script step was applied. `accepted` is set for steps that can be
    /// refused (navigation while locked, `play` with nothing to play).
    Step {
        at_ms: u64,
        step: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        accepted: Option<bool>,
    },
    Event {
        at_ms: u64,
        #[serde(flatten)]
        event: CarouselEvent,
    },
    Summary(Summary),
}

impl Record {
    pub fn event(elapsed: Duration, event: CarouselEvent) -> Self {
        Self::Event {
            at_ms: millis(elapsed),
            event,
        }
    }

    pub fn at_ms(&self) -> u64 {
        match self {
            Self::Step { at_ms, .. } | Self::Event { at_ms, .. } => *at_ms,
            Self::Summary(summary) => summary.elapsed_ms,
        }
    }
}

/// Engine state when a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub elapsed_ms: u64,
    pub current: usize,
    pub total: usize,
    pub autoplaying: bool,
    pub in_transition: bool,
}

impl Summary {
    pub fn capture<R, E>(carousel: &Carousel<R, E>, elapsed: Duration) -> Self
    where
        R: RenderAdapter,
        E: EnvironmentPort,
    {
        Self {
            elapsed_ms: millis(elapsed),
            current: carousel.current_slide(),
            total: carousel.total_slides(),
            autoplaying: carousel.is_autoplaying(),
            in_transition: carousel.is_in_transition(),
        }
    }
}

pub fn write_record<W: Write>(
    out: &mut W,
    format: OutputFormat,
    record: &Record,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, record)?;
            writeln!(out)
        }
        OutputFormat::Text => match record {
            Record::Step {
                at_ms,
                step,
                accepted,
            } => {
                let note = match accepted {
                    Some(false) => " (ignored)",
                    _ => "",
                };
                writeln!(out, "{at_ms:>8} ms  > {step}{note}")
            }
            Record::Event { at_ms, event } => {
                writeln!(out, "{at_ms:>8} ms    {event}")
            }
            Record::Summary(summary) => writeln!(
                out,
                "final: slide {} of {} after {} ms, autoplay {}, {}",
                summary.current + 1,
                summary.total,
                summary.elapsed_ms,
                if summary.autoplaying { "on" } else { "off" },
                if summary.in_transition {
                    "in transition"
                } else {
                    "settled"
                },
            ),
        },
    }
}

pub(crate) fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use carousel_core::ElementId;

    use super::*;

    fn render(format: OutputFormat, record: &Record) -> String {
        let mut out = Vec::new();
        write_record(&mut out, format, record).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn events_flatten_into_json_lines() {
        let record = Record::event(
            Duration::from_millis(650),
            CarouselEvent::Changed {
                from: 0,
                to: 1,
                element: ElementId(101),
            },
        );
        let line = render(OutputFormat::Json, &record);
        assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["kind"], "event");
        assert_eq!(value["event"], "changed");
        assert_eq!(value["at_ms"], 650);
        assert_eq!(value["element"], 101);
    }

    #[test]
    fn refused_steps_are_marked_in_text() {
        let record = Record::Step {
            at_ms: 100,
            step: "next".into(),
            accepted: Some(false),
        };
        assert_eq!(
            render(OutputFormat::Text, &record),
            "     100 ms  > next (ignored)\n"
        );
    }

    #[test]
    fn summary_counts_slides_from_one() {
        let record = Record::Summary(Summary {
            elapsed_ms: 7000,
            current: 1,
            total: 4,
            autoplaying: true,
            in_transition: false,
        });
        assert_eq!(
            render(OutputFormat::Text, &record),
            "final: slide 2 of 4 after 7000 ms, autoplay on, settled\n"
        );
        let json = render(OutputFormat::Json, &record);
        assert!(json.contains("\"kind\":\"summary\""));
        assert_eq!(record.at_ms(), 7000);
    }
}
