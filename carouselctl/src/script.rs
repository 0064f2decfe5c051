//! Simulation scripts
//!
//! One step per line (or several separated by `;`). `#` starts a comment.
//!
//! ```text
//! # swipe left twice, then let autoplay take over
//! swipe -120 4
//! wait 700ms
//! swipe -120 4; wait 6s
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use carousel_core::Key;
use carousel_core::constants::limits::MAX_DURATION_MS;
use carousel_core::input::keyboard::UnknownKey;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Next,
    Prev,
    Goto(usize),
    /// Let virtual time pass, firing every deadline on the way.
    Wait(Duration),
    /// Press, drag and release with the given horizontal/vertical travel.
    Swipe { dx: f32, dy: f32 },
    Key(Key),
    Hover(bool),
    Hidden(bool),
    Resize,
    Play,
    Pause,
    Toggle,
}

impl fmt::Display for ScriptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |on: bool| if on { "on" } else { "off" };
        match self {
            Self::Next => f.write_str("next"),
            Self::Prev => f.write_str("prev"),
            Self::Goto(index) => write!(f, "goto {index}"),
            Self::Wait(duration) => {
                write!(f, "wait {}", humantime::format_duration(*duration))
            }
            Self::Swipe { dx, dy } => write!(f, "swipe {dx} {dy}"),
            Self::Key(key) => write!(f, "key {key}"),
            Self::Hover(on) => write!(f, "hover {}", on_off(*on)),
            Self::Hidden(on) => write!(f, "hidden {}", on_off(*on)),
            Self::Resize => f.write_str("resize"),
            Self::Play => f.write_str("play"),
            Self::Pause => f.write_str("pause"),
            Self::Toggle => f.write_str("toggle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepError {
    #[error("unknown step `{0}`")]
    UnknownStep(String),
    #[error("`{step}` expects {expected}")]
    MissingArgument {
        step: &'static str,
        expected: &'static str,
    },
    #[error("`{step}` takes no more than {max} argument(s)")]
    TrailingArgument { step: &'static str, max: usize },
    #[error("`{0}` is not a slide index")]
    InvalidIndex(String),
    #[error("`{0}` is not a distance in pixels")]
    InvalidDistance(String),
    #[error("invalid duration `{value}`: {reason}")]
    InvalidDuration { value: String, reason: String },
    #[error(transparent)]
    InvalidKey(#[from] UnknownKey),
    #[error("expected on or off, got `{0}`")]
    InvalidSwitch(String),
}

/// Parse failure with the 1-based line it happened on.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: StepError,
}

impl FromStr for ScriptStep {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(command) = words.next() else {
            return Err(StepError::UnknownStep(String::new()));
        };
        let args: Vec<&str> = words.collect();

        let step = match command.to_ascii_lowercase().as_str() {
            "next" => bare(&args, "next", Self::Next)?,
            "prev" => bare(&args, "prev", Self::Prev)?,
            "resize" => bare(&args, "resize", Self::Resize)?,
            "play" => bare(&args, "play", Self::Play)?,
            "pause" => bare(&args, "pause", Self::Pause)?,
            "toggle" => bare(&args, "toggle", Self::Toggle)?,
            "goto" => {
                let raw = single(&args, "goto", "a slide index")?;
                raw.parse()
                    .map(Self::Goto)
                    .map_err(|_| StepError::InvalidIndex(raw.to_string()))?
            }
            "wait" => {
                // `wait 1m 30s` is one duration
                if args.is_empty() {
                    return Err(StepError::MissingArgument {
                        step: "wait",
                        expected: "a duration such as 700ms",
                    });
                }
                Self::Wait(parse_duration(&args.join(" "))?)
            }
            "swipe" => {
                let [dx, dy] = args.as_slice() else {
                    return Err(match args.len() {
                        0 | 1 => StepError::MissingArgument {
                            step: "swipe",
                            expected: "horizontal and vertical travel",
                        },
                        _ => StepError::TrailingArgument {
                            step: "swipe",
                            max: 2,
                        },
                    });
                };
                Self::Swipe {
                    dx: parse_distance(dx)?,
                    dy: parse_distance(dy)?,
                }
            }
            "key" => {
                let raw = single(&args, "key", "left, right, home, end or space")?;
                Self::Key(raw.parse()?)
            }
            "hover" => Self::Hover(switch(single(&args, "hover", "on or off")?)?),
            "hidden" => {
                Self::Hidden(switch(single(&args, "hidden", "on or off")?)?)
            }
            _ => return Err(StepError::UnknownStep(command.to_string())),
        };
        Ok(step)
    }
}

/// Parse a whole script. Blank lines and comments are skipped.
pub fn parse_script(source: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        for chunk in code.split(';') {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            let step = chunk.parse().map_err(|source| ScriptError {
                line: index + 1,
                source,
            })?;
            steps.push(step);
        }
    }
    Ok(steps)
}

fn bare(
    args: &[&str],
    step: &'static str,
    value: ScriptStep,
) -> Result<ScriptStep, StepError> {
    if args.is_empty() {
        Ok(value)
    } else {
        Err(StepError::TrailingArgument { step, max: 0 })
    }
}

fn single<'a>(
    args: &[&'a str],
    step: &'static str,
    expected: &'static str,
) -> Result<&'a str, StepError> {
    match args {
        [value] => Ok(*value),
        [] => Err(StepError::MissingArgument { step, expected }),
        _ => Err(StepError::TrailingArgument { step, max: 1 }),
    }
}

fn switch(raw: &str) -> Result<bool, StepError> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(StepError::InvalidSwitch(raw.to_string())),
    }
}

fn parse_distance(raw: &str) -> Result<f32, StepError> {
    raw.trim_end_matches("px")
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| StepError::InvalidDistance(raw.to_string()))
}

/// Bare integers are milliseconds. Capped at one day so clock arithmetic
/// cannot overflow.
fn parse_duration(raw: &str) -> Result<Duration, StepError> {
    let invalid = |reason: String| StepError::InvalidDuration {
        value: raw.to_string(),
        reason,
    };
    let duration = match raw.parse::<u64>() {
        Ok(millis) => Duration::from_millis(millis),
        Err(_) => humantime::parse_duration(raw)
            .map_err(|err| invalid(err.to_string()))?,
    };
    let max = Duration::from_millis(MAX_DURATION_MS);
    if duration > max {
        return Err(invalid(format!(
            "longer than {}",
            humantime::format_duration(max)
        )));
    }
    Ok(duration)
}

/// `--duration` value parser with the same rules as a `wait` step.
pub fn parse_run_duration(raw: &str) -> Result<Duration, String> {
    parse_duration(raw.trim()).map_err(|err| err.to_string())
}
