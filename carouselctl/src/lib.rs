//! Command-line driver for the carousel engine
//!
//! - [`script`]: the step language `simulate` and `run` read
//! - [`simulate`]: deterministic runs on a [`ManualClock`](carousel_core::ManualClock)
//! - [`realtime`]: wall-clock runs on a current-thread tokio runtime
//! - [`check`]: the `check-config` report
//!
//! Both runners render into [`surface`], an in-memory stand-in for a browser
//! that logs every render call through `tracing`.

#![allow(missing_docs)]

pub mod check;
pub mod output;
pub mod realtime;
pub mod script;
pub mod simulate;
pub mod surface;

pub use output::{OutputFormat, Record, Summary};
pub use script::{ScriptError, ScriptStep, StepError, parse_script};
pub use simulate::Simulation;
