//! Headless stand-ins for the host
//!
//! Everything an engine test (or the `carouselctl simulate` command) needs
//! instead of a browser:
//!
//! - [`RecordingRenderer`] keeps the surface state and a log of every
//!   [`RenderOp`] the engine issued
//! - [`RecordingEnvironment`] tracks which global sources are subscribed
//! - [`EventRecorder`] collects lifecycle events through a listener
//! - [`fixtures`] builds mounts and ready-to-drive carousels on a
//!   [`ManualClock`](crate::ManualClock)

pub mod environment;
pub mod fixtures;
pub mod renderer;

pub use environment::RecordingEnvironment;
pub use fixtures::{EventRecorder, Harness, mount, mount_with_controls};
pub use renderer::{RecordingRenderer, RenderOp};
