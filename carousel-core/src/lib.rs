//! # Carousel Core
//!
//! Headless engine for an infinitely looping slide carousel.
//!
//! ## Overview
//!
//! The engine keeps a circular sequence of slides on a linear track and hides
//! the seam by padding the track with a clone of the last slide at the start
//! and a clone of the first slide at the end. A move that lands on a clone is
//! followed by a silent jump to the real slide with the same content.
//!
//! - **Track** ([`track`]): the arena of render slots, clones included
//! - **Index mapping** ([`index`]): logical index <-> physical position
//! - **Transitions** ([`transition`]): the Idle/Transitioning lock, settled on
//!   the engine [`Clock`] rather than on animation callbacks
//! - **Input** ([`input`]): swipe, keyboard and control clicks
//! - **Autoplay** ([`autoplay`]), **lazy media** ([`lazy`]) and lifecycle
//!   **events** ([`events`])
//!
//! The host supplies a [`RenderAdapter`] and an [`EnvironmentPort`], forwards
//! raw input through [`Carousel::handle_input`] and calls [`Carousel::tick`]
//! when [`Carousel::next_deadline`] comes due.
//!
//! ## Example
//!
//! Recording adapters for headless use live in `testing`, behind the
//! `testing` feature.
//!
//! ```
//! use carousel_core::testing::{RecordingEnvironment, RecordingRenderer, mount};
//! use carousel_core::{Carousel, CarouselOptions, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut carousel = Carousel::new(
//!     mount(4),
//!     CarouselOptions { auto_play: false, ..CarouselOptions::default() },
//!     RecordingRenderer::new(),
//!     RecordingEnvironment::new(),
//!     clock.clone(),
//! );
//! carousel.init();
//!
//! assert!(carousel.prev_slide());
//! assert!(!carousel.next_slide()); // locked until the move settles
//!
//! clock.advance_ms(650);
//! carousel.tick();
//! assert_eq!(carousel.current_slide(), 3);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod autoplay;
pub mod clock;
pub mod constants;
pub mod element;
pub mod engine;
pub mod error;
pub mod events;
pub mod index;
pub mod input;
pub mod lazy;
pub mod options;
pub mod ports;
#[cfg(any(test, feature = "testing"))]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;
pub mod track;
pub mod transition;

pub use autoplay::{AutoplayScheduler, PauseReason};
pub use clock::{Clock, ManualClock, SystemClock};
pub use element::{CarouselMount, Controls, ElementId};
pub use engine::{Carousel, Lifecycle};
pub use error::CarouselError;
pub use events::{CarouselEvent, LifecycleEmitter, ListenerId};
pub use index::{IndexMapper, PhysicalTarget, Step};
pub use input::{Disposition, InputEvent, Key};
pub use options::CarouselOptions;
pub use ports::{
    Arrow, ClonePlacement, EnvSource, EnvironmentPort, RenderAdapter,
    SlideRole, SubscriptionId,
};
pub use transition::{Easing, TransitionState};
