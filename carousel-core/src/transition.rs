//! Transition engine: the Idle/Transitioning state machine
//!
//! Accepting a move locks the engine until the settlement window
//! (animation + buffer) has elapsed on the engine clock. No animation-end
//! callback from the host is relied upon. A move that ends on a boundary
//! clone is followed by a silent jump to the real slide with the same
//! content, which is what keeps the loop seamless.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::transition::SLIDE_OFFSET_PERCENT;
use crate::index::{IndexMapper, PhysicalTarget, Step};
use crate::ports::RenderAdapter;

/// An accepted move that has not settled yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTransition {
    pub from: usize,
    pub to: usize,
    pub step: Step,
    /// Physical position the track rested on when the move started.
    pub from_position: usize,
    pub target: PhysicalTarget,
    pub started_at: Instant,
    pub settles_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    Transitioning(PendingTransition),
}

/// Why a navigation request was dropped. Rejections are expected under
/// rapid input and are never surfaced as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Locked,
    AlreadyCurrent,
    OutOfRange { index: usize, total: usize },
}

/// Outcome of a settled move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    pub from: usize,
    pub to: usize,
    /// Real position the track silently jumped to, when the move ended on a
    /// clone.
    pub silent_jump: Option<usize>,
}

/// Easing curve used when a host asks for the interpolated offset.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

impl FromStr for Easing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "linear" => Ok(Self::Linear),
            "ease-in" => Ok(Self::EaseIn),
            "ease-out" => Ok(Self::EaseOut),
            "ease-in-out" => Ok(Self::EaseInOut),
            other => Err(format!(
                "unknown easing `{other}` (expected linear, ease-in, ease-out or ease-in-out)"
            )),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        })
    }
}

/// Track offset, in percent, that shows `position`.
pub fn offset_percent(position: usize) -> f32 {
    -(position as f32) * SLIDE_OFFSET_PERCENT
}

#[derive(Debug, Clone)]
pub struct TransitionEngine {
    mapper: IndexMapper,
    current: usize,
    state: TransitionState,
    animation: Duration,
    buffer: Duration,
    easing: Easing,
}

impl TransitionEngine {
    pub fn new(mapper: IndexMapper, animation: Duration, buffer: Duration) -> Self {
        Self {
            mapper,
            current: 0,
            state: TransitionState::Idle,
            animation,
            buffer,
            easing: Easing::default(),
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn mapper(&self) -> IndexMapper {
        self.mapper
    }

    /// Settled logical index. Unchanged for the whole transition.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning(_))
    }

    pub fn settles_at(&self) -> Option<Instant> {
        match self.state {
            TransitionState::Transitioning(pending) => Some(pending.settles_at),
            TransitionState::Idle => None,
        }
    }

    pub fn settlement_window(&self) -> Duration {
        self.animation.saturating_add(self.buffer)
    }

    /// Physical position the track rests on while idle.
    pub fn resting_position(&self) -> usize {
        self.mapper.logical_to_physical(self.current)
    }

    /// Put the track on the current slide without animating.
    pub fn place<R: RenderAdapter + ?Sized>(&self, renderer: &mut R) {
        silent_jump(self.resting_position(), renderer);
    }

    /// Idle -> Transitioning. Locks the engine and returns the accepted move;
    /// the caller animates it with [`animate`](Self::animate) once the
    /// pre-change notification is out.
    pub fn begin(
        &mut self,
        next: usize,
        step: Step,
        now: Instant,
    ) -> Result<PendingTransition, Rejection> {
        let total = self.mapper.total();
        if next >= total {
            return Err(Rejection::OutOfRange { index: next, total });
        }
        if self.is_transitioning() {
            return Err(Rejection::Locked);
        }
        if next == self.current {
            return Err(Rejection::AlreadyCurrent);
        }

        let target = self.mapper.resolve_target(self.current, next, step);
        let pending = PendingTransition {
            from: self.current,
            to: next,
            step,
            from_position: self.resting_position(),
            target,
            started_at: now,
            settles_at: now + self.settlement_window(),
        };
        self.state = TransitionState::Transitioning(pending);
        trace!(
            from = pending.from,
            to = pending.to,
            position = target.position,
            "transition locked"
        );
        Ok(pending)
    }

    /// Start the timed visual move for an accepted transition.
    pub fn animate<R: RenderAdapter + ?Sized>(
        &self,
        pending: &PendingTransition,
        renderer: &mut R,
    ) {
        renderer.set_offset(offset_percent(pending.target.position));
    }

    /// Transitioning -> Idle once `now` has reached the settlement deadline.
    /// Performs the silent jump when the move ended on a clone, then unlocks
    /// and commits the new current index.
    pub fn settle<R: RenderAdapter + ?Sized>(
        &mut self,
        now: Instant,
        renderer: &mut R,
    ) -> Option<Settled> {
        let TransitionState::Transitioning(pending) = self.state else {
            return None;
        };
        if now < pending.settles_at {
            return None;
        }

        if let Some(real) = pending.target.silent_jump_to {
            silent_jump(real, renderer);
            debug!(
                clone = pending.target.position,
                real, "silent jump from clone to real slide"
            );
        }

        self.state = TransitionState::Idle;
        self.current = pending.to;

        Some(Settled {
            from: pending.from,
            to: pending.to,
            silent_jump: pending.target.silent_jump_to,
        })
    }

    /// Drop an in-flight move without committing it.
    pub fn abandon(&mut self) -> Option<PendingTransition> {
        match std::mem::take(&mut self.state) {
            TransitionState::Transitioning(pending) => Some(pending),
            TransitionState::Idle => None,
        }
    }

    /// Interpolated track offset (percent) at `now`, for hosts that draw the
    /// motion themselves instead of relying on a timed style transition.
    pub fn visual_offset(&self, now: Instant) -> f32 {
        let TransitionState::Transitioning(pending) = self.state else {
            return offset_percent(self.resting_position());
        };
        let start = offset_percent(pending.from_position);
        let end = offset_percent(pending.target.position);
        if self.animation.is_zero() {
            return end;
        }
        let elapsed = now.saturating_duration_since(pending.started_at);
        let t = elapsed.as_secs_f32() / self.animation.as_secs_f32();
        start + (end - start) * self.easing.apply(t)
    }
}

/// Reposition the track without a visible animation: disable the timed
/// transition, write the offset, flush layout, then re-enable the transition.
fn silent_jump<R: RenderAdapter + ?Sized>(position: usize, renderer: &mut R) {
    renderer.set_transition_enabled(false);
    renderer.set_offset(offset_percent(position));
    renderer.flush_layout();
    renderer.set_transition_enabled(true);
}
