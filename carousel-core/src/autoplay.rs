//! Autoplay scheduler
//!
//! A recurring deadline that asks the engine for `next_slide()`. The timer
//! only runs while autoplay is wanted, the carousel has more than one slide,
//! and no pause reason (gesture, hover, hidden page) is active.

use std::time::{Duration, Instant};

use tracing::trace;

/// Why the timer is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// A pointer gesture is in progress.
    Interaction,
    /// The pointer hovers the container.
    Hover,
    /// The page is hidden.
    PageHidden,
}

impl PauseReason {
    const fn bit(self) -> u8 {
        match self {
            Self::Interaction => 1,
            Self::Hover => 1 << 1,
            Self::PageHidden => 1 << 2,
        }
    }
}

/// Set of active pause reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseReasons(u8);

impl PauseReasons {
    pub fn insert(&mut self, reason: PauseReason) {
        self.0 |= reason.bit();
    }

    pub fn remove(&mut self, reason: PauseReason) {
        self.0 &= !reason.bit();
    }

    pub fn contains(&self, reason: PauseReason) -> bool {
        self.0 & reason.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    interval: Duration,
    eligible: bool,
    wanted: bool,
    paused_by: PauseReasons,
    next_fire: Option<Instant>,
}

impl AutoplayScheduler {
    /// `eligible` is false for carousels with a single slide; such a
    /// scheduler never arms.
    pub fn new(interval: Duration, eligible: bool) -> Self {
        Self {
            interval,
            eligible,
            wanted: false,
            paused_by: PauseReasons::default(),
            next_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The timer is armed.
    pub fn is_active(&self) -> bool {
        self.next_fire.is_some()
    }

    /// Autoplay should run whenever nothing pauses it.
    pub fn is_wanted(&self) -> bool {
        self.wanted
    }

    pub fn paused_by(&self) -> PauseReasons {
        self.paused_by
    }

    pub fn next_fire(&self) -> Option<Instant> {
        self.next_fire
    }

    /// Want autoplay and arm the timer if nothing pauses it. Returns whether
    /// the timer is armed afterwards.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.eligible {
            trace!("autoplay needs more than one slide");
            return false;
        }
        self.wanted = true;
        self.rearm(now);
        self.is_active()
    }

    /// Withdraw the wish for autoplay and disarm.
    pub fn stop(&mut self) {
        self.wanted = false;
        self.next_fire = None;
    }

    /// Returns whether the timer is armed afterwards.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.wanted {
            self.stop();
            false
        } else {
            self.start(now)
        }
    }

    /// Hold the timer for `reason`.
    pub fn suspend(&mut self, reason: PauseReason) {
        self.paused_by.insert(reason);
        self.next_fire = None;
    }

    /// Lift `reason`; the timer re-arms from `now` once no reason is left and
    /// autoplay is still wanted.
    pub fn resume(&mut self, reason: PauseReason, now: Instant) {
        self.paused_by.remove(reason);
        self.rearm(now);
    }

    /// Consume a due tick. The next deadline advances by whole intervals from
    /// the scheduled one, like an interval timer. Returns whether a tick was
    /// due at `at`.
    pub fn fire(&mut self, at: Instant) -> bool {
        match self.next_fire {
            Some(due) if due <= at => {
                self.next_fire = Some(due + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Forget everything; used on destroy.
    pub fn clear(&mut self) {
        self.wanted = false;
        self.paused_by = PauseReasons::default();
        self.next_fire = None;
    }

    fn rearm(&mut self, now: Instant) {
        if self.wanted && self.eligible && self.paused_by.is_empty() {
            if self.next_fire.is_none() {
                self.next_fire = Some(now + self.interval);
            }
        } else {
            self.next_fire = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(5000);

    #[test]
    fn start_arms_one_interval_out() {
        let now = Instant::now();
        let mut autoplay = AutoplayScheduler::new(INTERVAL, true);
        assert!(autoplay.start(now));
        assert_eq!(autoplay.next_fire(), Some(now + INTERVAL));
    }

    #[test]
    fn single_slide_never_arms() {
        let mut autoplay = AutoplayScheduler::new(INTERVAL, false);
        assert!(!autoplay.start(Instant::now()));
        assert!(!autoplay.is_active());
        assert!(!autoplay.is_wanted());
    }

    #[test]
    fn fire_advances_from_scheduled_deadline() {
        let now = Instant::now();
        let mut autoplay = AutoplayScheduler::new(INTERVAL, true);
        autoplay.start(now);

        assert!(!autoplay.fire(now + Duration::from_millis(4999)));
        // fired late: the next deadline still lines up on the interval grid
        assert!(autoplay.fire(now + Duration::from_millis(5100)));
        assert_eq!(autoplay.next_fire(), Some(now + INTERVAL * 2));
    }

    #[test]
    fn resumes_only_when_every_reason_clears() {
        let now = Instant::now();
        let mut autoplay = AutoplayScheduler::new(INTERVAL, true);
        autoplay.start(now);

        autoplay.suspend(PauseReason::Hover);
        autoplay.suspend(PauseReason::PageHidden);
        assert!(!autoplay.is_active());

        autoplay.resume(PauseReason::Hover, now);
        assert!(!autoplay.is_active());
        assert!(autoplay.paused_by().contains(PauseReason::PageHidden));

        let later = now + Duration::from_secs(1);
        autoplay.resume(PauseReason::PageHidden, later);
        assert_eq!(autoplay.next_fire(), Some(later + INTERVAL));
    }

    #[test]
    fn explicit_stop_survives_resume_events() {
        let now = Instant::now();
        let mut autoplay = AutoplayScheduler::new(INTERVAL, true);
        autoplay.start(now);
        autoplay.suspend(PauseReason::Hover);
        autoplay.stop();
        autoplay.resume(PauseReason::Hover, now);
        assert!(!autoplay.is_active());

        assert!(autoplay.toggle(now));
        assert!(!autoplay.toggle(now));
    }
}
