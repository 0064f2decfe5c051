//! Carousel constants
//!
//! Defaults for transition timing, gesture recognition, autoplay and resize
//! handling, plus the bounds options are validated against. `CarouselOptions::default()` is built from these so every
//! carousel tunes consistently.

/// Transition timing defaults.
pub mod transition {
    /// Duration (ms) of the animated track move. Must match the duration the
    /// presentation layer uses for the track's visual transition.
    pub const ANIMATION_DURATION_MS: u64 = 600;
    /// Additive buffer (ms) waited after the animation before the move is
    /// considered settled.
    pub const SETTLE_BUFFER_MS: u64 = 50;
    /// Offset of one slide, in percent of the track viewport.
    pub const SLIDE_OFFSET_PERCENT: f32 = 100.0;
}

/// Autoplay defaults.
pub mod autoplay {
    /// Period (ms) between automatic advances.
    pub const INTERVAL_MS: u64 = 5000;
}

/// Pointer gesture defaults.
pub mod gesture {
    /// Minimum horizontal travel (px) for a drag to count as a swipe.
    pub const SWIPE_THRESHOLD_PX: f32 = 50.0;
}

/// Viewport resize handling.
pub mod resize {
    /// Quiet period (ms) after the last resize before bookkeeping is refreshed.
    pub const DEBOUNCE_MS: u64 = 250;
}

/// Bounds enforced by `CarouselOptions::validate`.
pub mod limits {
    /// Longest accepted duration option (ms), one day. Deadlines are computed
    /// as `now + duration`, which must stay representable as an `Instant`.
    pub const MAX_DURATION_MS: u64 = 24 * 60 * 60 * 1000;
}
