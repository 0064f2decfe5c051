//! Pointer/swipe gesture recognizer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Result of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeOutcome {
    /// Leftward drag: advance.
    Next,
    /// Rightward drag: go back.
    Prev,
    /// Too short, or mostly vertical.
    Discarded,
}

/// Tracks one pointer gesture at a time.
#[derive(Debug, Clone)]
pub struct SwipeRecognizer {
    threshold: f32,
    start: Option<Point>,
}

impl SwipeRecognizer {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Gesture start. A new start replaces any gesture left unfinished.
    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
    }

    /// Returns true when the movement so far is mostly horizontal, in which
    /// case the host should suppress default scrolling.
    pub fn track(&mut self, at: Point) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let dx = (at.x - start.x).abs();
        let dy = (at.y - start.y).abs();
        dx > dy
    }

    /// Gesture end. `None` when no gesture was in progress.
    pub fn finish(&mut self, at: Point) -> Option<SwipeOutcome> {
        let start = self.start.take()?;
        Some(classify(at.x - start.x, at.y - start.y, self.threshold))
    }

    /// Abort the gesture. Returns whether one was in progress.
    pub fn cancel(&mut self) -> bool {
        self.start.take().is_some()
    }
}

/// Decide what a drag of (`dx`, `dy`) means.
pub fn classify(dx: f32, dy: f32, threshold: f32) -> SwipeOutcome {
    if dx.abs() < threshold || dy.abs() > dx.abs() {
        SwipeOutcome::Discarded
    } else if dx < 0.0 {
        SwipeOutcome::Next
    } else {
        SwipeOutcome::Prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftward_drag_past_threshold_advances() {
        let mut swipe = SwipeRecognizer::new(50.0);
        swipe.begin(Point::new(200.0, 100.0));
        assert!(swipe.track(Point::new(150.0, 105.0)));
        assert_eq!(
            swipe.finish(Point::new(120.0, 110.0)),
            Some(SwipeOutcome::Next)
        );
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn rightward_drag_goes_back() {
        assert_eq!(classify(75.0, -4.0, 50.0), SwipeOutcome::Prev);
    }

    #[test]
    fn short_or_vertical_drags_are_discarded() {
        assert_eq!(classify(20.0, 0.0, 50.0), SwipeOutcome::Discarded);
        assert_eq!(classify(-49.9, 0.0, 50.0), SwipeOutcome::Discarded);
        assert_eq!(classify(-60.0, 90.0, 50.0), SwipeOutcome::Discarded);
    }

    #[test]
    fn vertical_movement_does_not_suppress_scroll() {
        let mut swipe = SwipeRecognizer::new(50.0);
        swipe.begin(Point::new(0.0, 0.0));
        assert!(!swipe.track(Point::new(5.0, 40.0)));
    }

    #[test]
    fn finish_without_begin_is_none() {
        let mut swipe = SwipeRecognizer::new(50.0);
        assert_eq!(swipe.finish(Point::new(0.0, 0.0)), None);
        assert!(!swipe.track(Point::new(10.0, 0.0)));
        assert!(!swipe.cancel());
    }
}
