//! Logical index <-> physical position mapping
//!
//! Logical indices (`0..N`) are what callers see. Physical positions are
//! offsets on the track, which carries a boundary clone on each side when
//! looping. Everything here is pure.

/// Why a transition is requested. Resolving the physical target depends on
/// the direction of travel when the move crosses the loop boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `next_slide`: one step to the right.
    Forward,
    /// `prev_slide`: one step to the left.
    Backward,
    /// Direct jump (indicator click, Home/End, `go_to_slide`).
    Jump,
}

/// Physical position a transition animates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalTarget {
    /// Position the animation ends on.
    pub position: usize,
    /// Real position to silently jump to after the animation, when
    /// `position` is a clone.
    pub silent_jump_to: Option<usize>,
}

impl PhysicalTarget {
    fn direct(position: usize) -> Self {
        Self {
            position,
            silent_jump_to: None,
        }
    }

    pub fn lands_on_clone(&self) -> bool {
        self.silent_jump_to.is_some()
    }

    /// Where the track rests once the transition has fully settled.
    pub fn resting_position(&self) -> usize {
        self.silent_jump_to.unwrap_or(self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexMapper {
    total: usize,
    looping: bool,
}

impl IndexMapper {
    /// Looping only takes effect with more than one slide.
    pub const fn new(total: usize, looping: bool) -> Self {
        Self {
            total,
            looping: looping && total > 1,
        }
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    /// Number of physical positions on the track.
    pub const fn physical_len(&self) -> usize {
        if self.looping {
            self.total + 2
        } else {
            self.total
        }
    }

    pub const fn logical_to_physical(&self, logical: usize) -> usize {
        if self.looping { logical + 1 } else { logical }
    }

    /// Logical slide whose content is rendered at `position`. The leading
    /// clone resolves to `N-1` and the trailing clone to `0`.
    pub const fn physical_to_logical(&self, position: usize) -> usize {
        if !self.looping {
            return position;
        }
        if position == 0 {
            self.total - 1
        } else if position > self.total {
            0
        } else {
            position - 1
        }
    }

    pub const fn is_clone_position(&self, position: usize) -> bool {
        self.looping && (position == 0 || position == self.total + 1)
    }

    /// Real position rendering the same content as `position`.
    pub const fn real_position(&self, position: usize) -> usize {
        self.logical_to_physical(self.physical_to_logical(position))
    }

    /// Logical index one step from `current`, or `None` when the step would
    /// leave a non-looping track (or there is nowhere to go).
    pub fn step_target(&self, current: usize, step: Step) -> Option<usize> {
        if self.total <= 1 {
            return None;
        }
        let n = self.total;
        match step {
            Step::Forward if !self.looping && current + 1 >= n => None,
            Step::Backward if !self.looping && current == 0 => None,
            Step::Forward => Some((current + 1) % n),
            Step::Backward => Some((current + n - 1) % n),
            Step::Jump => None,
        }
    }

    /// Physical target for a move from `current` to `next`.
    ///
    /// Forward from the last slide to the first animates onto the trailing
    /// clone; backward from the first to the last animates onto the leading
    /// clone. Jumps follow the same rules when N > 2; with two slides every
    /// jump goes direct, since "last to first" and "first to last" coincide.
    pub fn resolve_target(
        &self,
        current: usize,
        next: usize,
        step: Step,
    ) -> PhysicalTarget {
        let direct = PhysicalTarget::direct(self.logical_to_physical(next));
        if !self.looping {
            return direct;
        }
        let last = self.total - 1;
        let wraps_forward = current == last && next == 0;
        let wraps_backward = current == 0 && next == last;
        let (forward, backward) = match step {
            Step::Forward => (wraps_forward, false),
            Step::Backward => (false, wraps_backward),
            Step::Jump if self.total > 2 => (wraps_forward, wraps_backward),
            Step::Jump => (false, false),
        };
        if forward {
            PhysicalTarget {
                position: self.total + 1,
                silent_jump_to: Some(self.logical_to_physical(0)),
            }
        } else if backward {
            PhysicalTarget {
                position: 0,
                silent_jump_to: Some(self.logical_to_physical(last)),
            }
        } else {
            direct
        }
    }
}
