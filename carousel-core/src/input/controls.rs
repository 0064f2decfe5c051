//! Indicator dots and prev/next arrows
//!
//! Host-supplied controls are used as-is; missing ones are generated when the
//! options ask for them and removed again on teardown.

use tracing::debug;

use crate::element::{Controls, ElementId};
use crate::ports::{Arrow, RenderAdapter};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSet {
    indicators: Vec<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    generated: Vec<ElementId>,
}

impl ControlSet {
    /// Adopt the host's controls, generating dots/arrows that are missing and
    /// requested. Nothing is generated for fewer than two slides.
    pub fn mount<R: RenderAdapter + ?Sized>(
        container: ElementId,
        provided: Controls,
        total: usize,
        show_dots: bool,
        show_arrows: bool,
        renderer: &mut R,
    ) -> Self {
        let mut set = Self {
            indicators: provided.indicators,
            prev: provided.prev_arrow,
            next: provided.next_arrow,
            generated: Vec::new(),
        };
        if total < 2 {
            return set;
        }

        if show_dots && set.indicators.is_empty() {
            for logical in 0..total {
                let dot = renderer.create_indicator(container, logical);
                set.indicators.push(dot);
                set.generated.push(dot);
            }
        }
        if show_arrows {
            if set.prev.is_none() {
                let arrow = renderer.create_arrow(container, Arrow::Prev);
                set.prev = Some(arrow);
                set.generated.push(arrow);
            }
            if set.next.is_none() {
                let arrow = renderer.create_arrow(container, Arrow::Next);
                set.next = Some(arrow);
                set.generated.push(arrow);
            }
        }
        if !set.generated.is_empty() {
            debug!(count = set.generated.len(), "generated carousel controls");
        }
        set
    }

    /// Reflect `current` on the indicators and, without looping, disable the
    /// arrow that points past an end.
    pub fn sync<R: RenderAdapter + ?Sized>(
        &self,
        current: usize,
        total: usize,
        looping: bool,
        renderer: &mut R,
    ) {
        for (logical, &dot) in self.indicators.iter().enumerate() {
            renderer.set_indicator_active(dot, logical == current);
        }
        let single = total < 2;
        if let Some(prev) = self.prev {
            renderer.set_arrow_disabled(prev, single || (!looping && current == 0));
        }
        if let Some(next) = self.next {
            renderer.set_arrow_disabled(
                next,
                single || (!looping && current + 1 >= total),
            );
        }
    }

    /// Logical index of a clicked indicator.
    pub fn indicator_index(&self, target: ElementId) -> Option<usize> {
        self.indicators.iter().position(|&dot| dot == target)
    }

    pub fn arrow_for(&self, target: ElementId) -> Option<Arrow> {
        if self.prev == Some(target) {
            Some(Arrow::Prev)
        } else if self.next == Some(target) {
            Some(Arrow::Next)
        } else {
            None
        }
    }

    pub fn indicator(&self, logical: usize) -> Option<ElementId> {
        self.indicators.get(logical).copied()
    }

    pub fn arrow(&self, arrow: Arrow) -> Option<ElementId> {
        match arrow {
            Arrow::Prev => self.prev,
            Arrow::Next => self.next,
        }
    }

    pub fn generated(&self) -> &[ElementId] {
        &self.generated
    }

    /// Remove generated controls and forget every control.
    pub fn teardown<R: RenderAdapter + ?Sized>(&mut self, renderer: &mut R) {
        for element in self.generated.drain(..) {
            renderer.remove_element(element);
        }
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRenderer;

    const CONTAINER: ElementId = ElementId(1);

    #[test]
    fn generates_missing_controls() {
        let mut renderer = RecordingRenderer::new();
        let set = ControlSet::mount(
            CONTAINER,
            Controls::default(),
            3,
            true,
            true,
            &mut renderer,
        );
        assert_eq!(set.generated().len(), 5);
        assert!(set.indicator(2).is_some());
        assert!(set.arrow(Arrow::Prev).is_some());
    }

    #[test]
    fn keeps_host_controls() {
        let mut renderer = RecordingRenderer::new();
        let provided = Controls {
            indicators: vec![ElementId(50), ElementId(51)],
            prev_arrow: Some(ElementId(60)),
            next_arrow: None,
        };
        let set =
            ControlSet::mount(CONTAINER, provided, 2, true, false, &mut renderer);
        assert!(set.generated().is_empty());
        assert_eq!(set.indicator_index(ElementId(51)), Some(1));
        assert_eq!(set.arrow_for(ElementId(60)), Some(Arrow::Prev));
        assert_eq!(set.arrow(Arrow::Next), None);
    }

    #[test]
    fn nothing_generated_for_a_single_slide() {
        let mut renderer = RecordingRenderer::new();
        let set = ControlSet::mount(
            CONTAINER,
            Controls::default(),
            1,
            true,
            true,
            &mut renderer,
        );
        assert!(set.generated().is_empty());
    }

    #[test]
    fn arrows_disable_at_the_ends_without_looping() {
        let mut renderer = RecordingRenderer::new();
        let set = ControlSet::mount(
            CONTAINER,
            Controls::default(),
            3,
            true,
            true,
            &mut renderer,
        );
        let prev = set.arrow(Arrow::Prev).unwrap();
        let next = set.arrow(Arrow::Next).unwrap();

        set.sync(0, 3, false, &mut renderer);
        assert!(renderer.is_arrow_disabled(prev));
        assert!(!renderer.is_arrow_disabled(next));

        set.sync(2, 3, false, &mut renderer);
        assert!(!renderer.is_arrow_disabled(prev));
        assert!(renderer.is_arrow_disabled(next));

        set.sync(0, 3, true, &mut renderer);
        assert!(!renderer.is_arrow_disabled(prev));
        assert_eq!(renderer.active_indicator(), set.indicator(0));
    }

    #[test]
    fn teardown_removes_generated_controls() {
        let mut renderer = RecordingRenderer::new();
        let mut set = ControlSet::mount(
            CONTAINER,
            Controls::default(),
            2,
            true,
            true,
            &mut renderer,
        );
        let generated = set.generated().to_vec();
        set.teardown(&mut renderer);
        for element in generated {
            assert!(renderer.is_removed(element));
        }
        assert_eq!(set.indicator(0), None);
    }
}
