//! Physical track: the ordered arena of render slots
//!
//! With looping enabled and more than one slide the track is
//! `[clone(N-1), slide 0, .., slide N-1, clone(0)]`; otherwise it is just the
//! real slides. Clones are owned by the track and removed on teardown.

use tracing::debug;

use crate::element::ElementId;
use crate::ports::{ClonePlacement, RenderAdapter};

/// What a slot on the track holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Real,
    /// Clone of the last slide, at physical position 0.
    LeadingClone,
    /// Clone of the first slide, at physical position N+1.
    TrailingClone,
}

/// One render position on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub element: ElementId,
    pub kind: SlotKind,
    /// Logical slide whose content this slot renders.
    pub logical: usize,
}

impl Slot {
    pub fn is_clone(&self) -> bool {
        !matches!(self.kind, SlotKind::Real)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhysicalTrack {
    slots: Vec<Slot>,
    total: usize,
    looping: bool,
}

impl PhysicalTrack {
    /// Build the track for `slides`, asking the renderer for boundary clones
    /// when `looping` is requested and there is more than one slide.
    pub fn build<R: RenderAdapter + ?Sized>(
        container: ElementId,
        slides: &[ElementId],
        looping: bool,
        renderer: &mut R,
    ) -> Self {
        let total = slides.len();
        let looping = looping && total > 1;

        let mut slots = Vec::with_capacity(total + 2);
        if looping {
            let last = total - 1;
            let element = renderer.insert_clone(
                container,
                slides[last],
                ClonePlacement::Start,
            );
            slots.push(Slot {
                element,
                kind: SlotKind::LeadingClone,
                logical: last,
            });
        }
        slots.extend(slides.iter().enumerate().map(|(logical, &element)| {
            Slot {
                element,
                kind: SlotKind::Real,
                logical,
            }
        }));
        if looping {
            let element =
                renderer.insert_clone(container, slides[0], ClonePlacement::End);
            slots.push(Slot {
                element,
                kind: SlotKind::TrailingClone,
                logical: 0,
            });
        }

        debug!(total, looping, positions = slots.len(), "built carousel track");

        Self {
            slots,
            total,
            looping,
        }
    }

    /// Remove the clones from the host surface and forget every slot.
    /// Returns the removed clone handles.
    pub fn teardown<R: RenderAdapter + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> Vec<ElementId> {
        let clones: Vec<ElementId> =
            self.clones().map(|slot| slot.element).collect();
        for &element in &clones {
            renderer.remove_element(element);
        }
        self.slots.clear();
        self.total = 0;
        self.looping = false;
        clones
    }

    /// Number of logical slides.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of physical positions (N + 2 when looping).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn clones(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.is_clone())
    }

    /// Host element of the real slide at `logical`.
    pub fn real_element(&self, logical: usize) -> Option<ElementId> {
        self.slots
            .iter()
            .find(|slot| slot.kind == SlotKind::Real && slot.logical == logical)
            .map(|slot| slot.element)
    }

    /// Positions `position - 1 ..= position + 1` that exist on the track.
    pub fn neighborhood(
        &self,
        position: usize,
    ) -> impl Iterator<Item = &Slot> {
        let start = position.saturating_sub(1);
        let end = (position + 2).min(self.slots.len());
        self.slots.get(start..end).unwrap_or_default().iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingRenderer, RenderOp};

    fn slides(n: u64) -> Vec<ElementId> {
        (0..n).map(|i| ElementId(100 + i)).collect()
    }

    #[test]
    fn looping_track_is_padded_with_boundary_clones() {
        let mut renderer = RecordingRenderer::new();
        let track =
            PhysicalTrack::build(ElementId(1), &slides(4), true, &mut renderer);

        assert_eq!(track.len(), 6);
        assert_eq!(track.total(), 4);
        assert!(track.is_looping());

        let first = track.slot(0).unwrap();
        assert_eq!(first.kind, SlotKind::LeadingClone);
        assert_eq!(first.logical, 3);
        let last = track.slot(5).unwrap();
        assert_eq!(last.kind, SlotKind::TrailingClone);
        assert_eq!(last.logical, 0);
        for position in 1..=4 {
            let slot = track.slot(position).unwrap();
            assert_eq!(slot.kind, SlotKind::Real);
            assert_eq!(slot.logical, position - 1);
            assert_eq!(slot.element, ElementId(100 + position as u64 - 1));
        }

        assert!(renderer.ops().contains(&RenderOp::InsertClone {
            source: ElementId(103),
            clone: first.element,
            placement: ClonePlacement::Start,
        }));
        assert!(renderer.ops().contains(&RenderOp::InsertClone {
            source: ElementId(100),
            clone: last.element,
            placement: ClonePlacement::End,
        }));
    }

    #[test]
    fn single_slide_gets_no_clones() {
        let mut renderer = RecordingRenderer::new();
        let track =
            PhysicalTrack::build(ElementId(1), &slides(1), true, &mut renderer);
        assert_eq!(track.len(), 1);
        assert!(!track.is_looping());
        assert_eq!(track.clones().count(), 0);
        assert!(renderer.ops().is_empty());
    }

    #[test]
    fn loop_disabled_gets_no_clones() {
        let mut renderer = RecordingRenderer::new();
        let track =
            PhysicalTrack::build(ElementId(1), &slides(3), false, &mut renderer);
        assert_eq!(track.len(), 3);
        assert_eq!(track.clones().count(), 0);
    }

    #[test]
    fn teardown_removes_only_clones() {
        let mut renderer = RecordingRenderer::new();
        let mut track =
            PhysicalTrack::build(ElementId(1), &slides(3), true, &mut renderer);
        let clone_ids: Vec<_> = track.clones().map(|s| s.element).collect();

        let removed = track.teardown(&mut renderer);

        assert_eq!(removed, clone_ids);
        assert!(track.is_empty());
        for id in clone_ids {
            assert!(renderer.ops().contains(&RenderOp::Remove(id)));
        }
        assert!(
            !renderer
                .ops()
                .iter()
                .any(|op| matches!(op, RenderOp::Remove(ElementId(100..=102))))
        );
    }

    #[test]
    fn neighborhood_clamps_to_track() {
        let mut renderer = RecordingRenderer::new();
        let track =
            PhysicalTrack::build(ElementId(1), &slides(3), false, &mut renderer);
        let at_start: Vec<_> = track.neighborhood(0).map(|s| s.logical).collect();
        assert_eq!(at_start, vec![0, 1]);
        let at_end: Vec<_> = track.neighborhood(2).map(|s| s.logical).collect();
        assert_eq!(at_end, vec![1, 2]);
    }
}
