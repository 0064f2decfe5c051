//! Lazy asset loader
//!
//! Promotes deferred media for the slot on screen and its two physical
//! neighbours, each element at most once.

use std::collections::HashSet;

use tracing::trace;

use crate::element::ElementId;
use crate::ports::RenderAdapter;
use crate::track::PhysicalTrack;

#[derive(Debug, Clone, Default)]
pub struct LazyAssetLoader {
    loaded: HashSet<ElementId>,
}

impl LazyAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prime `position` and its neighbours. A neighbouring clone also primes
    /// the real slide it duplicates, since the silent jump lands there.
    /// Returns how many elements were newly promoted.
    pub fn prime<R: RenderAdapter + ?Sized>(
        &mut self,
        track: &PhysicalTrack,
        position: usize,
        renderer: &mut R,
    ) -> usize {
        let mut promoted = 0;
        for slot in track.neighborhood(position) {
            let counterpart = slot
                .is_clone()
                .then(|| track.real_element(slot.logical))
                .flatten();
            for element in std::iter::once(slot.element).chain(counterpart) {
                if self.loaded.insert(element) {
                    renderer.load_deferred_media(element);
                    promoted += 1;
                }
            }
        }
        if promoted > 0 {
            trace!(position, promoted, "promoted deferred media");
        }
        promoted
    }

    pub fn is_loaded(&self, element: ElementId) -> bool {
        self.loaded.contains(&element)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn clear(&mut self) {
        self.loaded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRenderer;

    fn looping_track(renderer: &mut RecordingRenderer) -> PhysicalTrack {
        let slides: Vec<_> = (0..5).map(|i| ElementId(100 + i)).collect();
        PhysicalTrack::build(ElementId(1), &slides, true, renderer)
    }

    #[test]
    fn primes_current_and_neighbours_once() {
        let mut renderer = RecordingRenderer::new();
        let track = looping_track(&mut renderer);
        let mut loader = LazyAssetLoader::new();

        assert_eq!(loader.prime(&track, 2, &mut renderer), 3);
        assert!(loader.is_loaded(ElementId(100)));
        assert!(loader.is_loaded(ElementId(101)));
        assert!(loader.is_loaded(ElementId(102)));

        // moving one step only adds the new neighbour
        assert_eq!(loader.prime(&track, 3, &mut renderer), 1);
        assert_eq!(loader.prime(&track, 3, &mut renderer), 0);
        assert_eq!(renderer.media_loads(ElementId(101)), 1);
    }

    #[test]
    fn clone_neighbour_primes_its_source() {
        let mut renderer = RecordingRenderer::new();
        let track = looping_track(&mut renderer);
        let leading = track.slot(0).unwrap().element;
        let mut loader = LazyAssetLoader::new();

        loader.prime(&track, 1, &mut renderer);

        assert!(loader.is_loaded(leading));
        assert!(loader.is_loaded(ElementId(104)));
        assert_eq!(loader.loaded_count(), 4);
    }
}
