//! Recording render adapter

use std::collections::{HashMap, HashSet};

use crate::element::ElementId;
use crate::ports::{Arrow, ClonePlacement, RenderAdapter, SlideRole};

/// First handle the recorder hands out for elements it creates.
const FIRST_GENERATED_ID: u64 = 10_000;

/// One call the engine made on the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOp {
    InsertClone {
        source: ElementId,
        clone: ElementId,
        placement: ClonePlacement,
    },
    Remove(ElementId),
    TransitionEnabled(bool),
    Offset(f32),
    FlushLayout,
    Classify {
        element: ElementId,
        role: SlideRole,
    },
    CreateIndicator {
        element: ElementId,
        logical: usize,
    },
    CreateArrow {
        element: ElementId,
        arrow: Arrow,
    },
    IndicatorActive {
        element: ElementId,
        active: bool,
    },
    ArrowDisabled {
        element: ElementId,
        disabled: bool,
    },
    LoadMedia(ElementId),
}

/// Renderer that applies every call to an in-memory surface and logs it.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
    next_id: u64,
    offset: f32,
    transition_enabled: bool,
    roles: HashMap<ElementId, SlideRole>,
    indicators: HashMap<ElementId, bool>,
    arrows: HashMap<ElementId, bool>,
    media_loads: HashMap<ElementId, usize>,
    removed: HashSet<ElementId>,
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            next_id: FIRST_GENERATED_ID,
            offset: 0.0,
            transition_enabled: true,
            roles: HashMap::new(),
            indicators: HashMap::new(),
            arrows: HashMap::new(),
            media_loads: HashMap::new(),
            removed: HashSet::new(),
        }
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Drain the op log, keeping the surface state.
    pub fn take_ops(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }

    /// Current track offset in percent.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn transition_enabled(&self) -> bool {
        self.transition_enabled
    }

    pub fn role_of(&self, element: ElementId) -> Option<SlideRole> {
        self.roles.get(&element).copied()
    }

    /// Elements currently classified as `role`, in handle order.
    pub fn elements_with_role(&self, role: SlideRole) -> Vec<ElementId> {
        let mut elements: Vec<_> = self
            .roles
            .iter()
            .filter(|&(_, &r)| r == role)
            .map(|(&element, _)| element)
            .collect();
        elements.sort();
        elements
    }

    /// How many times deferred media was promoted for `element`.
    pub fn media_loads(&self, element: ElementId) -> usize {
        self.media_loads.get(&element).copied().unwrap_or(0)
    }

    pub fn is_arrow_disabled(&self, arrow: ElementId) -> bool {
        self.arrows.get(&arrow).copied().unwrap_or(false)
    }

    pub fn active_indicator(&self) -> Option<ElementId> {
        self.indicators
            .iter()
            .find(|&(_, &active)| active)
            .map(|(&element, _)| element)
    }

    pub fn is_removed(&self, element: ElementId) -> bool {
        self.removed.contains(&element)
    }

    /// Number of offset writes made with the timed transition enabled.
    pub fn animated_moves(&self) -> usize {
        let mut enabled = true;
        let mut moves = 0;
        for op in &self.ops {
            match op {
                RenderOp::TransitionEnabled(on) => enabled = *on,
                RenderOp::Offset(_) if enabled => moves += 1,
                _ => {}
            }
        }
        moves
    }

    fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl RenderAdapter for RecordingRenderer {
    fn insert_clone(
        &mut self,
        _container: ElementId,
        source: ElementId,
        placement: ClonePlacement,
    ) -> ElementId {
        let clone = self.allocate();
        self.ops.push(RenderOp::InsertClone {
            source,
            clone,
            placement,
        });
        clone
    }

    fn remove_element(&mut self, element: ElementId) {
        self.removed.insert(element);
        self.roles.remove(&element);
        self.indicators.remove(&element);
        self.arrows.remove(&element);
        self.ops.push(RenderOp::Remove(element));
    }

    fn set_transition_enabled(&mut self, enabled: bool) {
        self.transition_enabled = enabled;
        self.ops.push(RenderOp::TransitionEnabled(enabled));
    }

    fn set_offset(&mut self, percent: f32) {
        self.offset = percent;
        self.ops.push(RenderOp::Offset(percent));
    }

    fn flush_layout(&mut self) {
        self.ops.push(RenderOp::FlushLayout);
    }

    fn classify_slide(&mut self, element: ElementId, role: SlideRole) {
        self.roles.insert(element, role);
        self.ops.push(RenderOp::Classify { element, role });
    }

    fn create_indicator(
        &mut self,
        _container: ElementId,
        logical: usize,
    ) -> ElementId {
        let element = self.allocate();
        self.indicators.insert(element, false);
        self.ops.push(RenderOp::CreateIndicator { element, logical });
        element
    }

    fn create_arrow(
        &mut self,
        _container: ElementId,
        arrow: Arrow,
    ) -> ElementId {
        let element = self.allocate();
        self.arrows.insert(element, false);
        self.ops.push(RenderOp::CreateArrow { element, arrow });
        element
    }

    fn set_indicator_active(&mut self, indicator: ElementId, active: bool) {
        self.indicators.insert(indicator, active);
        self.ops.push(RenderOp::IndicatorActive {
            element: indicator,
            active,
        });
    }

    fn set_arrow_disabled(&mut self, arrow: ElementId, disabled: bool) {
        self.arrows.insert(arrow, disabled);
        self.ops.push(RenderOp::ArrowDisabled {
            element: arrow,
            disabled,
        });
    }

    fn load_deferred_media(&mut self, element: ElementId) {
        *self.media_loads.entry(element).or_default() += 1;
        self.ops.push(RenderOp::LoadMedia(element));
    }
}
