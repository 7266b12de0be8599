//! Focus management: the linear focus ring, traps, and focus-by-id
//! requests that retry for a couple of frames before giving up.
//!
//! Grounded on the teacher's `state/focus.rs` (a single `FOCUSED_INDEX`
//! signal plus focus/blur callback registration) — kept the "one focused
//! identity, callbacks fire on change" shape but rebuilt the ring itself
//! around the element tree's declared ids instead of the ECS registry's
//! allocated-index list, since elements (not ECS slots) are now the
//! reconciler's unit of identity.

use crate::element::{Element, WidgetId};

/// How many consecutive frames a focus-by-id request is retried before it
/// is dropped, to tolerate a target that hasn't been mounted yet this tick
/// (e.g. requested the same frame a conditionally-rendered panel appears).
const REQUEST_RETRY_FRAMES: u32 = 2;

#[derive(Debug, Clone)]
struct PendingRequest {
    id: WidgetId,
    frames_left: u32,
}

/// Tracks which element currently holds focus and the ring of focusable
/// ids it can move between with next/prev.
pub struct FocusManager {
    ring: Vec<WidgetId>,
    /// Ids a focus trap (e.g. a modal) restricts the ring to; `None` means
    /// the full ring is eligible.
    trap: Option<Vec<WidgetId>>,
    focused: Option<WidgetId>,
    pending: Option<PendingRequest>,
    retry_frames: u32,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::with_retry_frames(REQUEST_RETRY_FRAMES)
    }

    /// Build a manager whose focus-by-id requests retry for `retry_frames`
    /// frames before being dropped, instead of the default
    /// [`REQUEST_RETRY_FRAMES`]. Used by the scheduler to honor
    /// `Config::focus_retry_frames`.
    pub fn with_retry_frames(retry_frames: u32) -> Self {
        Self { ring: Vec::new(), trap: None, focused: None, pending: None, retry_frames }
    }

    pub fn focused_id(&self) -> Option<&WidgetId> {
        self.focused.as_ref()
    }

    /// Rebuild the focus ring by walking the element tree in paint order,
    /// collecting every focusable widget's declared id. Widgets with no id
    /// are never focus targets (the ring can only name elements the
    /// application can reliably re-locate across frames).
    pub fn rebuild_ring(&mut self, root: &Element) {
        self.rebuild_ring_from(std::iter::once(root));
    }

    /// Like [`Self::rebuild_ring`], but walks several trees in order (the
    /// base tree followed by any active floats) so a modal's own subtree
    /// contributes focusable ids even though it isn't a child of `root`.
    pub fn rebuild_ring_from<'a>(&mut self, roots: impl IntoIterator<Item = &'a Element>) {
        self.ring.clear();
        for root in roots {
            collect_focusable(root, &mut self.ring);
        }

        if let Some(id) = &self.focused {
            if !self.ring.contains(id) {
                self.focused = None;
            }
        }

        if let Some(req) = self.pending.take() {
            if self.eligible(&req.id) {
                self.focused = Some(req.id);
            } else if req.frames_left > 1 {
                self.pending = Some(PendingRequest { id: req.id, frames_left: req.frames_left - 1 });
            }
            // Otherwise the request is dropped: its target never appeared
            // within `REQUEST_RETRY_FRAMES` frames.
        }

        if self.focused.is_none() {
            if let Some(first) = self.eligible_ring().first() {
                self.focused = Some(first.clone());
            }
        }
    }

    fn eligible(&self, id: &WidgetId) -> bool {
        match &self.trap {
            Some(allowed) => allowed.contains(id),
            None => self.ring.contains(id),
        }
    }

    fn eligible_ring(&self) -> Vec<WidgetId> {
        match &self.trap {
            Some(allowed) => self.ring.iter().filter(|id| allowed.contains(id)).cloned().collect(),
            None => self.ring.clone(),
        }
    }

    /// Request focus move to `id`. If `id` isn't currently in the ring, the
    /// request is retried for up to [`REQUEST_RETRY_FRAMES`] frames (via
    /// `rebuild_ring`) before being dropped.
    pub fn request(&mut self, id: WidgetId) {
        if self.eligible(&id) {
            self.focused = Some(id);
            self.pending = None;
        } else {
            self.pending = Some(PendingRequest { id, frames_left: self.retry_frames });
        }
    }

    pub fn clear(&mut self) {
        self.focused = None;
        self.pending = None;
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: i32) {
        let ring = self.eligible_ring();
        if ring.is_empty() {
            self.focused = None;
            return;
        }
        let current = self.focused.as_ref().and_then(|f| ring.iter().position(|id| id == f));
        let next = match current {
            Some(i) => {
                let len = ring.len() as i32;
                (((i as i32 + delta) % len + len) % len) as usize
            }
            None if delta >= 0 => 0,
            None => ring.len() - 1,
        };
        self.focused = Some(ring[next].clone());
    }

    /// Restrict the ring to `ids` (a modal's own focusable subtree) until
    /// [`Self::release_trap`] is called.
    pub fn push_trap(&mut self, ids: Vec<WidgetId>) {
        self.trap = Some(ids);
        if let Some(focused) = &self.focused {
            if !self.eligible(focused) {
                self.focused = self.eligible_ring().first().cloned();
            }
        }
    }

    /// Walk `root` (a modal float's own laid-out subtree) and trap focus to
    /// its focusable ids until [`Self::release_trap`] is called. The
    /// scheduler calls this when a modal float is pushed, so tab-cycling
    /// never escapes the dialog into the base tree while it's open.
    pub fn push_trap_from(&mut self, root: &Element) {
        let mut ids = Vec::new();
        collect_focusable(root, &mut ids);
        self.push_trap(ids);
    }

    pub fn release_trap(&mut self) {
        self.trap = None;
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_focusable(el: &Element, out: &mut Vec<WidgetId>) {
    if el.widget.is_focusable() {
        if let Some(id) = el.id() {
            out.push(id.clone());
        }
    }
    for child in &el.children {
        collect_focusable(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BoxedWidget, Widget};
    use std::any::Any;

    struct Focusable(WidgetId);
    impl Widget for Focusable {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn type_name(&self) -> &'static str {
            "Focusable"
        }
        fn id(&self) -> Option<&WidgetId> {
            Some(&self.0)
        }
        fn is_focusable(&self) -> bool {
            true
        }
    }

    fn leaf(id: &str) -> Element {
        Element::for_test(Box::new(Focusable(WidgetId::from(id))) as BoxedWidget)
    }

    fn tree(ids: &[&str]) -> Element {
        let mut root = Element::for_test(Box::new(Focusable(WidgetId::from("root"))) as BoxedWidget);
        root.children = ids.iter().map(|&id| leaf(id)).collect();
        root
    }

    #[test]
    fn rebuild_focuses_first_eligible_by_default() {
        let root = tree(&["a", "b", "c"]);
        let mut fm = FocusManager::new();
        fm.rebuild_ring(&root);
        assert_eq!(fm.focused_id().map(|s| s.as_ref()), Some("root"));
    }

    #[test]
    fn next_wraps_around_ring() {
        let root = tree(&["a", "b"]);
        let mut fm = FocusManager::new();
        fm.rebuild_ring(&root);
        fm.request(WidgetId::from("b"));
        fm.next();
        assert_eq!(fm.focused_id().map(|s| s.as_ref()), Some("root"));
    }

    #[test]
    fn request_for_absent_id_retries_then_drops() {
        let root = tree(&["a"]);
        let mut fm = FocusManager::new();
        fm.rebuild_ring(&root);
        fm.request(WidgetId::from("ghost"));
        assert_eq!(fm.focused_id().map(|s| s.as_ref()), Some("root"));
        fm.rebuild_ring(&root);
        fm.rebuild_ring(&root);
        assert!(fm.pending.is_none());
    }

    #[test]
    fn trap_restricts_ring() {
        let root = tree(&["a", "b"]);
        let mut fm = FocusManager::new();
        fm.rebuild_ring(&root);
        fm.push_trap(vec![WidgetId::from("a")]);
        fm.next();
        assert_eq!(fm.focused_id().map(|s| s.as_ref()), Some("a"));
    }
}
