//! Widgets, elements, and the reconciler.
//!
//! Widgets are value objects rebuilt every frame; elements are the
//! persistent counterpart that survives across frames, holding layout
//! geometry, paint output, and any per-widget state. [`reconcile`] matches a
//! freshly-built widget subtree against the previous element tree by slot
//! identity (declared id first, then parent path + index + concrete type)
//! and either updates the existing element in place or disposes it and
//! creates a new one.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::app::Context;
use crate::error::ContractError;
use crate::input::{ClickEvent, KeyEvent, Keybind, MouseEvent};
use crate::signal::{track, SignalId, SubKey};
use crate::style::{ColorSource, Span};
pub use crate::types::{AlignItems as CrossAxisAlign, BorderStyle, JustifyContent as MainAxisAlign, Overflow, Rgba};

/// Stable widget identity used for slot matching and focus/hit-test
/// bookkeeping. Cheap to clone (reference-counted) and to compare.
pub type WidgetId = Rc<str>;

/// Maximum `build` recursion depth before the subtree is replaced with an
/// error placeholder (§7 `ContractError::RecursionLimitExceeded`).
pub const MAX_BUILD_DEPTH: u32 = 64;

// ============================================================================
// Dimensions, constraints, geometry
// ============================================================================

/// One of the four dimension kinds a widget can request on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    /// Intrinsic content size.
    Auto,
    /// Fixed size in terminal cells.
    Cells(u16),
    /// Proportional share of the container's remaining slack.
    Flex(u16),
    /// Percentage (0..=100) of the parent's corresponding axis.
    Percent(u8),
}

impl Default for Dim {
    fn default() -> Self {
        Self::Auto
    }
}

impl From<u16> for Dim {
    fn from(n: u16) -> Self {
        Self::Cells(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub w: u16,
    pub h: u16,
}

impl Size {
    pub const ZERO: Self = Self { w: 0, h: 0 };

    pub fn new(w: u16, h: u16) -> Self {
        Self { w, h }
    }
}

/// An element's position and size within the viewport, plus the clip rect
/// paint must respect (may be smaller than `w`×`h` when an ancestor clips
/// overflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const ZERO: Self = Self { x: 0, y: 0, w: 0, h: 0 };

    pub fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Intersect with another rect, used to derive a child's clip from its
    /// parent's.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.w).min(other.x + other.w);
        let y2 = (self.y + self.h).min(other.y + other.h);
        if x2 > x1 && y2 > y1 {
            Rect::new(x1, y1, x2 - x1, y2 - y1)
        } else {
            Rect::new(x1, y1, 0, 0)
        }
    }
}

/// A (min, max) pair per axis that bounds what a child may be laid out as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_w: u16,
    pub max_w: u16,
    pub min_h: u16,
    pub max_h: u16,
}

impl Constraints {
    pub fn tight(w: u16, h: u16) -> Self {
        Self { min_w: w, max_w: w, min_h: h, max_h: h }
    }

    pub fn loose(max_w: u16, max_h: u16) -> Self {
        Self { min_w: 0, max_w, min_h: 0, max_h }
    }

    pub fn clamp_w(&self, w: u16) -> u16 {
        w.clamp(self.min_w, self.max_w.max(self.min_w))
    }

    pub fn clamp_h(&self, h: u16) -> u16 {
        h.clamp(self.min_h, self.max_h.max(self.min_h))
    }
}

/// Insets applied on each side of a box (padding, margin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeInsets {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl EdgeInsets {
    pub fn all(n: u16) -> Self {
        Self { top: n, right: n, bottom: n, left: n }
    }

    pub fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self { top: vertical, bottom: vertical, left: horizontal, right: horizontal }
    }

    pub fn horizontal(&self) -> u16 {
        self.left + self.right
    }

    pub fn vertical(&self) -> u16 {
        self.top + self.bottom
    }
}

/// Main-axis direction for a [`LayoutKind::Flow`] container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// Explicit offsets for a [`LayoutKind::Positioned`] child inside a Stack.
/// Unspecified edges fall back to the stack's alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offsets {
    pub top: Option<u16>,
    pub right: Option<u16>,
    pub bottom: Option<u16>,
    pub left: Option<u16>,
}

/// One edge's worth of packed border text: up to three slots, packed
/// left→center→right with at least one separator cell between occupied
/// slots. A title occupies the top edge, a subtitle the bottom, by
/// convention; the compositor doesn't care which edge it's given for.
#[derive(Debug, Clone, Default)]
pub struct BorderDecoration {
    pub left: Option<String>,
    pub center: Option<String>,
    pub right: Option<String>,
}

/// How a widget arranges and lays out its children, if it has any. Leaves
/// (e.g. Text) return `Leaf`; composites that build a single child (and so
/// have no layout opinion of their own) also report `Leaf` and rely on the
/// built child's own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    #[default]
    Leaf,
    /// Row/Column packing: children laid out along `Axis`, each getting a
    /// slice of the main axis per its `Dim`.
    Flow(Axis),
    /// Children stacked on top of each other, each against the stack's full
    /// inner box unless it declares `Offsets`.
    Stack,
}

// ============================================================================
// The Widget contract
// ============================================================================

/// Per-widget-type equality for reconciliation's dirty check: "did the
/// fields that affect layout/paint change between the old and new widget at
/// this slot." Implemented via downcast since `Widget` objects are type
/// -erased.
pub trait WidgetEq {
    fn widget_eq(&self, other: &dyn Any) -> bool;
}

/// The polymorphic contract every widget implements. A widget is either a
/// **composite** (`build` returns `Some`, describing itself in terms of
/// other widgets) or a **leaf/container** (`build` returns `None`; it paints
/// itself via `paint` and, if it has children, arranges them via
/// `layout_kind`/`children`).
///
/// Capability methods (`is_focusable`, `on_key`, mouse callbacks) default to
/// inert; the reconciler and input router never assume a widget supports
/// more than it advertises.
pub trait Widget: Any {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;

    /// Stable identity for slot matching. Two widgets at the same tree
    /// position with the same non-empty id are always matched regardless of
    /// concrete type.
    fn id(&self) -> Option<&WidgetId> {
        None
    }

    /// Composite widgets describe themselves in terms of other widgets.
    /// Invoked inside a tracking scope; reads of `Signal::get` during this
    /// call become the returned element's dependency set.
    fn build(&self, _cx: &Context) -> Option<BoxedWidget> {
        None
    }

    /// Declared children, for containers that arrange multiple widgets
    /// directly (Row/Column/Stack) rather than through `build`.
    fn children(&self) -> &[BoxedWidget] {
        &[]
    }

    /// Take ownership of this widget's declared children for reconciliation
    /// against the element's existing child list. Containers that carry
    /// children (see `widgets::Container`) store them behind
    /// `RefCell<Option<Vec<BoxedWidget>>>` and hand them over here; widgets
    /// with no declared children (leaves, and composites whose single
    /// logical child comes from `build` instead) have nothing to move.
    fn children_owned(&self) -> Vec<BoxedWidget> {
        Vec::new()
    }

    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Leaf
    }

    fn dim_w(&self) -> Dim {
        Dim::Auto
    }

    fn dim_h(&self) -> Dim {
        Dim::Auto
    }

    fn padding(&self) -> EdgeInsets {
        EdgeInsets::default()
    }

    fn margin(&self) -> EdgeInsets {
        EdgeInsets::default()
    }

    fn border(&self) -> BorderStyle {
        BorderStyle::None
    }

    fn border_color(&self) -> Rgba {
        Rgba::TERMINAL_DEFAULT
    }

    /// Packed left/center/right decorations for one border edge (e.g. a
    /// panel's title). `None` fields contribute nothing; the compositor
    /// packs present ones left→center→right with at least one separator
    /// cell and gives the title priority over the corner glyph on overlap.
    fn border_title(&self) -> Option<BorderDecoration> {
        None
    }

    fn border_subtitle(&self) -> Option<BorderDecoration> {
        None
    }

    /// This widget's own background fill, painted before children and
    /// before the border. `None` leaves whatever is already in the frame
    /// (usually the parent's background, or the theme background at the
    /// root) showing through.
    fn background(&self) -> Option<ColorSource> {
        None
    }

    fn main_axis_align(&self) -> MainAxisAlign {
        MainAxisAlign::FlexStart
    }

    fn cross_axis_align(&self) -> CrossAxisAlign {
        CrossAxisAlign::Stretch
    }

    fn spacing(&self) -> u16 {
        0
    }

    fn overflow(&self) -> Overflow {
        Overflow::Visible
    }

    /// Explicit Stack-child offsets; `None` means this widget is not
    /// positioned (laid out against the stack's full inner box instead).
    fn offsets(&self) -> Option<Offsets> {
        None
    }

    /// Intrinsic content size ignoring Flex, used by the layout engine's
    /// bottom-up pass. Containers never need to override this: the layout
    /// engine derives it from children for `Flow`/`Stack` kinds. Only true
    /// leaves (Text) implement it directly.
    fn intrinsic(&self, _available_w: Option<u16>) -> Size {
        Size::ZERO
    }

    /// Paint this widget's own content (background/text/border are handled
    /// by the compositor for all widgets uniformly; this hook is for a
    /// leaf's foreground content, e.g. Text's glyphs).
    fn paint(&self, _ctx: &mut crate::paint::PaintContext) {}

    fn is_focusable(&self) -> bool {
        false
    }

    fn on_key(&self, _event: &KeyEvent) -> bool {
        false
    }

    fn keybinds(&self) -> Vec<Keybind> {
        Vec::new()
    }

    fn on_click(&self, _event: &ClickEvent) {}
    fn on_mouse_down(&self, _event: &MouseEvent) {}
    fn on_mouse_up(&self, _event: &MouseEvent) {}
    fn on_hover(&self, _entering: bool) {}

    /// Structural field comparison for the dirty check. Widgets that don't
    /// implement `PartialEq` conservatively return `false` (always dirty),
    /// which is always correct, just not maximally efficient.
    fn content_eq(&self, _other: &dyn Widget) -> bool {
        false
    }
}

pub type BoxedWidget = Box<dyn Widget>;

// ============================================================================
// Slot identity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SlotKey {
    Id(WidgetId),
    Positional { index: usize, type_name: &'static str },
}

fn slot_key(widget: &dyn Widget, index: usize) -> SlotKey {
    match widget.id() {
        Some(id) if !id.is_empty() => SlotKey::Id(id.clone()),
        _ => SlotKey::Positional { index, type_name: widget.type_name() },
    }
}

// ============================================================================
// Element
// ============================================================================

thread_local! {
    static NEXT_TOKEN: RefCell<SubKey> = const { RefCell::new(1) };
    static NEXT_GENERATION: RefCell<u64> = const { RefCell::new(1) };
}

fn next_token() -> SubKey {
    NEXT_TOKEN.with(|cell| {
        let mut next = cell.borrow_mut();
        let v = *next;
        *next += 1;
        v
    })
}

fn next_generation() -> u64 {
    NEXT_GENERATION.with(|cell| {
        let mut next = cell.borrow_mut();
        let v = *next;
        *next += 1;
        v
    })
}

/// Persistent counterpart to one widget tree position.
pub struct Element {
    pub widget: BoxedWidget,
    pub children: Vec<Element>,
    /// Signals read the last time this element's composite `build` ran (or
    /// empty, for non-composite widgets).
    pub dependencies: HashMap<SignalId, crate::signal::SubscriptionToken>,
    /// Dedup/routing key used by `Signal::subscribe`; also the weak
    /// back-reference generation checked on notification.
    pub subtree_token: SubKey,
    pub generation: u64,
    pub dirty: bool,
    pub geometry: Rect,
    pub clip: Rect,
    /// Arbitrary per-element state a widget kind needs across frames (e.g.
    /// a text input's cursor position). `None` for widgets with no state.
    pub state: Option<Box<dyn Any>>,
    pub contract_error: Option<ContractError>,
}

impl Element {
    fn new(widget: BoxedWidget) -> Self {
        Self {
            widget,
            children: Vec::new(),
            dependencies: HashMap::new(),
            subtree_token: next_token(),
            generation: next_generation(),
            dirty: true,
            geometry: Rect::ZERO,
            clip: Rect::ZERO,
            state: None,
            contract_error: None,
        }
    }

    pub fn id(&self) -> Option<&WidgetId> {
        self.widget.id()
    }

    #[cfg(test)]
    pub(crate) fn for_test(widget: BoxedWidget) -> Self {
        Self::new(widget)
    }

    /// Mark this element's subtree dirty; called by a signal notification
    /// carrying a stale generation is silently ignored by the caller before
    /// this is even invoked (see [`crate::scheduler::Scheduler`]).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether this element or any descendant is dirty. The scheduler calls
    /// this after a reconcile pass to decide whether layout/paint/diff are
    /// worth running this tick at all.
    pub fn any_dirty(&self) -> bool {
        self.dirty || self.children.iter().any(Element::any_dirty)
    }

    /// Clear the dirty flag on this element and its whole subtree, once the
    /// scheduler has painted a frame reflecting the current state.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
        for child in &mut self.children {
            child.clear_dirty();
        }
    }

    fn dispose(&mut self) {
        for (_, token) in self.dependencies.drain() {
            token.unsubscribe();
        }
        for child in &mut self.children {
            child.dispose();
        }
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ============================================================================
// Reconciliation
// ============================================================================

/// Per-reconcile bookkeeping threaded through recursive calls: current
/// build depth (for the recursion bound) and the path for diagnostics.
pub struct ReconcileCx<'a> {
    pub app_cx: &'a Context,
    pub depth: u32,
    pub path: Vec<&'static str>,
    /// Called whenever an element's dependency set changes, so the
    /// scheduler can wire up `Signal::subscribe` with a dirty-marking
    /// callback keyed by the element's `subtree_token`.
    pub on_subscribe: &'a dyn Fn(SignalId, SubKey) -> crate::signal::SubscriptionToken,
}

/// Reconcile `new_widget` against `existing` (the element previously at this
/// slot, if any), returning the element that should now occupy the slot.
///
/// - If `existing` is `Some` and its widget's slot key matches `new_widget`'s
///   (by id, or by (index, type) when neither declares an id), the element
///   is reused: fields are replaced, dirtied only if `content_eq` says they
///   changed, and — if the widget is composite — rebuilt inside a tracking
///   scope whose dependency set replaces the element's old one.
/// - Otherwise the old element (if any) is disposed and a fresh one is
///   created.
pub fn reconcile(existing: Option<Element>, new_widget: BoxedWidget, cx: &mut ReconcileCx) -> Element {
    if cx.depth > MAX_BUILD_DEPTH {
        let path = cx.path.join("/");
        tracing::error!(path = %path, "build recursion limit exceeded, substituting error placeholder");
        let mut el = Element::new(Box::new(crate::widgets::ErrorPlaceholder::new(format!(
            "recursion limit exceeded at {path}"
        ))));
        el.contract_error = Some(ContractError::RecursionLimitExceeded { depth: MAX_BUILD_DEPTH, path });
        return el;
    }

    let matches = match &existing {
        Some(el) => slot_matches(el.widget.as_ref(), new_widget.as_ref()),
        None => false,
    };

    let mut element = if matches {
        let mut el = existing.unwrap();
        let changed = !el.widget.content_eq(new_widget.as_ref());
        el.widget = new_widget;
        if changed {
            el.dirty = true;
        }
        el
    } else {
        if let Some(mut old) = existing {
            old.dispose();
        }
        Element::new(new_widget)
    };

    cx.path.push(element.widget.type_name());
    cx.depth += 1;

    if let Some(built) = build_tracked(&element, cx) {
        reconcile_single_child(&mut element, built, cx);
    } else {
        reconcile_children_list(&mut element, cx);
    }

    cx.depth -= 1;
    cx.path.pop();

    element
}

fn build_tracked(element: &Element, cx: &mut ReconcileCx) -> Option<(BoxedWidget, std::collections::HashSet<SignalId>)> {
    // `build` is only invoked for composites. We probe by calling it; a
    // widget that isn't composite returns `None` with no tracking cost
    // beyond the (cheap) scope push/pop.
    let (result, deps) = track(|| element.widget.build(cx.app_cx));
    result.map(|w| (w, deps))
}

fn reconcile_single_child(element: &mut Element, (built, deps): (BoxedWidget, std::collections::HashSet<SignalId>), cx: &mut ReconcileCx) {
    update_dependencies(element, deps, cx);
    let old_child = element.children.pop();
    let new_child = reconcile(old_child, built, cx);
    element.children.clear();
    element.children.push(new_child);
}

fn update_dependencies(element: &mut Element, new_deps: std::collections::HashSet<SignalId>, cx: &mut ReconcileCx) {
    // Drop subscriptions for signals no longer read.
    element.dependencies.retain(|id, token| {
        if new_deps.contains(id) {
            true
        } else {
            token.clone().unsubscribe();
            false
        }
    });
    for id in new_deps {
        element.dependencies.entry(id).or_insert_with(|| (cx.on_subscribe)(id, element.subtree_token));
    }
}

fn reconcile_children_list(element: &mut Element, cx: &mut ReconcileCx) {
    let new_widgets = element.widget.children_owned();
    let mut old_by_key: HashMap<SlotKey, Element> = HashMap::new();
    for (i, old) in element.children.drain(..).enumerate() {
        old_by_key.insert(slot_key(old.widget.as_ref(), i), old);
    }

    let mut reconciled = Vec::with_capacity(new_widgets.len());
    for (i, new_widget) in new_widgets.into_iter().enumerate() {
        let key = slot_key(new_widget.as_ref(), i);
        let old = old_by_key.remove(&key);
        reconciled.push(reconcile(old, new_widget, cx));
    }
    // Anything left in `old_by_key` had no counterpart in the new tree and
    // is disposed by `Element::drop`.
    element.children = reconciled;
}

fn slot_matches(old: &dyn Widget, new: &dyn Widget) -> bool {
    match (old.id(), new.id()) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => a == b,
        _ => old.type_name() == new.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_and_rect_basics() {
        let r = Rect::new(2, 3, 10, 5);
        assert!(r.contains(5, 5));
        assert!(!r.contains(20, 20));
    }

    #[test]
    fn constraints_clamp() {
        let c = Constraints { min_w: 2, max_w: 10, min_h: 0, max_h: 5 };
        assert_eq!(c.clamp_w(1), 2);
        assert_eq!(c.clamp_w(20), 10);
        assert_eq!(c.clamp_w(5), 5);
    }
}
