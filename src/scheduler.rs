//! The per-tick cooperative loop: drains queued input, reconciles the
//! widget tree, lays it out, paints it, diffs against the previous frame,
//! and hands the caller the resulting patch as back-end commands.
//!
//! Grounded on the teacher's `pipeline::mount` (which wires the
//! layout-derived and frame-buffer-derived signals together and drives one
//! render pass per effect firing) — this module is the library-level loop
//! the teacher never quite had in one place: `mount` wires *derived*
//! recomputation, but the actual "read input, rebuild, repaint" sequencing
//! lived in each example app's own run loop. Here it is pulled into the
//! crate as `Scheduler`, a single-threaded, non-async loop an embedder
//! drives by calling [`Scheduler::tick`] whenever the back-end has an event
//! or its own timer fires.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::app::{Application, Context};
use crate::backend::{BackendEvent, Config, PaintCommand};
use crate::element::{self, BoxedWidget, Element, ReconcileCx, WidgetId};
use crate::error::RenderError;
use crate::focus::FocusManager;
use crate::frame::{self, Patch};
use crate::input::{self, ClickChain, KeyCode, KeyEvent, Keybind, MouseEvent, Modifiers, Router};
use crate::layout;
use crate::paint::{self, Float, Frame};
use crate::signal::{self, SignalId, SubKey};
use crate::theme::Theme;
use crate::types::Cell;

/// How many consecutive back-end write failures the scheduler tolerates
/// before surfacing the error to its caller instead of retrying forever
/// (see [`crate::error::RenderError`]).
const MAX_CONSECUTIVE_RENDER_FAILURES: u32 = 5;

/// How many times one tick re-reconciles after a focus/hover change before
/// giving up and accepting a one-tick-stale render. Mirrors the build
/// recursion bound's role: a correctness backstop, not an expected path.
const MAX_FOCUS_SETTLE_PASSES: u32 = 4;

/// Adapts an [`Application`] into the single composite widget the
/// reconciler mounts at the tree's root, so `Scheduler` can reuse
/// `element::reconcile` instead of a bespoke top-level rebuild path.
struct RootWidget(Rc<dyn Application>);

impl element::Widget for RootWidget {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        "Root"
    }

    fn build(&self, cx: &Context) -> Option<BoxedWidget> {
        Some(self.0.build(cx))
    }

    /// `build` always reruns regardless of this (see `element::reconcile`'s
    /// doc comment), so this only controls whether the *root element
    /// itself* is marked dirty on reconcile. The default "always dirty"
    /// stance would mark it dirty every tick no matter what its rebuilt
    /// child looks like; the child's own `content_eq` already carries the
    /// real signal, so the root never needs to add a false positive on top.
    fn content_eq(&self, _other: &dyn element::Widget) -> bool {
        true
    }
}

fn translate(el: &mut Element, dx: u16, dy: u16) {
    el.geometry.x = el.geometry.x.saturating_add(dx);
    el.geometry.y = el.geometry.y.saturating_add(dy);
    el.clip.x = el.clip.x.saturating_add(dx);
    el.clip.y = el.clip.y.saturating_add(dy);
    for child in &mut el.children {
        translate(child, dx, dy);
    }
}

fn flatten_frame(frame: &Frame) -> Vec<Cell> {
    (0..frame.height).flat_map(|y| frame.row(y).iter().cloned()).collect()
}

fn patch_to_commands(patch: Patch, frame: &Frame) -> Vec<PaintCommand> {
    match patch {
        Patch::Full => vec![PaintCommand::FullRepaint { width: frame.width, height: frame.height, cells: flatten_frame(frame) }],
        Patch::Runs(runs) => {
            if runs.is_empty() {
                Vec::new()
            } else {
                vec![PaintCommand::CellRuns(runs)]
            }
        }
    }
}

/// Owns the whole reactive-UI pipeline for one application: the persistent
/// element tree, the previous frame (for diffing), focus/input state, and
/// any active floats (modals/popovers). A back-end drives it by calling
/// [`Scheduler::tick`] with whatever events it has decoded since the last
/// call.
pub struct Scheduler {
    app: Rc<dyn Application>,
    theme: Theme,
    config: Config,
    width: u16,
    height: u16,
    root: Option<Element>,
    prev_frame: Option<Frame>,
    last_hit: Option<input::HitGrid>,
    focus: FocusManager,
    router: Router,
    floats: Vec<Float>,
    hovered_widget_id: Option<WidgetId>,
    /// Subtree tokens a signal notification marked dirty since the last
    /// reconcile. `reconcile` itself always rebuilds every composite (see
    /// `element::reconcile`'s doc comment), so this set is not consulted for
    /// *what* to rebuild — only to decide whether a tick with no input is
    /// still worth reconciling at all.
    dirty_tokens: Rc<RefCell<std::collections::HashSet<SubKey>>>,
    consecutive_failures: u32,
}

impl Scheduler {
    pub fn new(app: Rc<dyn Application>, theme: Theme, config: Config, width: u16, height: u16) -> Result<Self, crate::error::ConfigError> {
        config.validate()?;
        let click_chain = ClickChain::with_params(
            std::time::Duration::from_millis(config.click_interval_ms),
            config.double_click_cell_tolerance,
        );
        Ok(Self {
            app,
            theme,
            focus: FocusManager::with_retry_frames(config.focus_retry_frames),
            router: Router::with_click_chain(click_chain),
            config,
            width,
            height,
            root: None,
            prev_frame: None,
            last_hit: None,
            floats: Vec::new(),
            hovered_widget_id: None,
            dirty_tokens: Rc::new(RefCell::new(std::collections::HashSet::new())),
            consecutive_failures: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Some(root) = &mut self.root {
            root.mark_dirty();
        }
    }

    /// Push a float (modal or popover) onto the stack. If `modal`, outside
    /// clicks dismiss it instead of reaching the base tree, and tab-cycling
    /// is trapped within the float's own focusable subtree until it is
    /// popped or dismissed.
    pub fn push_float(&mut self, float: Float) {
        if float.modal {
            self.focus.push_trap_from(&float.root);
        }
        self.floats.push(float);
    }

    pub fn pop_float(&mut self) -> Option<Float> {
        let float = self.floats.pop();
        if float.as_ref().is_some_and(|f| f.modal) {
            self.focus.release_trap();
        }
        float
    }

    /// Whether a tick is worth running without waiting for new input: a
    /// signal write landed since the last reconcile. Back-ends that sleep
    /// between ticks can poll this (alongside their input source) to avoid
    /// missing a signal-driven update with no accompanying keystroke.
    pub fn has_pending_work(&self) -> bool {
        !self.dirty_tokens.borrow().is_empty()
    }

    /// Run one iteration of the loop: apply `events` in order, reconcile,
    /// and — if anything changed — lay out, paint, and diff, returning the
    /// back-end commands needed to bring the terminal up to date. An empty
    /// vec means nothing changed and the back-end can skip writing.
    pub fn tick(&mut self, now: std::time::Instant, events: impl IntoIterator<Item = BackendEvent>) -> Vec<PaintCommand> {
        let mut resized = false;
        for event in events {
            match event {
                BackendEvent::Key(key) => self.handle_key(key),
                BackendEvent::Mouse(mouse) => self.handle_mouse(mouse, now),
                BackendEvent::Resize(w, h) => {
                    self.width = w;
                    self.height = h;
                    self.prev_frame = None;
                    self.router.reset_hover();
                    resized = true;
                }
                BackendEvent::Paste(text) => {
                    for ch in text.chars() {
                        self.handle_key(KeyEvent::new(KeyCode::Char(ch), Modifiers::NONE));
                    }
                }
                BackendEvent::FocusGained => tracing::trace!("terminal gained focus"),
                BackendEvent::FocusLost => {
                    tracing::trace!("terminal lost focus");
                    self.router.reset_hover();
                }
            }
        }

        self.reconcile_settled();

        let dirty = self.root.as_ref().is_some_and(Element::any_dirty);
        if !resized && !dirty {
            return Vec::new();
        }

        self.layout_and_paint()
    }

    fn handle_key(&mut self, event: KeyEvent) {
        let Some(root) = &self.root else { return };
        let focused = self.focus.focused_id();
        let app_keybinds: Vec<Keybind> = self.app.keybinds();
        let handled = input::dispatch_key(root, focused, &app_keybinds, &event);
        if handled {
            return;
        }
        match event.code {
            KeyCode::Tab if !event.modifiers.contains(Modifiers::SHIFT) => self.focus.next(),
            KeyCode::Tab | KeyCode::BackTab => self.focus.prev(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, now: std::time::Instant) {
        use crate::input::MouseEventKind;

        if let MouseEventKind::Down(_) = event.kind {
            if let Some(top) = self.floats.last() {
                if top.modal && !top.rect.contains(event.x, event.y) {
                    if let Some(dismiss) = top.dismiss.clone() {
                        dismiss();
                    }
                    self.floats.pop();
                    self.focus.release_trap();
                    return;
                }
            }
        }

        let Some(hit) = &self.last_hit else { return };
        let base = self.root.as_ref();
        let mut trees: Vec<&Element> = self.floats.iter().map(|f| &f.root).collect();
        if let Some(root) = base {
            trees.push(root);
        }
        self.router.dispatch_mouse(&trees, hit, event, now);
    }

    /// Reconcile, then resolve focus/hover against the freshly built tree.
    /// Because `Context::is_focused`/`is_hovered` reads aren't signal
    /// tracked, a focus or hover change that happens *during* this tick
    /// (e.g. a click moves focus) needs a second reconcile pass before the
    /// same tick's paint reflects it, rather than lagging a full tick
    /// behind.
    fn reconcile_settled(&mut self) {
        for _ in 0..MAX_FOCUS_SETTLE_PASSES {
            let focused_before = self.focus.focused_id().cloned();
            let hovered_before = self.hovered_widget_id.clone();

            self.reconcile_once();

            if let Some(root) = &self.root {
                let float_roots = self.floats.iter().map(|f| &f.root);
                self.focus.rebuild_ring_from(std::iter::once(root).chain(float_roots));
                self.hovered_widget_id = self.router.hovered_token().and_then(|token| {
                    std::iter::once(root)
                        .chain(self.floats.iter().map(|f| &f.root))
                        .find_map(|tree| input::find_by_token(tree, token))
                        .and_then(Element::id)
                        .cloned()
                });
            }

            let settled = self.focus.focused_id().cloned() == focused_before && self.hovered_widget_id == hovered_before;
            if settled {
                return;
            }
        }
        tracing::warn!("focus/hover did not settle within the retry budget; rendering a possibly one-tick-stale frame");
    }

    fn reconcile_once(&mut self) {
        let focused_str = self.focus.focused_id().map(|s| s.as_ref());
        let hovered_str = self.hovered_widget_id.as_deref();
        let app_cx = Context::new(&self.theme, focused_str, hovered_str);

        let dirty_tokens = self.dirty_tokens.clone();
        let on_subscribe = move |id: SignalId, key: SubKey| -> signal::SubscriptionToken {
            let dirty_tokens = dirty_tokens.clone();
            signal::subscribe_by_id(id, key, move || {
                dirty_tokens.borrow_mut().insert(key);
            })
        };

        let mut cx = ReconcileCx { app_cx: &app_cx, depth: 0, path: Vec::new(), on_subscribe: &on_subscribe };
        let existing = self.root.take();
        let new_widget: BoxedWidget = Box::new(RootWidget(self.app.clone()));
        self.root = Some(element::reconcile(existing, new_widget, &mut cx));
    }

    fn layout_and_paint(&mut self) -> Vec<PaintCommand> {
        let Some(root) = &mut self.root else { return Vec::new() };

        layout::layout(root, self.width, self.height);
        for float in &mut self.floats {
            layout::layout(&mut float.root, float.rect.w, float.rect.h);
            translate(&mut float.root, float.rect.x, float.rect.y);
        }

        let (frame, hit) = paint::paint(root, &self.floats, &self.theme, self.width, self.height);
        let patch = frame::diff(self.prev_frame.as_ref(), &frame);

        root.clear_dirty();
        for float in &mut self.floats {
            float.root.clear_dirty();
        }
        self.dirty_tokens.borrow_mut().clear();

        let commands = patch_to_commands(patch, &frame);
        self.prev_frame = Some(frame);
        self.last_hit = Some(hit);
        commands
    }

    /// Report a failed back-end write (e.g. a flushed write to the
    /// terminal returned an I/O error). Returns `Err` once the failure
    /// streak exceeds [`MAX_CONSECUTIVE_RENDER_FAILURES`], at which point
    /// the caller should stop looping rather than spin against a dead
    /// back-end; otherwise the next tick's patch is expected to retry the
    /// same write.
    pub fn report_render_failure(&mut self, source: std::io::Error) -> Result<(), RenderError> {
        self.consecutive_failures += 1;
        let err = RenderError { attempt: self.consecutive_failures, source };
        if self.consecutive_failures >= MAX_CONSECUTIVE_RENDER_FAILURES {
            return Err(err);
        }
        tracing::warn!(attempt = self.consecutive_failures, "back-end write failed, retrying next tick");
        Ok(())
    }

    pub fn report_render_success(&mut self) {
        self.consecutive_failures = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Signal;
    use crate::widgets::Text;
    use std::time::Instant;

    struct Counter {
        count: Signal<i64>,
    }

    impl Application for Counter {
        fn build(&self, cx: &Context) -> BoxedWidget {
            let _ = cx;
            Box::new(Text::new(format!("count: {}", self.count.get())))
        }
    }

    fn app() -> Rc<dyn Application> {
        Rc::new(Counter { count: Signal::new(0) })
    }

    #[test]
    fn first_tick_produces_a_full_repaint() {
        let mut sched = Scheduler::new(app(), Theme::default(), Config::default(), 20, 3).unwrap();
        let commands = sched.tick(Instant::now(), std::iter::empty());
        assert!(matches!(commands.as_slice(), [PaintCommand::FullRepaint { .. }]));
    }

    #[test]
    fn idle_tick_after_settling_emits_nothing() {
        let mut sched = Scheduler::new(app(), Theme::default(), Config::default(), 20, 3).unwrap();
        sched.tick(Instant::now(), std::iter::empty());
        let commands = sched.tick(Instant::now(), std::iter::empty());
        assert!(commands.is_empty());
    }

    #[test]
    fn signal_write_dirties_the_next_tick() {
        let counter = Rc::new(Counter { count: Signal::new(0) });
        let app: Rc<dyn Application> = counter.clone();
        let mut sched = Scheduler::new(app, Theme::default(), Config::default(), 20, 3).unwrap();
        sched.tick(Instant::now(), std::iter::empty());
        counter.count.set(1);
        assert!(sched.has_pending_work());
        let commands = sched.tick(Instant::now(), std::iter::empty());
        assert!(!commands.is_empty());
        assert!(!sched.has_pending_work());
    }

    #[test]
    fn resize_forces_a_repaint_even_with_nothing_dirty() {
        let mut sched = Scheduler::new(app(), Theme::default(), Config::default(), 20, 3).unwrap();
        sched.tick(Instant::now(), std::iter::empty());
        let commands = sched.tick(Instant::now(), [BackendEvent::Resize(30, 5)]);
        assert!(matches!(commands.as_slice(), [PaintCommand::FullRepaint { width: 30, height: 5, .. }]));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = Config { click_interval_ms: 0, ..Config::default() };
        assert!(Scheduler::new(app(), Theme::default(), cfg, 10, 10).is_err());
    }

    #[test]
    fn modal_click_outside_dismisses_exactly_once_and_pops_the_float() {
        use crate::element::Rect;
        use crate::input::{MouseButton, MouseEvent, MouseEventKind};

        let mut sched = Scheduler::new(app(), Theme::default(), Config::default(), 80, 24).unwrap();
        sched.tick(Instant::now(), std::iter::empty());

        let fired = Rc::new(std::cell::Cell::new(0u32));
        let fired_cb = fired.clone();
        sched.push_float(Float {
            root: Element::for_test(Box::new(Text::new("dialog"))),
            rect: Rect { x: 30, y: 9, w: 20, h: 5 },
            modal: true,
            backdrop: None,
            dismiss: Some(Rc::new(move || fired_cb.set(fired_cb.get() + 1))),
        });
        assert_eq!(sched.floats.len(), 1);

        let outside = MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), x: 2, y: 2, modifiers: Modifiers::NONE };
        sched.tick(Instant::now(), [BackendEvent::Mouse(outside)]);

        assert_eq!(fired.get(), 1);
        assert!(sched.floats.is_empty());
    }
}
