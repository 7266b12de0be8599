//! Key and mouse events, keybind matching, and the router that dispatches
//! decoded terminal events into the element tree.
//!
//! Grounded on the teacher's `Attr` bitflags (`types.rs`) for the
//! `Modifiers` shape, and on `crossterm::event` for the raw vocabulary this
//! module normalizes into (`KeyCode`, mouse buttons) — the crate already
//! depends on `crossterm` for terminal I/O, so decoding reuses its types at
//! the edge and only this module's own `KeyEvent`/`MouseEvent` cross into
//! the rest of the tree.

use std::time::{Duration, Instant};

use crate::element::{Element, WidgetId};
use crate::signal::SubKey;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE = 0;
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(m: crossterm::event::KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        if m.contains(crossterm::event::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if m.contains(crossterm::event::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        if m.contains(crossterm::event::KeyModifiers::ALT) {
            out |= Modifiers::ALT;
        }
        if m.contains(crossterm::event::KeyModifiers::SUPER) {
            out |= Modifiers::SUPER;
        }
        out
    }
}

/// A normalized key identity: either a printable character or a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Insert,
    F(u8),
}

impl From<crossterm::event::KeyCode> for KeyCode {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode as CK;
        match code {
            CK::Char(c) => KeyCode::Char(c),
            CK::Enter => KeyCode::Enter,
            CK::Tab => KeyCode::Tab,
            CK::BackTab => KeyCode::BackTab,
            CK::Backspace => KeyCode::Backspace,
            CK::Esc => KeyCode::Escape,
            CK::Left => KeyCode::Left,
            CK::Right => KeyCode::Right,
            CK::Up => KeyCode::Up,
            CK::Down => KeyCode::Down,
            CK::Home => KeyCode::Home,
            CK::End => KeyCode::End,
            CK::PageUp => KeyCode::PageUp,
            CK::PageDown => KeyCode::PageDown,
            CK::Delete => KeyCode::Delete,
            CK::Insert => KeyCode::Insert,
            CK::F(n) => KeyCode::F(n),
            _ => KeyCode::Escape,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A canonical string form (e.g. `"ctrl+shift+a"`, `"enter"`) used for
    /// keybind matching and for logging without needing `Debug`.
    pub fn canonical(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(Modifiers::CTRL) {
            parts.push("ctrl");
        }
        if self.modifiers.contains(Modifiers::ALT) {
            parts.push("alt");
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            parts.push("shift");
        }
        if self.modifiers.contains(Modifiers::SUPER) {
            parts.push("super");
        }
        let key = key_name(self.code);
        let mut s = parts.join("+");
        if !s.is_empty() {
            s.push('+');
        }
        s.push_str(&key);
        s
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::BackTab => "backtab".into(),
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Escape => "esc".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        KeyCode::PageUp => "pageup".into(),
        KeyCode::PageDown => "pagedown".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Insert => "insert".into(),
        KeyCode::F(n) => format!("f{n}"),
    }
}

/// A declarative key binding: matches by canonical string, so
/// `Keybind::new("ctrl+s")` matches a `KeyEvent` whose `canonical()` equals
/// `"ctrl+s"` regardless of how the modifiers were produced.
#[derive(Clone)]
pub struct Keybind {
    pattern: String,
    pub action: std::rc::Rc<dyn Fn()>,
}

impl Keybind {
    pub fn new(pattern: impl Into<String>, action: impl Fn() + 'static) -> Self {
        Self { pattern: pattern.into(), action: std::rc::Rc::new(action) }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.pattern == event.canonical()
    }
}

impl std::fmt::Debug for Keybind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keybind").field("pattern", &self.pattern).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

/// A resolved click, after click-chain counting: `count` is 1 for a single
/// click, 2 for a double (within the interval and spatial tolerance of the
/// previous one), capped at 3 ("triple-click") beyond which it stays at 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub button: MouseButton,
    pub x: u16,
    pub y: u16,
    pub count: u8,
    pub modifiers: Modifiers,
}

/// Tracks consecutive same-button mouse-down events to fold them into
/// double/triple clicks. A new down is part of the same chain as the last
/// one if it lands within `interval` and `tolerance` cells of it.
pub struct ClickChain {
    interval: Duration,
    tolerance: u16,
    last: Option<(MouseButton, u16, u16, Instant)>,
    count: u8,
}

impl ClickChain {
    const DEFAULT_INTERVAL: Duration = Duration::from_millis(400);
    const DEFAULT_TOLERANCE: u16 = 1;

    pub fn new() -> Self {
        Self::with_params(Self::DEFAULT_INTERVAL, Self::DEFAULT_TOLERANCE)
    }

    /// Build a chain with an explicit interval/tolerance, per
    /// [`crate::backend::Config`]'s `click_interval_ms` /
    /// `double_click_cell_tolerance`.
    pub fn with_params(interval: Duration, tolerance: u16) -> Self {
        Self { interval, tolerance, last: None, count: 0 }
    }

    /// Register a mouse-down at `(x, y)` with `button` at `now`, returning
    /// the chain count (1, 2, or 3) this down belongs to.
    pub fn register(&mut self, button: MouseButton, x: u16, y: u16, now: Instant) -> u8 {
        let continues = match self.last {
            Some((last_button, lx, ly, last_time)) => {
                last_button == button
                    && now.saturating_duration_since(last_time) <= self.interval
                    && x.abs_diff(lx) <= self.tolerance
                    && y.abs_diff(ly) <= self.tolerance
            }
            None => false,
        };
        self.count = if continues { (self.count + 1).min(3) } else { 1 };
        self.last = Some((button, x, y, now));
        self.count
    }
}

impl Default for ClickChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-cell hit-test grid produced by the compositor: which element
/// (by `subtree_token`) owns each painted cell, plus that element's ancestor
/// chain so the router can walk from leaf to root without touching the
/// element tree's raw pointers.
pub struct HitGrid {
    pub width: u16,
    pub height: u16,
    tokens: Vec<Option<SubKey>>,
    /// `subtree_token -> ancestor chain, leaf-exclusive, nearest first`.
    ancestors: std::collections::HashMap<SubKey, Vec<SubKey>>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height, tokens: vec![None; width as usize * height as usize], ancestors: std::collections::HashMap::new() }
    }

    pub fn set(&mut self, x: u16, y: u16, token: SubKey) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.tokens[idx] = Some(token);
        }
    }

    pub fn record_ancestors(&mut self, token: SubKey, chain: Vec<SubKey>) {
        self.ancestors.insert(token, chain);
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<SubKey> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.tokens[y as usize * self.width as usize + x as usize]
    }

    /// The hit token followed by its ancestors, nearest first, for bubbling.
    pub fn chain(&self, token: SubKey) -> Vec<SubKey> {
        let mut out = vec![token];
        if let Some(chain) = self.ancestors.get(&token) {
            out.extend(chain.iter().copied());
        }
        out
    }
}

/// Outcome the router reports back to the scheduler after dispatching one
/// raw terminal event, so it knows whether a repaint is warranted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub handled: bool,
}

pub(crate) fn find_by_token<'a>(el: &'a Element, token: SubKey) -> Option<&'a Element> {
    if el.subtree_token == token {
        return Some(el);
    }
    el.children.iter().find_map(|c| find_by_token(c, token))
}

fn find_path_by_id<'a>(el: &'a Element, id: &WidgetId, path: &mut Vec<&'a Element>) -> bool {
    path.push(el);
    if el.id() == Some(id) {
        return true;
    }
    for child in &el.children {
        if find_path_by_id(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Dispatch a key event: bubble from the focused leaf (its own `on_key`)
/// up through every ancestor's declared `keybinds`, then fall back to the
/// app-level keybinds. Returns whether anything handled it.
pub fn dispatch_key(root: &Element, focused_id: Option<&WidgetId>, app_keybinds: &[Keybind], event: &KeyEvent) -> bool {
    if let Some(id) = focused_id {
        let mut path = Vec::new();
        if find_path_by_id(root, id, &mut path) {
            for (i, node) in path.iter().enumerate().rev() {
                if i == path.len() - 1 && node.widget.on_key(event) {
                    return true;
                }
                for kb in node.widget.keybinds() {
                    if kb.matches(event) {
                        (kb.action)();
                        return true;
                    }
                }
            }
        }
    }
    for kb in app_keybinds {
        if kb.matches(event) {
            (kb.action)();
            return true;
        }
    }
    false
}

/// Outcome of dispatching one mouse event, so the scheduler can react to
/// things the router itself has no opinion on (e.g. a click that hit no
/// element at all dismisses a modal float).
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseOutcome {
    pub target: Option<SubKey>,
    pub missed: bool,
}

/// Mouse hit-testing, click-chain counting, and hover transition tracking,
/// across ticks.
pub struct Router {
    click_chain: ClickChain,
    hovered: Option<SubKey>,
    /// The deepest element a `Down` landed on, so `Up` can check it's an
    /// ancestor-or-equal of the release target before firing `click` (§4.G:
    /// "release delivers click to the release target only if the press
    /// target is an ancestor-or-equal; otherwise only mouse_up").
    press_target: Option<SubKey>,
}

impl Router {
    pub fn new() -> Self {
        Self::with_click_chain(ClickChain::new())
    }

    pub fn with_click_chain(click_chain: ClickChain) -> Self {
        Self { click_chain, hovered: None, press_target: None }
    }

    /// Dispatch one mouse event, hit-testing against `trees` (the base
    /// element tree plus any active floats, topmost-painted first — floats
    /// overwrite the hit grid for the cells they cover, so a token may only
    /// resolve in one of these trees).
    pub fn dispatch_mouse(&mut self, trees: &[&Element], hit: &HitGrid, event: MouseEvent, now: Instant) -> MouseOutcome {
        let token = hit.hit(event.x, event.y);
        let find = |t: SubKey| trees.iter().find_map(|root| find_by_token(root, t));
        let mut outcome = MouseOutcome::default();

        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if token != self.hovered {
                    if let Some(prev) = self.hovered {
                        if let Some(el) = find(prev) {
                            el.widget.on_hover(false);
                        }
                    }
                    if let Some(t) = token {
                        if let Some(el) = find(t) {
                            el.widget.on_hover(true);
                        }
                    }
                    self.hovered = token;
                }
                outcome.target = token;
            }
            MouseEventKind::Down(_button) => match token {
                Some(t) => {
                    if let Some(el) = find(t) {
                        el.widget.on_mouse_down(&event);
                    }
                    self.press_target = Some(t);
                    outcome.target = Some(t);
                }
                None => {
                    self.press_target = None;
                    outcome.missed = true;
                }
            },
            MouseEventKind::Up(button) => {
                match token {
                    Some(t) => {
                        if let Some(el) = find(t) {
                            el.widget.on_mouse_up(&event);
                        }
                        let fires_click = self.press_target.is_some_and(|press| hit.chain(t).contains(&press));
                        if fires_click {
                            let count = self.click_chain.register(button, event.x, event.y, now);
                            if let Some(el) = find(t) {
                                el.widget.on_click(&ClickEvent { button, x: event.x, y: event.y, count, modifiers: event.modifiers });
                            }
                        }
                        outcome.target = Some(t);
                    }
                    None => outcome.missed = true,
                }
                self.press_target = None;
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                outcome.target = token;
            }
        }

        outcome
    }

    /// Clear hover state without firing `on_hover(false)` — used when the
    /// whole tree is about to be replaced (e.g. a resize-triggered full
    /// rebuild) and the old element no longer exists to notify.
    pub fn reset_hover(&mut self) {
        self.hovered = None;
    }

    /// The element currently marked hovered, if any — used by the scheduler
    /// to resolve a declared widget id for `Context::is_hovered`.
    pub fn hovered_token(&self) -> Option<SubKey> {
        self.hovered
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_string_orders_modifiers() {
        let e = KeyEvent::new(KeyCode::Char('s'), Modifiers::CTRL | Modifiers::SHIFT);
        assert_eq!(e.canonical(), "ctrl+shift+s");
    }

    #[test]
    fn keybind_matches_canonical_form() {
        let kb = Keybind::new("ctrl+s", || {});
        let e = KeyEvent::new(KeyCode::Char('s'), Modifiers::CTRL);
        assert!(kb.matches(&e));
        let other = KeyEvent::new(KeyCode::Char('s'), Modifiers::NONE);
        assert!(!kb.matches(&other));
    }

    #[test]
    fn click_chain_counts_double_click() {
        let mut chain = ClickChain::new();
        let t0 = Instant::now();
        assert_eq!(chain.register(MouseButton::Left, 5, 5, t0), 1);
        assert_eq!(chain.register(MouseButton::Left, 5, 5, t0 + Duration::from_millis(100)), 2);
    }

    #[test]
    fn click_chain_resets_outside_tolerance() {
        let mut chain = ClickChain::new();
        let t0 = Instant::now();
        assert_eq!(chain.register(MouseButton::Left, 5, 5, t0), 1);
        assert_eq!(chain.register(MouseButton::Left, 50, 50, t0 + Duration::from_millis(50)), 1);
    }

    #[test]
    fn click_chain_resets_after_interval() {
        let mut chain = ClickChain::new();
        let t0 = Instant::now();
        assert_eq!(chain.register(MouseButton::Left, 5, 5, t0), 1);
        assert_eq!(chain.register(MouseButton::Left, 5, 5, t0 + Duration::from_millis(500)), 1);
    }

    #[test]
    fn hit_grid_reports_ancestor_chain() {
        let mut grid = HitGrid::new(4, 4);
        grid.set(1, 1, 7);
        grid.record_ancestors(7, vec![3, 1]);
        assert_eq!(grid.hit(1, 1), Some(7));
        assert_eq!(grid.chain(7), vec![7, 3, 1]);
        assert_eq!(grid.hit(2, 2), None);
    }

    struct Clicky(Rc<std::cell::Cell<u8>>);
    impl crate::element::Widget for Clicky {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
        fn type_name(&self) -> &'static str {
            "Clicky"
        }
        fn on_click(&self, _e: &ClickEvent) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn clicky_tree() -> (Element, Rc<std::cell::Cell<u8>>, Rc<std::cell::Cell<u8>>) {
        use crate::element::BoxedWidget;
        let root_clicks = Rc::new(std::cell::Cell::new(0));
        let child_clicks = Rc::new(std::cell::Cell::new(0));
        let mut root = Element::for_test(Box::new(Clicky(root_clicks.clone())) as BoxedWidget);
        root.subtree_token = 1;
        let mut child = Element::for_test(Box::new(Clicky(child_clicks.clone())) as BoxedWidget);
        child.subtree_token = 2;
        root.children.push(child);
        (root, root_clicks, child_clicks)
    }

    #[test]
    fn click_fires_when_press_is_ancestor_of_release() {
        let (root, _root_clicks, child_clicks) = clicky_tree();
        let mut grid = HitGrid::new(4, 4);
        grid.set(0, 0, 1);
        grid.set(1, 1, 2);
        grid.record_ancestors(2, vec![1]);

        let mut router = Router::new();
        let t0 = Instant::now();
        router.dispatch_mouse(&[&root], &grid, MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), x: 0, y: 0, modifiers: Modifiers::NONE }, t0);
        router.dispatch_mouse(&[&root], &grid, MouseEvent { kind: MouseEventKind::Up(MouseButton::Left), x: 1, y: 1, modifiers: Modifiers::NONE }, t0);
        assert_eq!(child_clicks.get(), 1, "press on ancestor, release on descendant fires click on the release target");
    }

    #[test]
    fn click_does_not_fire_when_press_is_descendant_of_release() {
        let (root, root_clicks, _child_clicks) = clicky_tree();
        let mut grid = HitGrid::new(4, 4);
        grid.set(0, 0, 1);
        grid.set(1, 1, 2);
        grid.record_ancestors(2, vec![1]);

        let mut router = Router::new();
        let t0 = Instant::now();
        router.dispatch_mouse(&[&root], &grid, MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), x: 1, y: 1, modifiers: Modifiers::NONE }, t0);
        router.dispatch_mouse(&[&root], &grid, MouseEvent { kind: MouseEventKind::Up(MouseButton::Left), x: 0, y: 0, modifiers: Modifiers::NONE }, t0);
        assert_eq!(root_clicks.get(), 0, "press on descendant, release on ancestor must not fire click");
    }

    #[test]
    fn dispatch_mouse_searches_multiple_trees() {
        let (root, _root_clicks, child_clicks) = clicky_tree();
        let mut other = Element::for_test(Box::new(Clicky(Rc::new(std::cell::Cell::new(0)))) as crate::element::BoxedWidget);
        other.subtree_token = 99;

        let mut grid = HitGrid::new(4, 4);
        grid.set(2, 2, 2);

        let mut router = Router::new();
        let t0 = Instant::now();
        router.dispatch_mouse(&[&other, &root], &grid, MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), x: 2, y: 2, modifiers: Modifiers::NONE }, t0);
        router.dispatch_mouse(&[&other, &root], &grid, MouseEvent { kind: MouseEventKind::Up(MouseButton::Left), x: 2, y: 2, modifiers: Modifiers::NONE }, t0);
        assert_eq!(child_clicks.get(), 1, "hit token should resolve even when its owning tree isn't first in the list");
    }
}
