//! The application-facing surface: the root [`Application`] trait and the
//! [`Context`] every `build` call receives.
//!
//! Grounded on the teacher's top-level `App`/render-context split — the
//! teacher threads a context object carrying theme and focus state into
//! every component's render call; this keeps that shape but narrows it to
//! read-only accessors, since state mutation here happens through signals
//! rather than through the context itself.

use crate::input::Keybind;
use crate::signal::SignalId;
use crate::theme::Theme;

/// Read-only view handed to every `Widget::build` call. Carries the active
/// theme and whatever focus/hover identity the scheduler is tracking this
/// frame, so a widget can style itself (e.g. a focus ring) without owning
/// any of that state directly.
pub struct Context<'a> {
    theme: &'a Theme,
    focused_id: Option<&'a str>,
    hovered_id: Option<&'a str>,
}

impl<'a> Context<'a> {
    pub fn new(theme: &'a Theme, focused_id: Option<&'a str>, hovered_id: Option<&'a str>) -> Self {
        Self { theme, focused_id, hovered_id }
    }

    pub fn theme(&self) -> &Theme {
        self.theme
    }

    /// Whether the widget with this declared id currently holds focus.
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id == Some(id)
    }

    /// Whether the widget with this declared id is currently hovered by the
    /// pointer (set once hover enter has fired and before its matching
    /// leave, per the router's exactly-once invariant).
    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered_id == Some(id)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused_id
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered_id
    }
}

/// The root of an application: builds the widget tree and declares any
/// global keybinds that should fire regardless of which widget has focus
/// (the last stage of the router's bubbling order, per SPEC_FULL.md §4.E).
pub trait Application {
    /// Build the root widget. Invoked inside a tracking scope exactly like
    /// any composite widget's `build`; signals read here redrive the whole
    /// tree when they change.
    fn build(&self, cx: &Context) -> crate::element::BoxedWidget;

    /// App-level fallback keybinds, checked only after the focused leaf and
    /// all of its ancestors have had a chance to handle the key.
    fn keybinds(&self) -> Vec<Keybind> {
        Vec::new()
    }
}

/// Uniquely identifies one reactive dependency an element read during
/// `build`, re-exported here since `Context` consumers often need to name
/// the type without reaching into `signal` directly.
pub type DependencyId = SignalId;
