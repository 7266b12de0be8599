//! # spark-tui-core
//!
//! Reactive terminal UI engine: a fine-grained signal graph drives a
//! rebuild/reconcile pipeline over a persistent element tree, which is
//! measured by a constraint-based layout engine, composited into a grid of
//! styled cells, diffed against the previous frame, and fed through a
//! focus/keybind/hit-test router.
//!
//! ## Pipeline
//!
//! ```text
//! Signal writes → rebuild dirty widgets → reconcile into Element tree
//!   → layout (measure + arrange) → paint (Element tree → Frame)
//!   → diff (Frame → Frame) → patches → backend
//! ```
//!
//! Input flows the other way: backend events are decoded into [`input::KeyEvent`]
//! / [`input::MouseEvent`], routed through [`focus::FocusManager`] and
//! [`input::Router`] against the same element tree, and any signal writes they
//! trigger dirty the next tick.
//!
//! ## Modules
//!
//! - [`signal`] — the reactive graph: `Signal`, `Derived`, `effect`, `batch`, `track`.
//! - [`element`] — `Widget` trait, persistent `Element` tree, reconciliation.
//! - [`widgets`] — built-in widgets: `Text`, `Container`, `ErrorPlaceholder`.
//! - [`layout`] — the constraint/flex layout pass.
//! - [`style`] — gradients and color sources composited into cells.
//! - [`text`] — grapheme-aware wrapping, truncation, width measurement.
//! - [`paint`] — `Element` tree → [`paint::Frame`] of styled cells.
//! - [`frame`] — frame-to-frame differ producing coalesced [`frame::Patch`] runs.
//! - [`focus`] — the focus ring, traps, and focus-by-id requests.
//! - [`input`] — key/mouse decoding, keybind bubbling, hit-testing, click chains.
//! - [`scheduler`] — the per-tick driver tying every pass above together.
//! - [`theme`] — semantic color theme, presets, and variant styling.
//! - [`backend`] — terminal-facing I/O contract: commands, events, config.
//! - [`app`] — the `Application` trait and per-frame `Context`.
//! - [`error`] — the crate's error taxonomy.
//! - [`types`] — core value types: `Rgba`, `Cell`, `Attr`, border/alignment enums.

pub mod app;
pub mod backend;
pub mod element;
pub mod error;
pub mod focus;
pub mod frame;
pub mod input;
pub mod layout;
pub mod paint;
pub mod scheduler;
pub mod signal;
pub mod style;
pub mod text;
pub mod theme;
pub mod types;
pub mod widgets;

pub use app::{Application, Context, DependencyId};
pub use backend::{BackendEvent, Config, PaintCommand};
pub use element::{
    Axis, BorderDecoration, BoxedWidget, Constraints, CrossAxisAlign, Dim, EdgeInsets, Element,
    LayoutKind, MainAxisAlign, Offsets, ReconcileCx, Rect, Size, Widget, WidgetId, MAX_BUILD_DEPTH,
};
pub use error::{ConfigError, ContractError, InputDecodeError, RenderError};
pub use focus::FocusManager;
pub use frame::{diff, CellRun, Patch};
pub use input::{
    ClickChain, ClickEvent, DispatchResult, HitGrid, KeyCode, KeyEvent, Keybind, Modifiers,
    MouseButton, MouseEvent, MouseEventKind, MouseOutcome, Router,
};
pub use layout::layout;
pub use paint::{paint, Float, Frame, PaintContext};
pub use scheduler::Scheduler;
pub use signal::{batch, derived, effect, effect_scope, slot, track, Derived, EffectScope, ReactiveSet, Signal, Slot};
pub use style::{ColorSource, Gradient, GradientStop, Span};
pub use text::{display_width, graphemes, height_for_width, truncate, wrap, Grapheme, WrapMode};
pub use theme::{
    get_preset, get_variant_style, preset_names, Theme, ThemeColor, Variant, VariantStyle,
};
pub use types::{
    Attr, BorderStyle, Cell, ClipRect, JustifyContent, AlignItems, Overflow, Rgba, TextAlign,
};
pub use widgets::{Container, ErrorPlaceholder, Text};
