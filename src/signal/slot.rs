//! `Slot<T>`: a property that may be bound to a static value, a plain
//! getter, or a [`Signal`]/[`Derived`] — read uniformly through `.get()`.
//!
//! Grounded on the teacher's `FlexNode` (`engine/flex_node.rs`), whose 33
//! layout properties are each a `spark_signals::Slot` so a widget can bind
//! e.g. `width` to a signal (reactive) or a literal (static) without the
//! layout engine caring which. Kept for the same reason here: a widget's
//! `Dim`/color/text fields are plain values rebuilt every frame (see
//! `crate::element::Widget`), but application code composing those fields
//! from reactive state benefits from binding a `Slot` once rather than
//! re-reading a `Signal` by hand at every call site.

use super::{track, Derived, Signal, SignalId};

enum Source<T> {
    Static(T),
    Signal(Signal<T>),
    Derived(Derived<T>),
    Getter(std::rc::Rc<dyn Fn() -> T>),
}

/// A property bound to one of: a static value, a signal, a derived, or an
/// arbitrary getter closure.
pub struct Slot<T> {
    source: Source<T>,
}

impl<T: Clone + 'static> Slot<T> {
    pub fn static_value(value: T) -> Self {
        Self { source: Source::Static(value) }
    }

    pub fn from_signal(signal: Signal<T>) -> Self {
        Self { source: Source::Signal(signal) }
    }

    pub fn from_derived(derived: Derived<T>) -> Self {
        Self { source: Source::Derived(derived) }
    }

    pub fn from_getter(getter: impl Fn() -> T + 'static) -> Self {
        Self { source: Source::Getter(std::rc::Rc::new(getter)) }
    }

    /// Read the current value, tracking the underlying signal (if any) into
    /// the active scope.
    pub fn get(&self) -> T {
        match &self.source {
            Source::Static(v) => v.clone(),
            Source::Signal(s) => s.get(),
            Source::Derived(d) => d.get(),
            Source::Getter(f) => {
                let (v, _deps) = track(|| f());
                v
            }
        }
    }

    /// Read without tracking.
    pub fn peek(&self) -> T {
        match &self.source {
            Source::Static(v) => v.clone(),
            Source::Signal(s) => s.peek(),
            Source::Derived(d) => d.peek(),
            Source::Getter(f) => f(),
        }
    }

    /// The backing signal's id, for dependency bookkeeping, if this slot is
    /// bound to a plain `Signal` (not a static value, derived, or getter —
    /// those either have no stable id or may read several signals).
    pub fn signal_id(&self) -> Option<SignalId> {
        match &self.source {
            Source::Signal(s) => Some(s.id()),
            _ => None,
        }
    }
}

/// Construct a static [`Slot`]. Named after the teacher's free `slot(value)`
/// constructor (`spark_signals::slot`), kept as the ergonomic entry point.
pub fn slot<T: Clone + 'static>(value: T) -> Slot<T> {
    Slot::static_value(value)
}

impl<T: Clone + 'static> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Slot::static_value(value)
    }
}

impl<T: Clone + 'static> From<Signal<T>> for Slot<T> {
    fn from(signal: Signal<T>) -> Self {
        Slot::from_signal(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_slot_returns_value() {
        let s: Slot<u16> = slot(42);
        assert_eq!(s.get(), 42);
    }

    #[test]
    fn signal_slot_tracks_through() {
        let sig = Signal::new(1);
        let s = Slot::from_signal(sig.clone());
        let (_, deps) = track(|| s.get());
        assert!(deps.contains(&sig.id()));
        sig.set(2);
        assert_eq!(s.get(), 2);
    }

    #[test]
    fn getter_slot_computes_each_read() {
        let n = std::rc::Rc::new(std::cell::Cell::new(0));
        let n2 = n.clone();
        let s = Slot::from_getter(move || {
            n2.set(n2.get() + 1);
            n2.get()
        });
        assert_eq!(s.get(), 1);
        assert_eq!(s.get(), 2);
    }
}
