//! Computed values: a read-only signal whose value is recomputed from other
//! signals on every read.
//!
//! Grounded on the teacher's pervasive `spark_signals::derived(|| ...)` calls
//! (every `theme`/`pipeline` file builds derived values from signals rather
//! than recomputing by hand). A `Derived::get` runs its compute function
//! inside a tracking scope, so reading a derived inside an enclosing
//! build/effect scope still records the *upstream* signals into that scope
//! — a composite that reads a derived re-renders exactly when the signals
//! behind it change, with no separate subscription bookkeeping required.

use std::rc::Rc;

use super::track;

/// A read-only value recomputed from other signals each time it is read.
#[derive(Clone)]
pub struct Derived<T> {
    compute: Rc<dyn Fn() -> T>,
}

impl<T: Clone + 'static> Derived<T> {
    /// Recompute and return the current value, tracking every signal read
    /// during the computation into the active scope (if any).
    pub fn get(&self) -> T {
        let (value, _deps) = track(|| (self.compute)());
        value
    }

    /// Recompute without tracking.
    pub fn peek(&self) -> T {
        (self.compute)()
    }
}

/// Create a derived value computed from `f`.
pub fn derived<T: Clone + 'static>(f: impl Fn() -> T + 'static) -> Derived<T> {
    Derived { compute: Rc::new(f) }
}

#[cfg(test)]
mod tests {
    use super::super::Signal;
    use super::*;

    #[test]
    fn derived_recomputes_after_write() {
        let s = Signal::new(1);
        let s2 = s.clone();
        let d = derived(move || s2.peek() * 2);
        assert_eq!(d.get(), 2);
        s.set(5);
        assert_eq!(d.get(), 10);
    }

    #[test]
    fn derived_tracks_its_upstream_signals() {
        let s = Signal::new(1);
        let s2 = s.clone();
        let d = derived(move || s2.get());
        let (_, deps) = track(|| d.get());
        assert!(deps.contains(&s.id()));
    }
}
