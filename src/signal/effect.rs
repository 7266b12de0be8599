//! Effects: side-effecting closures that re-run when their dependencies
//! change.
//!
//! Grounded on the teacher's `spark_signals::effect(|| ...)` calls in
//! `pipeline::mount` (wiring `layoutDerived`/`frameBufferDerived` so layout
//! and paint re-run on the signals they read). The engine itself drives
//! rebuild/layout/paint from the scheduler's dirty-subtree set rather than
//! from ad-hoc effects, but `effect`/`effect_scope` are kept as the general
//! low-level primitive other modules (and application code) build on, the
//! same role they play in the teacher.

use std::cell::RefCell;
use std::rc::Rc;

use super::{subscribe_by_id, track, unsubscribe_all, SubKey};

thread_local! {
    static NEXT_EFFECT_KEY: RefCell<SubKey> = const { RefCell::new(1 << 62) };
}

fn next_effect_key() -> SubKey {
    NEXT_EFFECT_KEY.with(|k| {
        let mut k = k.borrow_mut();
        let v = *k;
        *k += 1;
        v
    })
}

/// An owned handle to a registered effect. Dropping it does not stop the
/// effect (effects are not currently cancellable individually — only
/// [`EffectScope::dispose`] tears every effect registered within it down at
/// once, mirroring the teacher's lack of a per-effect `stop()` outside a
/// scope).
pub struct EffectHandle {
    key: SubKey,
}

impl EffectHandle {
    pub fn key(&self) -> SubKey {
        self.key
    }
}

/// Run `f` once immediately, tracking the signals it reads, and re-run it
/// (fully re-tracking dependencies each time) whenever any of those signals
/// write a new value.
///
/// This has no automatic disposal: use [`effect_scope`] to group effects
/// that should all stop together (e.g. everything a component's lifetime
/// owns).
pub fn effect(f: impl Fn() + 'static) -> EffectHandle {
    let key = next_effect_key();
    run_and_resubscribe(Rc::new(f), key);
    EffectHandle { key }
}

fn run_and_resubscribe(f: Rc<dyn Fn()>, key: SubKey) {
    // Drop whatever this effect was subscribed to last run before
    // re-tracking — the dependency set can shrink or shift entirely
    // between runs (e.g. a conditional that stops reading a signal).
    unsubscribe_all(key);
    let (_, deps) = track(|| f());
    for id in deps {
        let f = f.clone();
        subscribe_by_id(id, key, move || run_and_resubscribe(f.clone(), key));
    }
}

/// A group of effects that dispose together. Grounded on the teacher's
/// per-component `Cleanup` closures (`primitives::box_primitive` returns one
/// that unregisters every signal subscription the component made); an
/// `EffectScope` is the same idea generalized to plain effects rather than
/// component lifetimes.
pub struct EffectScope {
    handles: Vec<EffectHandle>,
}

impl EffectScope {
    pub fn new() -> Self {
        Self { handles: Vec::new() }
    }

    pub fn add(&mut self, f: impl Fn() + 'static) {
        self.handles.push(effect(f));
    }

    /// Stop every effect registered in this scope from reacting further.
    /// Already-fired side effects are not undone.
    pub fn dispose(&mut self) {
        for h in self.handles.drain(..) {
            unsubscribe_all(h.key);
        }
    }
}

impl Default for EffectScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Construct a new, empty [`EffectScope`].
pub fn effect_scope() -> EffectScope {
    EffectScope::new()
}

impl Drop for EffectScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::Signal;
    use std::cell::Cell;

    #[test]
    fn effect_runs_immediately_and_on_change() {
        let s = Signal::new(1);
        let calls = Rc::new(Cell::new(0));
        let s2 = s.clone();
        let c2 = calls.clone();
        let _h = effect(move || {
            let _ = s2.get();
            c2.set(c2.get() + 1);
        });
        assert_eq!(calls.get(), 1);
        s.set(2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn effect_scope_dispose_stops_reruns() {
        let s = Signal::new(1);
        let calls = Rc::new(Cell::new(0));
        let mut scope = EffectScope::new();
        let s2 = s.clone();
        let c2 = calls.clone();
        scope.add(move || {
            let _ = s2.get();
            c2.set(c2.get() + 1);
        });
        assert_eq!(calls.get(), 1);
        scope.dispose();
        s.set(2);
        assert_eq!(calls.get(), 1);
    }
}
