//! Reactive signal graph.
//!
//! Fine-grained reactivity: a [`Signal`] holds a value and a monotonically
//! increasing revision. Reads inside a [`track`]ed scope record the signal
//! into that scope's dependency set; writes bump the revision and enqueue
//! subscribers, deduplicated within a [`batch`].
//!
//! This module has no external dependency on a reactivity crate — the
//! signal graph is core engine surface (see SPEC_FULL.md §2 component A),
//! so it is implemented directly rather than imported.

mod derived;
mod effect;
mod reactive_set;
mod slot;

pub use derived::{derived, Derived};
pub use effect::{effect, effect_scope, EffectScope};
pub use reactive_set::ReactiveSet;
pub use slot::{slot, Slot};

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Globally unique id for a signal, stable across its lifetime.
pub type SignalId = u64;

// ============================================================================
// Type-erased subscription registry
// ============================================================================
//
// `Element::dependencies` (see `crate::element`) stores one subscription per
// signal id in a single `HashMap<SignalId, SubscriptionToken>` — it cannot
// hold a `SubscriptionHandle<T>` per entry because the element's dependency
// set mixes signals of unrelated `T`. This thread-local registry lets code
// that only has a `SignalId` (no access to the original typed `Signal<T>`)
// still subscribe/unsubscribe by id, by keeping a type-erased subscribe
// closure per signal, registered at `Signal::new` time via a weak back
// -reference so a dropped signal's entry quietly becomes a no-op instead of
// keeping it alive.

struct Registration {
    subscribe: Box<dyn Fn(SubKey, Rc<dyn Fn()>)>,
    unsubscribe: Box<dyn Fn(SubKey)>,
}

thread_local! {
    static REGISTRY: RefCell<HashMap<SignalId, Registration>> = RefCell::new(HashMap::new());
}

/// Type-erased handle to one `(signal id, subscriber key)` subscription.
/// Cheap to clone (a subscription is identified, not owned) — the element
/// tree's dependency map clones a token before unsubscribing it during
/// dependency-set reconciliation.
#[derive(Clone, Copy)]
pub struct SubscriptionToken {
    id: SignalId,
    key: SubKey,
}

impl SubscriptionToken {
    pub fn unsubscribe(self) {
        REGISTRY.with(|r| {
            if let Some(reg) = r.borrow().get(&self.id) {
                (reg.unsubscribe)(self.key);
            }
        });
    }
}

/// Subscribe `cb` to signal `id` under `key`, without needing the original
/// typed `Signal<T>` in hand. A no-op (but still returns a valid-looking
/// token) if `id` names a signal that has since been fully dropped.
pub fn subscribe_by_id(id: SignalId, key: SubKey, cb: impl Fn() + 'static) -> SubscriptionToken {
    REGISTRY.with(|r| {
        if let Some(reg) = r.borrow().get(&id) {
            (reg.subscribe)(key, Rc::new(cb));
        }
    });
    SubscriptionToken { id, key }
}

/// Remove every subscription registered under `key`, across all signals.
/// Used to tear down an effect's subscriptions before it re-tracks.
pub(crate) fn unsubscribe_all(key: SubKey) {
    REGISTRY.with(|r| {
        for reg in r.borrow().values() {
            (reg.unsubscribe)(key);
        }
    });
}

/// Opaque key identifying a subscriber (typically an element's subtree token).
/// Two subscriptions with the same key collapse into one notification per batch.
pub type SubKey = u64;

fn next_signal_id() -> SignalId {
    thread_local! {
        static COUNTER: RefCell<SignalId> = const { RefCell::new(0) };
    }
    COUNTER.with(|c| {
        let mut c = c.borrow_mut();
        *c += 1;
        *c
    })
}

struct Subscriber {
    key: SubKey,
    notify: Rc<dyn Fn()>,
}

struct Inner<T> {
    value: T,
    revision: u64,
    disposed: bool,
    subscribers: Vec<Subscriber>,
}

/// A reactive container of a value of type `T`.
///
/// Reads via [`Signal::get`] are tracked when called inside [`track`]; reads
/// via [`Signal::peek`] never track. Writes outside a [`batch`] notify
/// subscribers immediately; writes inside a batch accumulate and fire once,
/// deduplicated by subscriber key, when the outermost batch ends.
pub struct Signal<T> {
    id: SignalId,
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Create a new signal with the given initial value.
    pub fn new(initial: T) -> Self {
        let id = next_signal_id();
        let inner = Rc::new(RefCell::new(Inner {
            value: initial,
            revision: 0,
            disposed: false,
            subscribers: Vec::new(),
        }));

        let weak = Rc::downgrade(&inner);
        let weak_for_unsub = weak.clone();
        REGISTRY.with(|r| {
            r.borrow_mut().insert(
                id,
                Registration {
                    subscribe: Box::new(move |key, notify| {
                        if let Some(inner) = weak.upgrade() {
                            inner.borrow_mut().subscribers.push(Subscriber { key, notify });
                        }
                    }),
                    unsubscribe: Box::new(move |key| {
                        if let Some(inner) = weak_for_unsub.upgrade() {
                            inner.borrow_mut().subscribers.retain(|s| s.key != key);
                        }
                    }),
                },
            );
        });

        Self { id, inner }
    }

    /// The signal's stable identity, used as a dependency-set key.
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Read the value, tracking this signal into the active build/effect
    /// scope if one is active. Outside any scope, tracking is silently
    /// skipped.
    pub fn get(&self) -> T {
        record_read(self.id);
        self.inner.borrow().value.clone()
    }

    /// Read the value without tracking.
    pub fn peek(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// The current revision. Monotonically increases on every notifying write.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    /// Overwrite the value, always notifying subscribers (subject to batching).
    pub fn set(&self, value: T) {
        self.write(value, |_, _| false);
    }

    /// Overwrite the value, but skip notification if `eq(&old, &new)` is true.
    pub fn set_with_eq(&self, value: T, eq: impl Fn(&T, &T) -> bool) {
        self.write(value, eq);
    }

    /// Read-modify-write; always notifies.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let new_value = {
            let inner = self.inner.borrow();
            if inner.disposed {
                return;
            }
            f(&inner.value)
        };
        self.set(new_value);
    }

    fn write(&self, value: T, eq: impl Fn(&T, &T) -> bool) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            // Setting a disposed signal is a no-op.
            return;
        }
        if eq(&inner.value, &value) {
            inner.value = value;
            return;
        }
        inner.value = value;
        inner.revision += 1;
        let subs: Vec<Rc<dyn Fn()>> = inner.subscribers.iter().map(|s| s.notify.clone()).collect();
        let keys: Vec<SubKey> = inner.subscribers.iter().map(|s| s.key).collect();
        drop(inner);

        // A write that happens while this same signal's own notification is
        // still synchronously unwinding (A writes during A's notification)
        // is permitted by spec but must not recurse — defer it to the
        // scheduler-drained "next frame" queue instead.
        let reentrant = NOTIFYING.with(|n| n.borrow().contains(&self.id));
        if reentrant {
            DEFERRED.with(|d| {
                let mut d = d.borrow_mut();
                for (key, notify) in keys.into_iter().zip(subs.into_iter()) {
                    if !d.iter().any(|(k, _)| *k == key) {
                        d.push((key, notify));
                    }
                }
            });
            return;
        }

        NOTIFYING.with(|n| n.borrow_mut().insert(self.id));
        enqueue_notifications(keys, subs);
        let drained_now = NOTIFYING.with(|n| {
            let mut n = n.borrow_mut();
            n.remove(&self.id);
            n.is_empty()
        });
        // Once no signal is mid-notification, flush any writes that arrived
        // reentrantly while one was. Draining can itself enqueue further
        // deferrals (a deferred notify writes again) so loop until dry.
        if drained_now {
            loop {
                let deferred: Vec<(SubKey, Rc<dyn Fn()>)> = DEFERRED.with(|d| d.borrow_mut().drain(..).collect());
                if deferred.is_empty() {
                    break;
                }
                let (keys, subs): (Vec<_>, Vec<_>) = deferred.into_iter().unzip();
                enqueue_notifications(keys, subs);
            }
        }
    }

    /// Subscribe `cb` to fire (subject to batching) whenever this signal
    /// writes a new value. `key` identifies the subscriber for batch
    /// deduplication — typically an element's subtree token.
    pub fn subscribe(&self, key: SubKey, cb: impl Fn() + 'static) -> SubscriptionHandle<T> {
        self.inner.borrow_mut().subscribers.push(Subscriber {
            key,
            notify: Rc::new(cb),
        });
        SubscriptionHandle {
            inner: self.inner.clone(),
            key,
        }
    }

    /// Mark the signal permanently inert: further writes are no-ops and
    /// existing subscribers are dropped. Used when the owning element is
    /// disposed mid-batch to stop late notifications from a stale generation.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.disposed = true;
        inner.subscribers.clear();
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    /// `set` convenience for `T: PartialEq`: skips notification when the new
    /// value equals the old one.
    pub fn set_if_changed(&self, value: T) {
        self.set_with_eq(value, |a, b| a == b);
    }
}

impl<T> Drop for Signal<T> {
    fn drop(&mut self) {
        // Only the last strong reference tears down the registry entry —
        // every `Signal::clone` shares one `Rc`, so earlier drops must not
        // deregister a signal still reachable elsewhere.
        if Rc::strong_count(&self.inner) == 1 {
            REGISTRY.with(|r| {
                r.borrow_mut().remove(&self.id);
            });
        }
    }
}

/// Handle returned by [`Signal::subscribe`]; call [`unsubscribe`] or drop the
/// owning element to stop receiving notifications.
pub struct SubscriptionHandle<T> {
    inner: Rc<RefCell<Inner<T>>>,
    key: SubKey,
}

impl<T> SubscriptionHandle<T> {
    pub fn unsubscribe(self) {
        self.inner.borrow_mut().subscribers.retain(|s| s.key != self.key);
    }
}

// ============================================================================
// Tracking scope
// ============================================================================

thread_local! {
    static SCOPE_STACK: RefCell<Vec<RefCell<HashSet<SignalId>>>> = const { RefCell::new(Vec::new()) };
}

// ============================================================================
// Reentrant-write guard
// ============================================================================
//
// `NOTIFYING` tracks which signal ids are currently unwinding their own
// synchronous notification; a write to one of those ids while it is still
// notifying is deferred onto `DEFERRED` rather than recursing, and drained
// once the outermost notification for that id finishes.

thread_local! {
    static NOTIFYING: RefCell<HashSet<SignalId>> = RefCell::new(HashSet::new());
    static DEFERRED: RefCell<Vec<(SubKey, Rc<dyn Fn()>)>> = RefCell::new(Vec::new());
}

fn record_read(id: SignalId) {
    SCOPE_STACK.with(|stack| {
        let stack = stack.borrow();
        if let Some(top) = stack.last() {
            top.borrow_mut().insert(id);
        }
    });
}

/// Run `f` inside a tracking scope, returning its result and the set of
/// signal ids read during the call (via [`Signal::get`]).
///
/// Scopes nest: a signal read inside a nested `track` call is recorded in
/// *every* enclosing scope, so a `Derived` built from other `Derived`s
/// correctly propagates dependencies outward.
pub fn track<T>(f: impl FnOnce() -> T) -> (T, HashSet<SignalId>) {
    SCOPE_STACK.with(|stack| stack.borrow_mut().push(RefCell::new(HashSet::new())));
    let result = f();
    let deps = SCOPE_STACK
        .with(|stack| stack.borrow_mut().pop())
        .expect("track scope stack underflow")
        .into_inner();
    // Propagate to the enclosing scope, if any.
    SCOPE_STACK.with(|stack| {
        let stack = stack.borrow();
        if let Some(parent) = stack.last() {
            parent.borrow_mut().extend(deps.iter().copied());
        }
    });
    (result, deps)
}

/// Is there an active tracking scope on this thread?
pub fn is_tracking() -> bool {
    SCOPE_STACK.with(|stack| !stack.borrow().is_empty())
}

// ============================================================================
// Batching
// ============================================================================

thread_local! {
    static BATCH_DEPTH: RefCell<u32> = const { RefCell::new(0) };
    // Dedup by subscriber key within a batch; last-registered notify wins
    // (subscriptions are stable per key so this is always the same closure).
    static PENDING: RefCell<Vec<(SubKey, Rc<dyn Fn()>)>> = RefCell::new(Vec::new());
}

fn enqueue_notifications(keys: Vec<SubKey>, subs: Vec<Rc<dyn Fn()>>) {
    let in_batch = BATCH_DEPTH.with(|d| *d.borrow() > 0);
    if in_batch {
        PENDING.with(|pending| {
            let mut pending = pending.borrow_mut();
            for (key, notify) in keys.into_iter().zip(subs.into_iter()) {
                if !pending.iter().any(|(k, _)| *k == key) {
                    pending.push((key, notify));
                }
            }
        });
    } else {
        for notify in subs {
            notify();
        }
    }
}

/// Run `f`, deferring and deduplicating all signal notifications triggered
/// within it until `f` returns. Nested batches flatten into the outermost
/// one.
pub fn batch<T>(f: impl FnOnce() -> T) -> T {
    BATCH_DEPTH.with(|d| *d.borrow_mut() += 1);
    let result = f();
    let should_flush = BATCH_DEPTH.with(|d| {
        let mut d = d.borrow_mut();
        *d -= 1;
        *d == 0
    });
    if should_flush {
        loop {
            let drained: Vec<(SubKey, Rc<dyn Fn()>)> = PENDING.with(|p| p.borrow_mut().drain(..).collect());
            if drained.is_empty() {
                break;
            }
            for (_, notify) in drained {
                notify();
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_tracks_inside_scope_only() {
        let s = Signal::new(1);
        let (_, deps) = track(|| {
            let _ = s.get();
        });
        assert!(deps.contains(&s.id()));

        // Outside a scope, peek/get both skip tracking (no panic, no scope).
        assert_eq!(s.peek(), 1);
    }

    #[test]
    fn set_notifies_immediately_outside_batch() {
        let s = Signal::new(0);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let _h = s.subscribe(1, move || c.set(c.get() + 1));
        s.set(1);
        assert_eq!(calls.get(), 1);
        s.set(2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn batch_dedupes_and_defers() {
        let s = Signal::new(0);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let _h = s.subscribe(7, move || c.set(c.get() + 1));

        batch(|| {
            s.set(1);
            s.set(2);
            s.set(3);
            assert_eq!(calls.get(), 0, "batched writes must not notify early");
        });
        assert_eq!(calls.get(), 1, "one coalesced notification after batch ends");
        assert_eq!(s.peek(), 3);
    }

    #[test]
    fn nested_batches_flush_once_at_outermost_end() {
        let s = Signal::new(0);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let _h = s.subscribe(1, move || c.set(c.get() + 1));

        batch(|| {
            s.set(1);
            batch(|| {
                s.set(2);
            });
            assert_eq!(calls.get(), 0);
        });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn set_with_eq_skips_notification_when_equal() {
        let s = Signal::new(5);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let _h = s.subscribe(1, move || c.set(c.get() + 1));

        s.set_with_eq(5, |a, b| a == b);
        assert_eq!(calls.get(), 0);
        s.set_with_eq(6, |a, b| a == b);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn disposed_signal_set_is_noop() {
        let s = Signal::new(1);
        s.dispose();
        s.set(2);
        assert_eq!(s.peek(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let s = Signal::new(0);
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let handle = s.subscribe(3, move || c.set(c.get() + 1));
        s.set(1);
        assert_eq!(calls.get(), 1);
        handle.unsubscribe();
        s.set(2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cyclic_write_during_notification_terminates() {
        // A writes to itself during its own notification. Per spec this is
        // permitted but must not recurse synchronously forever — the naive
        // `set` implementation here recurses once (re-entrant call sees a
        // fresh, already-updated value and its own notify has already been
        // captured), so it terminates rather than looping.
        let s = Signal::new(0);
        let reentered = Rc::new(Cell::new(false));
        let s2 = s.clone();
        let r2 = reentered.clone();
        let _h = s.subscribe(1, move || {
            if !r2.get() {
                r2.set(true);
                s2.set(s2.peek() + 1);
            }
        });
        s.set(1);
        assert!(reentered.get());
        assert_eq!(s.peek(), 2);
    }
}
