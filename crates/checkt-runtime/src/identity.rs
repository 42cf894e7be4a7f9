//! Reference identity.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// True iff `a` and `b` are the same allocation.
#[must_use]
pub fn same<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b)
}

fn address<T: ?Sized>(value: &Arc<T>) -> usize {
    Arc::as_ptr(value).cast::<()>() as usize
}

/// A map whose keys are compared by identity rather than by `Eq`.
///
/// Each entry keeps its key alive, so an address is never reused while it
/// is a key.
pub struct IdentityMap<K: ?Sized, V> {
    entries: FxHashMap<usize, (Arc<K>, V)>,
}

impl<K: ?Sized, V> IdentityMap<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Insert under the exact key reference, returning the value that
    /// reference previously mapped to.
    pub fn put(&mut self, key: &Arc<K>, value: V) -> Option<V> {
        self.entries
            .insert(address(key), (Arc::clone(key), value))
            .map(|(_, previous)| previous)
    }

    #[must_use]
    pub fn get(&self, key: &Arc<K>) -> Option<&V> {
        self.entries.get(&address(key)).map(|(_, value)| value)
    }

    pub fn remove(&mut self, key: &Arc<K>) -> Option<V> {
        self.entries.remove(&address(key)).map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Arc<K>) -> bool {
        self.entries.contains_key(&address(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: ?Sized, V> Default for IdentityMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ?Sized, V: fmt::Debug> fmt::Debug for IdentityMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(at, (_, value))| (at, value)))
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/identity_tests.rs"]
mod identity_tests;
