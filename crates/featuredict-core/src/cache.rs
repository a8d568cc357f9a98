// crates/featuredict-core/src/cache.rs

//! # Build-once Cache
//!
//! [`MemoCache`] maps a key to a lazily built, immutable value. The build for
//! a key runs at most once, also when several threads ask for it at the same
//! time; threads asking for other keys are not held up by it.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;
use tracing::trace;

type Slot<V> = Arc<OnceCell<Arc<V>>>;

pub struct MemoCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    pub fn new() -> Self {
        MemoCache {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the value for `key`, building it with `build` if absent.
    ///
    /// The lock on the key table is only held to look up or insert the slot
    /// for `key`; `build` itself runs outside of it, serialized per key by
    /// the slot. If `build` fails the error is returned and nothing is
    /// stored, so the next call for that key builds again.
    pub fn get_or_try_build<E, F>(&self, key: &K, build: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let slot = self.slot(key);
        if let Some(value) = slot.get() {
            trace!(?key, "cache hit");
            return Ok(Arc::clone(value));
        }
        slot.get_or_try_init(|| build().map(Arc::new)).map(Arc::clone)
    }

    /// The value for `key` if it was built already.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of keys with a built value.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &K) -> Slot<V> {
        // a panicking build never runs under this lock, so the table stays consistent
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MemoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.slots.lock().map(|s| s.len()).unwrap_or_default();
        f.debug_struct("MemoCache").field("keys", &keys).finish()
    }
}
