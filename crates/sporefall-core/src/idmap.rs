//! Identity-keyed entity storage with never-reused ids.
//!
//! `add` assigns each element the next id from a monotonically increasing
//! counter; deleting an element never frees its id for reuse. This keeps
//! identity stable across structural mutation of the collection: a minion
//! holding a `ResourceId` across several mining steps can always distinguish
//! "this resource still exists" from "it was depleted (possibly by someone
//! else) and replaced" -- a recycled id could silently alias a new entity.
//!
//! Keys are ordered, so iteration in key order is insertion order.

use crate::id::IdKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::marker::PhantomData;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdMap<K: IdKey, V> {
    next_index: u64,
    entries: BTreeMap<u64, V>,
    #[serde(skip)]
    _key: PhantomData<K>,
}

impl<K: IdKey, V> IdMap<K, V> {
    pub fn new() -> Self {
        Self {
            next_index: 0,
            entries: BTreeMap::new(),
            _key: PhantomData,
        }
    }

    /// Allocate the next id and insert the element built from it. The
    /// element learns its own id through the constructor closure.
    pub fn insert_with(&mut self, build: impl FnOnce(K) -> V) -> K {
        let key = K::from_index(self.next_index);
        self.next_index += 1;
        self.entries.insert(key.index(), build(key));
        key
    }

    /// Lookup for expected-missing ids (e.g. "does the resource I was
    /// mining still exist").
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&key.index())
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.entries.get_mut(&key.index())
    }

    /// Lookup for ids the caller guarantees are present. A miss is a
    /// programming error and panics with the offending id.
    pub fn expect_get(&self, key: K) -> &V {
        match self.entries.get(&key.index()) {
            Some(value) => value,
            None => panic!("missing entity for id {key:?}"),
        }
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.entries.remove(&key.index())
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key.index())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.keys().map(|&index| K::from_index(index))
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.entries
            .iter()
            .map(|(&index, value)| (K::from_index(index), value))
    }

    /// Elements in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.entries.values_mut()
    }

    pub fn to_vec(&self) -> Vec<&V> {
        self.entries.values().collect()
    }
}

impl<K: IdKey, V> Default for IdMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
