//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in a slot arena. A hash index maps keys to slots, and an
//! intrusive doubly-linked chain of slot indices orders them from `head`
//! (least recently used) to `tail` (most recently used).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;
use tracing::{debug, trace};

use crate::entry::{Entry, Evicted};
use crate::error::{Error, Result};
use crate::iter::{Iter, Keys, Values};

/// LRU cache with fixed capacity
pub struct LruCache<K, V, S = RandomState> {
    index: HashMap<K, usize, S>,
    slots: Vec<Option<Entry<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    limit: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache holding at most `limit` entries
    ///
    /// # Panics
    /// Panics if `limit` is zero. Use [`LruCache::try_new`] to get an error instead.
    pub fn new(limit: usize) -> Self {
        Self::with_hasher(limit, RandomState::new())
    }

    /// Create a new LRU cache, rejecting a zero `limit`
    ///
    /// # Returns
    /// * `Err(Error::InvalidLimit)` - if `limit` is zero
    pub fn try_new(limit: usize) -> Result<Self> {
        Self::try_with_hasher(limit, RandomState::new())
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    /// Create a new LRU cache using `hasher` for the key index
    ///
    /// # Panics
    /// Panics if `limit` is zero.
    pub fn with_hasher(limit: usize, hasher: S) -> Self {
        match Self::try_with_hasher(limit, hasher) {
            Ok(cache) => cache,
            Err(err) => panic!("{}", err),
        }
    }

    /// Create a new LRU cache using `hasher`, rejecting a zero `limit`
    pub fn try_with_hasher(limit: usize, hasher: S) -> Result<Self> {
        if limit == 0 {
            return Err(Error::InvalidLimit(limit));
        }

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(limit, hasher),
            slots: Vec::with_capacity(limit),
            head: None,
            tail: None,
            free_list: Vec::new(),
            limit,
        })
    }

    /// Get a value from the cache, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Get a mutable reference to a value, marking it most recently used
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.promote(idx);
        self.slots[idx].as_mut().map(|entry| &mut entry.value)
    }

    /// Get a value without touching recency order
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.slots[idx].as_ref().map(|entry| &entry.value)
    }

    /// Check whether `key` is cached without touching recency order
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Insert a key-value pair into the cache
    ///
    /// An existing key counts as a use: it is promoted to most recently used
    /// and its value overwritten, without eviction. A new key arriving while
    /// the cache is full first evicts the least recently used entry.
    ///
    /// # Returns
    /// * `Some(Evicted)` - the entry pushed out to make room
    /// * `None` - nothing was evicted
    pub fn put(&mut self, key: K, value: V) -> Option<Evicted<K, V>> {
        if let Some(&idx) = self.index.get(&key) {
            self.promote(idx);
            if let Some(entry) = &mut self.slots[idx] {
                entry.value = value;
            }
            return None;
        }

        let evicted = if self.index.len() >= self.limit {
            self.evict_lru()
        } else {
            None
        };

        let idx = self.alloc_slot(Entry::new(key.clone(), value, None));
        self.attach_tail(idx);
        self.index.insert(key, idx);
        trace!(slot = idx, len = self.index.len(), "inserted entry");

        evicted
    }

    /// Remove and return the least recently used entry
    ///
    /// Returns `None` on an empty cache, leaving it untouched.
    pub fn evict_lru(&mut self) -> Option<Evicted<K, V>> {
        let head_idx = self.head?;
        let entry = self.release(head_idx)?;
        debug!(limit = self.limit, len = self.index.len(), "evicted least recently used entry");
        Some(entry.into())
    }

    /// Remove a key from the cache
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.index.get(key)?;
        self.release(idx).map(|entry| entry.value)
    }

    /// Least recently used entry, the next eviction candidate
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.head
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Most recently used entry
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.tail
            .and_then(|idx| self.slots[idx].as_ref())
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        let dropped = self.index.len();
        self.index.clear();
        self.slots.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        debug!(dropped, "cleared cache");
    }

    fn promote(&mut self, idx: usize) {
        if self.tail == Some(idx) {
            return; // Already most recently used
        }

        self.detach(idx);
        self.attach_tail(idx);
        trace!(slot = idx, "promoted entry");
    }

    /// Link a detached slot after the current tail.
    fn attach_tail(&mut self, idx: usize) {
        let old_tail = self.tail;

        if let Some(entry) = &mut self.slots[idx] {
            entry.older = old_tail;
            entry.newer = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.slots[tail_idx] {
                    tail.newer = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
    }

    /// Unlink a slot from the chain, patching its neighbours and the ends.
    fn detach(&mut self, idx: usize) {
        let (older, newer) = if let Some(entry) = &mut self.slots[idx] {
            (entry.older.take(), entry.newer.take())
        } else {
            return;
        };

        match older {
            Some(older_idx) => {
                if let Some(older_entry) = &mut self.slots[older_idx] {
                    older_entry.newer = newer;
                }
            }
            None => {
                self.head = newer;
            }
        }

        match newer {
            Some(newer_idx) => {
                if let Some(newer_entry) = &mut self.slots[newer_idx] {
                    newer_entry.older = older;
                }
            }
            None => {
                self.tail = older;
            }
        }
    }

    /// Detach a slot, drop its index mapping and recycle it.
    fn release(&mut self, idx: usize) -> Option<Entry<K, V>> {
        self.detach(idx);
        let entry = self.slots[idx].take()?;
        self.index.remove(&entry.key);
        self.free_list.push(idx);
        Some(entry)
    }

    fn alloc_slot(&mut self, entry: Entry<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(entry);
            idx
        } else {
            self.slots.push(Some(entry));
            self.slots.len() - 1
        }
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries, fixed at construction
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Iterate from least to most recently used without promoting anything
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.slots, self.head, self.tail, self.index.len())
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Values from least to most recently used
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for LruCache<K, V, S>
where
    K: Hash + Eq + Clone,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
