//! Arena slots and evicted pairs

/// Slot in the recency chain.
///
/// `older` points towards the head (least recently used), `newer` towards
/// the tail (most recently used). Both are arena indices and never own.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) older: Option<usize>,
    pub(crate) newer: Option<usize>,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V, older: Option<usize>) -> Self {
        Self {
            key,
            value,
            older,
            newer: None,
        }
    }
}

/// Key/value pair pushed out of the cache by [`LruCache::put`] or
/// [`LruCache::evict_lru`].
///
/// [`LruCache::put`]: crate::LruCache::put
/// [`LruCache::evict_lru`]: crate::LruCache::evict_lru
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evicted<K, V> {
    /// Key of the evicted entry
    pub key: K,
    /// Value the entry held when it was evicted
    pub value: V,
}

impl<K, V> Evicted<K, V> {
    /// Split into `(key, value)`
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<Entry<K, V>> for Evicted<K, V> {
    fn from(entry: Entry<K, V>) -> Self {
        Self {
            key: entry.key,
            value: entry.value,
        }
    }
}

impl<K, V> From<Evicted<K, V>> for (K, V) {
    fn from(evicted: Evicted<K, V>) -> Self {
        evicted.into_parts()
    }
}
