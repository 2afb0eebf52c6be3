//! Borrowing iterators over the recency chain

use std::iter::FusedIterator;

use crate::entry::Entry;

/// Iterator over `(&K, &V)` from least to most recently used.
///
/// Walking it never promotes entries. Use `.rev()` to go from most to least
/// recently used.
pub struct Iter<'a, K, V> {
    slots: &'a [Option<Entry<K, V>>],
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(
        slots: &'a [Option<Entry<K, V>>],
        head: Option<usize>,
        tail: Option<usize>,
        len: usize,
    ) -> Self {
        Self {
            slots,
            front: head,
            back: tail,
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.slots[self.front?].as_ref()?;
        self.front = entry.newer;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let entry = self.slots[self.back?].as_ref()?;
        self.back = entry.older;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Keys from least to most recently used
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Values from least to most recently used
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(crate) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::LruCache;

    #[test]
    fn test_iter_oldest_first() {
        let mut cache = LruCache::new(3);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");
        cache.get(&1);

        let pairs: Vec<_> = cache.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(pairs, vec![(2, "b"), (3, "c"), (1, "a")]);
        assert_eq!(cache.iter().len(), 3);
    }

    #[test]
    fn test_iter_rev_newest_first() {
        let mut cache = LruCache::new(3);
        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        let keys: Vec<_> = cache.keys().rev().copied().collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }

    #[test]
    fn test_iter_both_ends_meet() {
        let mut cache = LruCache::new(4);
        cache.extend([(1, "a"), (2, "b"), (3, "c")]);

        let mut iter = cache.values();
        assert_eq!(iter.next(), Some(&"a"));
        assert_eq!(iter.next_back(), Some(&"c"));
        assert_eq!(iter.next(), Some(&"b"));
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_iter_empty() {
        let cache: LruCache<i32, i32> = LruCache::new(2);
        assert_eq!(cache.iter().next(), None);
        assert_eq!(cache.iter().next_back(), None);
    }
}
