//! Randomised operation sequences checked against a reference model

mod common;

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use seedcache::{Evicted, LruCache};

/// Operations that can be performed on an LruCache
#[derive(Clone, Debug)]
enum Op {
    Put(u8, u32),
    Get(u8),
    Evict,
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..24u8, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        3 => (0..24u8).prop_map(Op::Get),
        1 => Just(Op::Evict),
        1 => (0..24u8).prop_map(Op::Remove),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op_strategy(), 0..200)
}

/// Recency list, oldest at the front
struct Model {
    limit: usize,
    entries: VecDeque<(u8, u32)>,
}

impl Model {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::new(),
        }
    }

    fn take(&mut self, key: u8) -> Option<(u8, u32)> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        self.entries.remove(pos)
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let entry = self.take(key)?;
        self.entries.push_back(entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<(u8, u32)> {
        if self.take(key).is_some() {
            self.entries.push_back((key, value));
            return None;
        }
        let evicted = if self.entries.len() == self.limit {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back((key, value));
        evicted
    }
}

fn assert_structure(cache: &LruCache<u8, u32>, model: &Model) -> Result<(), TestCaseError> {
    let forward: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
    let mut backward: Vec<(u8, u32)> = cache.iter().rev().map(|(k, v)| (*k, *v)).collect();
    backward.reverse();

    prop_assert!(cache.len() <= cache.limit());
    prop_assert_eq!(forward.len(), cache.len());
    prop_assert_eq!(&forward, &backward);

    let unique: HashSet<u8> = forward.iter().map(|(k, _)| *k).collect();
    prop_assert_eq!(unique.len(), forward.len());
    for (key, value) in &forward {
        prop_assert_eq!(cache.peek(key), Some(value));
    }

    let expected: Vec<(u8, u32)> = model.entries.iter().copied().collect();
    prop_assert_eq!(forward, expected);
    prop_assert_eq!(cache.peek_lru().map(|(k, _)| *k), model.entries.front().map(|e| e.0));
    prop_assert_eq!(cache.peek_mru().map(|(k, _)| *k), model.entries.back().map(|e| e.0));
    Ok(())
}

proptest! {
    /// Chain and index agree with the model after every operation
    #[test]
    fn prop_structure_matches_model(limit in 1..8usize, ops in ops_strategy()) {
        common::init_tracing();
        let mut cache = LruCache::new(limit);
        let mut model = Model::new(limit);

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    let evicted = cache.put(key, value).map(Evicted::into_parts);
                    prop_assert_eq!(evicted, model.put(key, value));
                }
                Op::Get(key) => {
                    prop_assert_eq!(cache.get(&key).copied(), model.get(key));
                }
                Op::Evict => {
                    let evicted = cache.evict_lru().map(Evicted::into_parts);
                    prop_assert_eq!(evicted, model.entries.pop_front());
                }
                Op::Remove(key) => {
                    prop_assert_eq!(cache.remove(&key), model.take(key).map(|e| e.1));
                }
            }
            assert_structure(&cache, &model)?;
        }
    }

    /// A put on a cached key never changes len
    #[test]
    fn prop_overwrite_keeps_len(ops in ops_strategy(), key in 0..24u8, value in any::<u32>()) {
        let mut cache = LruCache::new(6);
        for op in ops {
            if let Op::Put(k, v) = op {
                cache.put(k, v);
            }
        }
        cache.put(key, 0);
        let len = cache.len();

        prop_assert_eq!(cache.put(key, value), None);
        prop_assert_eq!(cache.len(), len);
        prop_assert_eq!(cache.peek_mru(), Some((&key, &value)));
    }
}
