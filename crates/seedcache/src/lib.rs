//! # seedcache
//!
//! Fixed-capacity key/value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1))
//! - **Recency chain**: Doubly-linked list of slot indices, oldest at the head (O(1))
//! - **Eviction**: `put` on a new key while full pushes out the head and hands it back
//!
//! The cache is single-owner: every mutation takes `&mut self`. Wrap it in a
//! lock to share it across threads.
//!
//! ```
//! use seedcache::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get(&"a");
//!
//! let evicted = cache.put("c", 3).map(|e| e.into_parts());
//! assert_eq!(evicted, Some(("b", 2)));
//! ```

#![warn(missing_docs)]

mod entry;
mod error;
mod iter;
mod lru;

pub use entry::Evicted;
pub use error::{Error, Result};
pub use iter::{Iter, Keys, Values};
pub use lru::LruCache;
