//! Sentinel-ring doubly-linked lists over slab storage.
//!
//! The core idea: **separate storage from structure**. Nodes live in a
//! slab-like arena and carry integer keys instead of pointers; the list is
//! a circle of links threaded through that arena, anchored by a sentinel
//! node. This keeps the linked structure in safe, cache-friendly memory
//! while preserving what linked lists are for: O(1) insertion and removal
//! at any known position, with keys that stay stable across unrelated
//! mutations.
//!
//! # Two Layers
//!
//! - [`Ring`] is the storage-parameterized core. You bring the storage
//!   (any [`Storage`] implementation) and pass it to every call. Multiple
//!   rings can share one arena, and nodes can be unlinked from one ring
//!   and relinked into another without touching their values.
//! - [`RingList`] is the owned container: a `Ring` bundled with its own
//!   growable `slab::Slab` arena. No storage threading, infallible
//!   insertion, plus the conventional container trait surface
//!   (`FromIterator`, `Extend`, `IntoIterator`, cursors, `drain`).
//!
//! # Quick Start
//!
//! ```
//! use ring_list::RingList;
//!
//! let mut list: RingList<u64> = (1..=4).collect();
//!
//! let key = list.push_back(5);
//! list.push_front(0);
//!
//! // Keys survive unrelated mutations
//! assert_eq!(list.remove(key), Some(5));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
//! ```
//!
//! # Bounded Storage and Rollback
//!
//! With a fixed-capacity [`PoolStorage`], insertion is fallible and bulk
//! construction is transactional: if the pool runs dry mid-build, every
//! node the initializer allocated is freed again before the error is
//! returned.
//!
//! ```
//! use ring_list::{PoolStorage, Ring, RingNode};
//!
//! let mut pool: PoolStorage<RingNode<u64, u32>> = PoolStorage::with_capacity(4);
//!
//! // Needs 11 slots (10 values + sentinel), only 4 exist
//! assert!(Ring::try_filled(&mut pool, 10, 7u64).is_err());
//! assert_eq!(pool.len(), 0); // nothing leaked
//! ```

#![warn(missing_docs)]

pub mod key;
pub mod list;
pub mod ring;
pub mod storage;

pub use key::Key;
pub use list::{Cursor, CursorMut, RingList};
pub use ring::{Exhausted, Node as RingNode, Ring};
pub use storage::{BoundedStorage, Full, PoolStorage, Storage, UnboundedStorage};
