//! Storage traits for node arenas with stable keys.
//!
//! A storage hands out one slot per inserted value and keeps the slot's key
//! stable until the value is explicitly removed. Node-based structures (the
//! [`Ring`](crate::Ring) in this crate) hold keys instead of pointers, so the
//! structure never owns memory directly: the storage does.
//!
//! Storage is split into bounded and unbounded variants:
//!
//! ```text
//! Storage<T>           - base trait: get, remove, live-slot count
//!     ├── BoundedStorage<T>   - fixed capacity, try_insert -> Result
//!     └── UnboundedStorage<T> - growable, insert -> Key (infallible)
//! ```
//!
//! [`PoolStorage`] is the bounded implementation in this crate;
//! `slab::Slab` is the unbounded one (and backs
//! [`RingList`](crate::RingList)).

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// - **Stable keys**: a key stays valid until the value is removed
/// - **O(1)** insert, remove, get
/// - **Slot reuse**: removed slots can be handed out again
/// - `Key::NONE` is never returned as a live key
pub trait Storage<T> {
    /// Key type for this storage.
    type Key: Key;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns the number of live (occupied) slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must be valid and occupied.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;
}

/// Fixed-capacity storage; insertion is fallible.
pub trait BoundedStorage<T>: Storage<T> {
    /// Returns the total number of slots.
    fn capacity(&self) -> usize;

    /// Inserts a value, returning its stable key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if every slot is occupied.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;
}

/// Growable storage; insertion never fails.
pub trait UnboundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its stable key.
    fn insert(&mut self, value: T) -> Self::Key;
}

/// Error returned when fixed-capacity storage is out of slots.
///
/// Carries the value that could not be inserted so the caller keeps
/// ownership of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> core::fmt::Display for Full<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: core::fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// PoolStorage - fixed capacity, Vec-backed slots, intrusive free list
// =============================================================================

#[derive(Debug)]
enum Entry<T, K> {
    Occupied(T),
    Vacant(K),
}

/// Fixed-capacity slot pool.
///
/// Slots live in a single `Vec` allocated up front. Vacated slots form an
/// intrusive free list threaded through the vacant entries, so insert and
/// remove are O(1) and removed slots are reused LIFO.
///
/// # Example
///
/// ```
/// use ring_list::{BoundedStorage, PoolStorage, Storage};
///
/// let mut pool: PoolStorage<u64> = PoolStorage::with_capacity(4);
///
/// let key = pool.try_insert(42).unwrap();
/// assert_eq!(pool.get(key), Some(&42));
/// assert_eq!(pool.remove(key), Some(42));
/// assert_eq!(pool.len(), 0);
/// ```
#[derive(Debug)]
pub struct PoolStorage<T, K: Key = u32> {
    slots: Vec<Entry<T, K>>,
    /// Head of the vacant-slot list, `K::NONE` when no slot was vacated.
    next_free: K,
    len: usize,
    capacity: usize,
}

impl<T, K: Key> PoolStorage<T, K> {
    /// Creates a pool with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or does not fit the key type (the key
    /// type's maximum is reserved as the `NONE` sentinel).
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        assert!(
            capacity <= K::NONE.as_usize(),
            "capacity exceeds key type maximum"
        );

        Self {
            slots: Vec::with_capacity(capacity),
            next_free: K::NONE,
            len: 0,
            capacity,
        }
    }

    /// Returns the total number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len == self.capacity
    }
}

impl<T, K: Key> Storage<T> for PoolStorage<T, K> {
    type Key = K;

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let i = key.as_usize();
        match self.slots.get(i) {
            Some(Entry::Occupied(_)) => {}
            _ => return None,
        }

        let entry = core::mem::replace(&mut self.slots[i], Entry::Vacant(self.next_free));
        self.next_free = key;
        self.len -= 1;

        match entry {
            Entry::Occupied(value) => Some(value),
            // Occupancy checked above
            Entry::Vacant(_) => unreachable!(),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        // Safety: caller guarantees the slot is in bounds and occupied
        match unsafe { self.slots.get_unchecked(key.as_usize()) } {
            Entry::Occupied(value) => value,
            Entry::Vacant(_) => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        // Safety: caller guarantees the slot is in bounds and occupied
        match unsafe { self.slots.get_unchecked_mut(key.as_usize()) } {
            Entry::Occupied(value) => value,
            Entry::Vacant(_) => unsafe { core::hint::unreachable_unchecked() },
        }
    }
}

impl<T, K: Key> BoundedStorage<T> for PoolStorage<T, K> {
    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        let key = if self.next_free.is_some() {
            let key = self.next_free;
            let entry = &mut self.slots[key.as_usize()];
            self.next_free = match entry {
                Entry::Vacant(next) => *next,
                // The free list only threads vacant entries
                Entry::Occupied(_) => unreachable!(),
            };
            *entry = Entry::Occupied(value);
            key
        } else if self.slots.len() < self.capacity {
            let key = K::from_usize(self.slots.len());
            self.slots.push(Entry::Occupied(value));
            key
        } else {
            return Err(Full(value));
        };

        self.len += 1;
        Ok(key)
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        self.get(key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        self.get_mut(key)
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        self.try_remove(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &T {
        unsafe { self.get(key).unwrap_unchecked() }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut T {
        unsafe { self.get_mut(key).unwrap_unchecked() }
    }
}

impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> usize {
        self.insert(value)
    }
}
