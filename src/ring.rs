//! Sentinel-anchored circular doubly-linked list over external storage.
//!
//! A [`Ring`] owns exactly one sentinel node for its whole lifetime. The
//! sentinel marks the end position: `sentinel.next` is the first element,
//! `sentinel.prev` the last, and an empty ring is the sentinel linked to
//! itself. Value nodes are allocated from user-provided storage, linked
//! into the circle, and freed when removed. The ring itself only stores
//! the sentinel's key and a running element count.
//!
//! # Ring Invariant
//!
//! For every node `n` reachable from the sentinel, `n.prev.next == n` and
//! `n.next.prev == n`. `len` always equals the number of value nodes on the
//! circle, and `len == 0` iff the sentinel points at itself.
//!
//! # Storage Invariant
//!
//! A ring must always be used with the same storage instance it was created
//! in. Passing a different storage is undefined behavior. This is the
//! caller's responsibility to enforce (same discipline as the `slab` crate).
//!
//! # Bounded vs Unbounded Storage
//!
//! Construction and insertion have different APIs depending on storage type:
//!
//! ```
//! use ring_list::{PoolStorage, Ring, RingNode};
//!
//! // Bounded storage - fallible construction and insertion
//! let mut pool: PoolStorage<RingNode<u64, u32>> = PoolStorage::with_capacity(16);
//! let mut ring = Ring::try_new(&mut pool).unwrap();
//!
//! let key = ring.try_push_back(&mut pool, 42).unwrap();
//! assert_eq!(ring.get(&pool, key), Some(&42));
//!
//! ring.release(&mut pool);
//! assert_eq!(pool.len(), 0);
//! ```
//!
//! ```
//! use ring_list::{Ring, RingNode};
//!
//! // Unbounded storage (slab::Slab) - infallible insertion
//! let mut slab: slab::Slab<RingNode<u64, usize>> = slab::Slab::new();
//! let mut ring = Ring::new(&mut slab);
//!
//! let key = ring.push_back(&mut slab, 42); // No Result!
//! # assert_eq!(ring.get(&slab, key), Some(&42));
//! ```
//!
//! # Failure Rollback
//!
//! The `try_filled` and `try_from_iter_in` initializers are transactional:
//! if any node fails to allocate mid-way, every node already linked for
//! that call is unlinked and freed, the sentinel is freed, and the error is
//! returned. The storage ends with exactly as many live slots as before
//! the call.

use std::marker::PhantomData;

use crate::{BoundedStorage, Full, Key, Storage, UnboundedStorage};

// =============================================================================
// Node
// =============================================================================

/// A node on the ring.
///
/// One record shape serves both node kinds: a value node has a payload in
/// `slot`, the sentinel's slot is empty. Nodes are created and destroyed
/// only by [`Ring`] operations; user code names this type solely to
/// parameterize a storage (e.g. `PoolStorage<RingNode<T, u32>>`).
#[derive(Debug)]
pub struct Node<T, K: Key> {
    pub(crate) prev: K,
    pub(crate) next: K,
    slot: Option<T>,
}

impl<T, K: Key> Node<T, K> {
    /// Creates an unlinked value node.
    #[inline]
    fn new(value: T) -> Self {
        Self {
            prev: K::NONE,
            next: K::NONE,
            slot: Some(value),
        }
    }

    /// Creates an unlinked sentinel node.
    #[inline]
    fn sentinel() -> Self {
        Self {
            prev: K::NONE,
            next: K::NONE,
            slot: None,
        }
    }

    /// Returns the payload of a value node.
    ///
    /// # Panics
    ///
    /// Panics if called on the sentinel.
    #[inline]
    pub(crate) fn value(&self) -> &T {
        self.slot.as_ref().expect("sentinel node carries no value")
    }

    /// Mutable variant of [`Node::value`].
    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut T {
        self.slot.as_mut().expect("sentinel node carries no value")
    }

    /// Consumes the node, returning the payload of a value node.
    #[inline]
    pub(crate) fn into_value(self) -> T {
        self.slot.expect("sentinel node carries no value")
    }

    /// Returns the payload if this is a value node.
    #[inline]
    pub(crate) fn try_value(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Mutable variant of [`Node::try_value`].
    #[inline]
    pub(crate) fn try_value_mut(&mut self) -> Option<&mut T> {
        self.slot.as_mut()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Error returned when storage runs out of slots during ring initialization.
///
/// By the time this is returned, every node the initializer allocated,
/// including the sentinel, has been freed again; partially built values
/// were dropped during the rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted;

impl core::fmt::Display for Exhausted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "storage exhausted during ring initialization")
    }
}

impl std::error::Error for Exhausted {}

impl<T> From<Full<T>> for Exhausted {
    fn from(_: Full<T>) -> Self {
        Exhausted
    }
}

// =============================================================================
// Ring
// =============================================================================

/// A circular doubly-linked list over external storage.
///
/// See the [module docs](self) for the ring and storage invariants.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Storage type holding `Node<T, K>` records
/// - `K`: Key type (default `u32`)
///
/// # Example
///
/// ```
/// use ring_list::{PoolStorage, Ring, RingNode};
///
/// let mut pool: PoolStorage<RingNode<u64, u32>> = PoolStorage::with_capacity(16);
/// let mut ring = Ring::try_new(&mut pool).unwrap();
///
/// let a = ring.try_push_back(&mut pool, 1).unwrap();
/// let b = ring.try_push_back(&mut pool, 2).unwrap();
/// ring.try_push_back(&mut pool, 3).unwrap();
///
/// // O(1) removal from the middle, given a key
/// assert_eq!(ring.remove(&mut pool, b), Some(2));
///
/// let values: Vec<_> = ring.iter(&pool).copied().collect();
/// assert_eq!(values, vec![1, 3]);
/// # ring.release(&mut pool);
/// ```
#[derive(Debug)]
pub struct Ring<T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    sentinel: K,
    len: usize,
    _marker: PhantomData<(T, S)>,
}

// =============================================================================
// Base impl - works with any Storage (read/link/remove operations)
// =============================================================================

impl<T, S, K: Key> Ring<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Returns the number of elements on the ring.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the ring has no value nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the sentinel's key, i.e. the end position.
    #[inline]
    pub const fn sentinel(&self) -> K {
        self.sentinel
    }

    /// Returns the first element's key, or `None` if the ring is empty.
    #[inline]
    pub fn first_key(&self, storage: &S) -> Option<K> {
        let first = self.sentinel_node(storage).next;
        if first == self.sentinel { None } else { Some(first) }
    }

    /// Returns the last element's key, or `None` if the ring is empty.
    #[inline]
    pub fn last_key(&self, storage: &S) -> Option<K> {
        let last = self.sentinel_node(storage).prev;
        if last == self.sentinel { None } else { Some(last) }
    }

    /// Returns the key of the node after `key`, following `next`.
    ///
    /// `key` may be any ring position including the sentinel. Returns
    /// `None` when the step would land on the sentinel, or if `key` is
    /// invalid.
    #[inline]
    pub fn next_key(&self, storage: &S, key: K) -> Option<K> {
        let next = storage.get(key)?.next;
        if next == self.sentinel { None } else { Some(next) }
    }

    /// Returns the key of the node before `key`, following `prev`.
    ///
    /// Mirror of [`Ring::next_key`]: backward motion always goes through
    /// `prev`.
    #[inline]
    pub fn prev_key(&self, storage: &S, key: K) -> Option<K> {
        let prev = storage.get(key)?.prev;
        if prev == self.sentinel { None } else { Some(prev) }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element at the given key.
    ///
    /// Returns `None` for an invalid key and for the sentinel.
    #[inline]
    pub fn get<'a>(&self, storage: &'a S, key: K) -> Option<&'a T>
    where
        K: 'a,
    {
        storage.get(key).and_then(Node::try_value)
    }

    /// Returns a mutable reference to the element at the given key.
    #[inline]
    pub fn get_mut<'a>(&self, storage: &'a mut S, key: K) -> Option<&'a mut T>
    where
        K: 'a,
    {
        storage.get_mut(key).and_then(Node::try_value_mut)
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front<'a>(&self, storage: &'a S) -> Option<&'a T>
    where
        K: 'a,
    {
        let first = self.first_key(storage)?;
        // Safety: first_key only returns live value-node keys
        Some(unsafe { storage.get_unchecked(first) }.value())
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut<'a>(&self, storage: &'a mut S) -> Option<&'a mut T>
    where
        K: 'a,
    {
        let first = self.first_key(storage)?;
        // Safety: first_key only returns live value-node keys
        Some(unsafe { storage.get_unchecked_mut(first) }.value_mut())
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back<'a>(&self, storage: &'a S) -> Option<&'a T>
    where
        K: 'a,
    {
        let last = self.last_key(storage)?;
        // Safety: last_key only returns live value-node keys
        Some(unsafe { storage.get_unchecked(last) }.value())
    }

    /// Returns a mutable reference to the last element.
    #[inline]
    pub fn back_mut<'a>(&self, storage: &'a mut S) -> Option<&'a mut T>
    where
        K: 'a,
    {
        let last = self.last_key(storage)?;
        // Safety: last_key only returns live value-node keys
        Some(unsafe { storage.get_unchecked_mut(last) }.value_mut())
    }

    // ========================================================================
    // Link operations (relink only, no alloc/dealloc)
    // ========================================================================

    /// Links the node `key` into the ring just before position `at`.
    ///
    /// `at` may be the sentinel, which appends at the back. The node must
    /// exist in storage and must not currently be on any ring.
    ///
    /// # Panics
    ///
    /// Panics if `at` or `key` is not valid in storage.
    pub fn link_before(&mut self, storage: &mut S, at: K, key: K) {
        let prev = storage.get(at).expect("invalid 'at' key").prev;
        {
            let node = storage.get_mut(key).expect("invalid key");
            node.prev = prev;
            node.next = at;
        }

        // Safety: at validated above; prev is live by the ring invariant
        unsafe { storage.get_unchecked_mut(prev) }.next = key;
        unsafe { storage.get_unchecked_mut(at) }.prev = key;

        self.len += 1;
    }

    /// Links the node `key` into the ring just after position `at`.
    ///
    /// `at` may be the sentinel, which prepends at the front.
    ///
    /// # Panics
    ///
    /// Panics if `at` or `key` is not valid in storage.
    pub fn link_after(&mut self, storage: &mut S, at: K, key: K) {
        let next = storage.get(at).expect("invalid 'at' key").next;
        self.link_before(storage, next, key);
    }

    /// Unlinks a node from the ring without freeing it.
    ///
    /// The node's neighbors are joined around it and the node is left
    /// pointing at itself in both directions. It remains in storage and
    /// can be relinked (also into another ring sharing this storage).
    ///
    /// Returns `false` if the node was already detached.
    ///
    /// # Panics
    ///
    /// Panics if `key` is the sentinel or not valid in storage.
    pub fn unlink(&mut self, storage: &mut S, key: K) -> bool {
        assert!(key != self.sentinel, "cannot unlink the sentinel");

        let node = storage.get(key).expect("invalid key");
        let prev = node.prev;
        let next = node.next;

        // A detached node points at itself in both directions
        if prev == key {
            return false;
        }

        // Safety: prev/next are live by the ring invariant
        unsafe { storage.get_unchecked_mut(prev) }.next = next;
        unsafe { storage.get_unchecked_mut(next) }.prev = prev;

        // Safety: key validated above
        let node = unsafe { storage.get_unchecked_mut(key) };
        node.prev = key;
        node.next = key;

        self.len -= 1;
        true
    }

    // ========================================================================
    // Remove operations (unlink + deallocate)
    // ========================================================================

    /// Removes and returns the first element.
    ///
    /// Returns `None` if the ring is empty.
    #[inline]
    pub fn pop_front(&mut self, storage: &mut S) -> Option<T> {
        let first = self.first_key(storage)?;
        self.unlink(storage, first);
        storage.remove(first).map(Node::into_value)
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the ring is empty.
    #[inline]
    pub fn pop_back(&mut self, storage: &mut S) -> Option<T> {
        let last = self.last_key(storage)?;
        self.unlink(storage, last);
        storage.remove(last).map(Node::into_value)
    }

    /// Removes an element by key.
    ///
    /// Returns `None` if the key is invalid or names the sentinel.
    #[inline]
    pub fn remove(&mut self, storage: &mut S, key: K) -> Option<T> {
        if key == self.sentinel || storage.get(key).is_none() {
            return None;
        }

        self.unlink(storage, key);
        storage.remove(key).map(Node::into_value)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Removes all elements, freeing their nodes.
    ///
    /// The sentinel stays allocated; the ring is reusable afterwards.
    pub fn clear(&mut self, storage: &mut S) {
        let mut key = self.sentinel_node(storage).next;
        while key != self.sentinel {
            // Safety: key came from ring traversal, must be live
            let next = unsafe { storage.get_unchecked(key) }.next;
            storage.remove(key);
            key = next;
        }

        let sentinel = self.sentinel_node_mut(storage);
        sentinel.prev = self.sentinel;
        sentinel.next = self.sentinel;
        self.len = 0;
    }

    /// Destroys the ring: frees every value node and then the sentinel.
    ///
    /// After this call the storage holds none of the ring's nodes. This is
    /// the counterpart of construction; a ring that is merely dropped
    /// leaves its nodes in storage (the storage's own drop reclaims them).
    pub fn release(mut self, storage: &mut S) {
        self.clear(storage);
        storage.remove(self.sentinel);
    }

    /// Appends `other`'s elements to the back of this ring in O(1).
    ///
    /// Both rings must live in `storage`. After this call `other` is empty
    /// but still valid (its sentinel stays allocated).
    pub fn append(&mut self, storage: &mut S, other: &mut Self) {
        if other.is_empty() {
            return;
        }

        let (first, last) = {
            let s = other.sentinel_node(storage);
            (s.next, s.prev)
        };

        // Detach the whole chain from other's sentinel
        let os = other.sentinel_node_mut(storage);
        os.prev = other.sentinel;
        os.next = other.sentinel;

        // Splice the chain in just before our sentinel
        let old_last = self.sentinel_node(storage).prev;
        // Safety: all four keys are live by the ring invariants
        unsafe { storage.get_unchecked_mut(old_last) }.next = first;
        unsafe { storage.get_unchecked_mut(first) }.prev = old_last;
        unsafe { storage.get_unchecked_mut(last) }.next = self.sentinel;
        self.sentinel_node_mut(storage).prev = last;

        self.len += other.len;
        other.len = 0;
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter<'a>(&self, storage: &'a S) -> Iter<'a, T, S, K> {
        let sentinel = self.sentinel_node(storage);
        Iter {
            storage,
            front: sentinel.next,
            back: sentinel.prev,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut<'a>(&self, storage: &'a mut S) -> IterMut<'a, T, S, K> {
        let (front, back) = {
            let sentinel = self.sentinel_node(storage);
            (sentinel.next, sentinel.prev)
        };
        IterMut {
            storage,
            front,
            back,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over keys, front to back.
    ///
    /// Useful when you need both key and value, or when you plan to mutate
    /// the ring during traversal (collect keys first).
    #[inline]
    pub fn keys<'a>(&self, storage: &'a S) -> Keys<'a, T, S, K> {
        let sentinel = self.sentinel_node(storage);
        Keys {
            storage,
            front: sentinel.next,
            back: sentinel.prev,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    // ========================================================================
    // Internal
    // ========================================================================

    #[inline]
    fn sentinel_node<'a>(&self, storage: &'a S) -> &'a Node<T, K> {
        // Safety: the sentinel is allocated at construction and lives until
        // release; the storage invariant guarantees this is the right arena
        unsafe { storage.get_unchecked(self.sentinel) }
    }

    #[inline]
    fn sentinel_node_mut<'a>(&self, storage: &'a mut S) -> &'a mut Node<T, K> {
        // Safety: as in sentinel_node
        unsafe { storage.get_unchecked_mut(self.sentinel) }
    }
}

// =============================================================================
// Bounded storage impl - fallible construction and insertion
// =============================================================================

impl<T, S, K: Key> Ring<T, S, K>
where
    S: BoundedStorage<Node<T, K>, Key = K>,
{
    /// Creates an empty ring, allocating its sentinel in `storage`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Exhausted)` if storage has no free slot for the
    /// sentinel.
    pub fn try_new(storage: &mut S) -> Result<Self, Exhausted> {
        let sentinel = storage.try_insert(Node::sentinel())?;

        // Safety: just inserted
        let node = unsafe { storage.get_unchecked_mut(sentinel) };
        node.prev = sentinel;
        node.next = sentinel;

        Ok(Self {
            sentinel,
            len: 0,
            _marker: PhantomData,
        })
    }

    /// Creates a ring holding `n` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns `Err(Exhausted)` if storage runs out of slots. On failure
    /// every node allocated by this call, including the sentinel, has been
    /// freed again.
    pub fn try_filled(storage: &mut S, n: usize, value: T) -> Result<Self, Exhausted>
    where
        T: Clone,
    {
        Self::try_from_iter_in(storage, core::iter::repeat_n(value, n))
    }

    /// Creates a ring from an iterator, preserving its order.
    ///
    /// # Errors
    ///
    /// Returns `Err(Exhausted)` if storage runs out of slots; see
    /// [`Ring::try_filled`] for the rollback guarantee.
    pub fn try_from_iter_in<I>(storage: &mut S, iter: I) -> Result<Self, Exhausted>
    where
        I: IntoIterator<Item = T>,
    {
        let mut ring = Self::try_new(storage)?;
        for value in iter {
            if ring.try_push_back(storage, value).is_err() {
                ring.release(storage);
                return Err(Exhausted);
            }
        }
        Ok(ring)
    }

    /// Pushes a value to the back, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    #[inline]
    pub fn try_push_back(&mut self, storage: &mut S, value: T) -> Result<K, Full<T>> {
        let key = storage
            .try_insert(Node::new(value))
            .map_err(|e| Full(e.0.into_value()))?;
        self.link_before(storage, self.sentinel, key);
        Ok(key)
    }

    /// Pushes a value to the front, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    #[inline]
    pub fn try_push_front(&mut self, storage: &mut S, value: T) -> Result<K, Full<T>> {
        let key = storage
            .try_insert(Node::new(value))
            .map_err(|e| Full(e.0.into_value()))?;
        self.link_after(storage, self.sentinel, key);
        Ok(key)
    }

    /// Inserts a value after the node at `at`, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not valid in storage.
    #[inline]
    pub fn try_insert_after(&mut self, storage: &mut S, at: K, value: T) -> Result<K, Full<T>> {
        let key = storage
            .try_insert(Node::new(value))
            .map_err(|e| Full(e.0.into_value()))?;
        self.link_after(storage, at, key);
        Ok(key)
    }

    /// Inserts a value before the node at `at`, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not valid in storage.
    #[inline]
    pub fn try_insert_before(&mut self, storage: &mut S, at: K, value: T) -> Result<K, Full<T>> {
        let key = storage
            .try_insert(Node::new(value))
            .map_err(|e| Full(e.0.into_value()))?;
        self.link_before(storage, at, key);
        Ok(key)
    }
}

// =============================================================================
// Unbounded storage impl - infallible construction and insertion
// =============================================================================

impl<T, S, K: Key> Ring<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Creates an empty ring, allocating its sentinel in `storage`.
    pub fn new(storage: &mut S) -> Self {
        let sentinel = storage.insert(Node::sentinel());

        // Safety: just inserted
        let node = unsafe { storage.get_unchecked_mut(sentinel) };
        node.prev = sentinel;
        node.next = sentinel;

        Self {
            sentinel,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a ring holding `n` clones of `value`.
    pub fn filled(storage: &mut S, n: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_iter_in(storage, core::iter::repeat_n(value, n))
    }

    /// Creates a ring from an iterator, preserving its order.
    pub fn from_iter_in<I>(storage: &mut S, iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut ring = Self::new(storage);
        for value in iter {
            ring.push_back(storage, value);
        }
        ring
    }

    /// Pushes a value to the back, returning its key.
    #[inline]
    pub fn push_back(&mut self, storage: &mut S, value: T) -> K {
        let key = storage.insert(Node::new(value));
        self.link_before(storage, self.sentinel, key);
        key
    }

    /// Pushes a value to the front, returning its key.
    #[inline]
    pub fn push_front(&mut self, storage: &mut S, value: T) -> K {
        let key = storage.insert(Node::new(value));
        self.link_after(storage, self.sentinel, key);
        key
    }

    /// Inserts a value after the node at `at`, returning its key.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not valid in storage.
    #[inline]
    pub fn insert_after(&mut self, storage: &mut S, at: K, value: T) -> K {
        let key = storage.insert(Node::new(value));
        self.link_after(storage, at, key);
        key
    }

    /// Inserts a value before the node at `at`, returning its key.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not valid in storage.
    #[inline]
    pub fn insert_before(&mut self, storage: &mut S, at: K, value: T) -> K {
        let key = storage.insert(Node::new(value));
        self.link_before(storage, at, key);
        key
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to ring elements.
pub struct Iter<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<T, S, K: Key> Clone for Iter<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a, S, K: Key + 'a> Iterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: remaining > 0 guarantees front is a live value node
        let node = unsafe { self.storage.get_unchecked(self.front) };
        self.front = node.next;
        self.remaining -= 1;

        Some(node.value())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key + 'a> DoubleEndedIterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: remaining > 0 guarantees back is a live value node
        let node = unsafe { self.storage.get_unchecked(self.back) };
        self.back = node.prev;
        self.remaining -= 1;

        Some(node.value())
    }
}

impl<'a, T: 'a, S, K: Key + 'a> ExactSizeIterator for Iter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Iterator over mutable references to ring elements.
pub struct IterMut<'a, T, S, K: Key> {
    storage: &'a mut S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, K: Key + 'a> Iterator for IterMut<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: remaining > 0 guarantees front is a live value node
        let node = unsafe { self.storage.get_unchecked_mut(self.front) };
        self.front = node.next;
        self.remaining -= 1;

        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *(node.value_mut() as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key + 'a> DoubleEndedIterator for IterMut<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: remaining > 0 guarantees back is a live value node
        let node = unsafe { self.storage.get_unchecked_mut(self.back) };
        self.back = node.prev;
        self.remaining -= 1;

        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *(node.value_mut() as *mut T) })
    }
}

impl<'a, T: 'a, S, K: Key + 'a> ExactSizeIterator for IterMut<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Iterator over keys of ring elements, front to back.
pub struct Keys<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<T, S, K: Key> Clone for Keys<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T, S, K: Key + 'a> Iterator for Keys<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.front;
        // Safety: remaining > 0 guarantees front is a live value node
        self.front = unsafe { self.storage.get_unchecked(key) }.next;
        self.remaining -= 1;

        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, S, K: Key + 'a> DoubleEndedIterator for Keys<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.back;
        // Safety: remaining > 0 guarantees back is a live value node
        self.back = unsafe { self.storage.get_unchecked(key) }.prev;
        self.remaining -= 1;

        Some(key)
    }
}

impl<'a, T, S, K: Key + 'a> ExactSizeIterator for Keys<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}
