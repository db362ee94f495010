//! Owned doubly-linked list with stable keys.
//!
//! [`RingList`] pairs a [`Ring`](crate::Ring) with its own `slab`-backed
//! node arena, giving the familiar owned-container shape: no storage to
//! thread through calls, insertion never fails, and the arena grows on
//! demand. Every insertion still returns a stable `usize` key, so O(1)
//! removal from the middle keeps working.
//!
//! For fixed-capacity or shared-arena use, drop down to [`Ring`](crate::Ring)
//! directly.

use std::hash::{Hash, Hasher};

use crate::ring::{self, Node};
use crate::{Ring, Storage};

type Arena<T> = slab::Slab<Node<T, usize>>;

/// An owned doubly-linked list over a growable node arena.
///
/// Insertion returns a stable `usize` key that stays valid until that
/// element is removed. All push/pop/insert/remove operations are O(1).
///
/// # Example
///
/// ```
/// use ring_list::RingList;
///
/// let mut list = RingList::new();
/// list.push_back(1);
/// let key = list.push_back(2);
/// list.push_back(3);
///
/// list.remove(key);
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub struct RingList<T> {
    storage: Arena<T>,
    ring: Ring<T, Arena<T>, usize>,
}

impl<T> RingList<T> {
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        let mut storage = Arena::new();
        let ring = Ring::new(&mut storage);
        Self { storage, ring }
    }

    /// Creates an empty list with room for `capacity` elements before the
    /// arena reallocates.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        // One extra slot for the sentinel
        let mut storage = Arena::with_capacity(capacity + 1);
        let ring = Ring::new(&mut storage);
        Self { storage, ring }
    }

    /// Creates a list holding `n` clones of `value`.
    ///
    /// ```
    /// use ring_list::RingList;
    ///
    /// let list = RingList::filled(3, 7);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![7, 7, 7]);
    /// ```
    pub fn filled(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut storage = Arena::with_capacity(n + 1);
        let ring = Ring::filled(&mut storage, n, value);
        Self { storage, ring }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns the largest number of elements the list can hold.
    ///
    /// The count type's ceiling; real arenas run out of memory long before
    /// this.
    #[inline]
    pub const fn max_len(&self) -> usize {
        usize::MAX
    }

    /// Returns the number of elements the arena can hold before it
    /// reallocates.
    #[inline]
    pub fn capacity(&self) -> usize {
        // One arena slot is the sentinel's
        self.storage.capacity().saturating_sub(1)
    }

    /// Returns a view of the backing node arena.
    ///
    /// The arena holds one [`RingNode`](crate::RingNode) slot per element
    /// plus the sentinel. Read-only: node links and slot lifetimes are
    /// managed exclusively through the list.
    #[inline]
    pub fn arena(&self) -> &slab::Slab<Node<T, usize>> {
        &self.storage
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.ring.front(&self.storage)
    }

    /// Returns a mutable reference to the first element.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.ring.front_mut(&mut self.storage)
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.ring.back(&self.storage)
    }

    /// Returns a mutable reference to the last element.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.ring.back_mut(&mut self.storage)
    }

    /// Returns a reference to the element at `key`.
    #[inline]
    pub fn get(&self, key: usize) -> Option<&T> {
        self.ring.get(&self.storage, key)
    }

    /// Returns a mutable reference to the element at `key`.
    #[inline]
    pub fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        self.ring.get_mut(&mut self.storage, key)
    }

    /// Returns `true` if some element equals `value`. O(n).
    #[inline]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|v| v == value)
    }

    // ========================================================================
    // Key navigation
    // ========================================================================

    /// Returns the first element's key.
    #[inline]
    pub fn first_key(&self) -> Option<usize> {
        self.ring.first_key(&self.storage)
    }

    /// Returns the last element's key.
    #[inline]
    pub fn last_key(&self) -> Option<usize> {
        self.ring.last_key(&self.storage)
    }

    /// Returns the key after `key`, or `None` at the back.
    #[inline]
    pub fn next_key(&self, key: usize) -> Option<usize> {
        self.ring.next_key(&self.storage, key)
    }

    /// Returns the key before `key`, or `None` at the front.
    #[inline]
    pub fn prev_key(&self, key: usize) -> Option<usize> {
        self.ring.prev_key(&self.storage, key)
    }

    // ========================================================================
    // Insertion / removal
    // ========================================================================

    /// Appends an element, returning its key.
    #[inline]
    pub fn push_back(&mut self, value: T) -> usize {
        self.ring.push_back(&mut self.storage, value)
    }

    /// Prepends an element, returning its key.
    #[inline]
    pub fn push_front(&mut self, value: T) -> usize {
        self.ring.push_front(&mut self.storage, value)
    }

    /// Removes and returns the first element.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.ring.pop_front(&mut self.storage)
    }

    /// Removes and returns the last element.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        self.ring.pop_back(&mut self.storage)
    }

    /// Inserts a value after the element at `at`, returning its key.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not a live key of this list.
    #[inline]
    pub fn insert_after(&mut self, at: usize, value: T) -> usize {
        self.ring.insert_after(&mut self.storage, at, value)
    }

    /// Inserts a value before the element at `at`, returning its key.
    ///
    /// # Panics
    ///
    /// Panics if `at` is not a live key of this list.
    #[inline]
    pub fn insert_before(&mut self, at: usize, value: T) -> usize {
        self.ring.insert_before(&mut self.storage, at, value)
    }

    /// Removes and returns the element at `key`.
    ///
    /// Returns `None` for keys that are no longer (or never were) live.
    #[inline]
    pub fn remove(&mut self, key: usize) -> Option<T> {
        self.ring.remove(&mut self.storage, key)
    }

    /// Removes all elements. Keys handed out so far become invalid.
    #[inline]
    pub fn clear(&mut self) {
        self.ring.clear(&mut self.storage);
    }

    /// Moves all elements of `other` to the back of `self`, preserving
    /// their order. `other` is left empty but usable.
    ///
    /// O(len of `other`): each list owns its own arena, so elements are
    /// moved value by value. Keys are not preserved across the transfer.
    pub fn append(&mut self, other: &mut Self) {
        while let Some(value) = other.pop_front() {
            self.push_back(value);
        }
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.ring.iter(&self.storage),
        }
    }

    /// Returns an iterator over mutable references, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.ring.iter_mut(&mut self.storage),
        }
    }

    /// Returns an iterator over keys, front to back.
    #[inline]
    pub fn keys(&self) -> Keys<'_, T> {
        Keys {
            inner: self.ring.keys(&self.storage),
        }
    }

    /// Removes all elements, yielding them front to back.
    ///
    /// Dropping the iterator removes any elements not yet yielded.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { list: self }
    }

    // ========================================================================
    // Cursors
    // ========================================================================

    /// Returns a cursor at the first element, or at the ghost position if
    /// the list is empty.
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        let at = self.first_key().unwrap_or_else(|| self.ring.sentinel());
        Cursor { list: self, at }
    }

    /// Returns a cursor at the last element, or at the ghost position if
    /// the list is empty.
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        let at = self.last_key().unwrap_or_else(|| self.ring.sentinel());
        Cursor { list: self, at }
    }

    /// Mutable variant of [`RingList::cursor_front`].
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.first_key().unwrap_or_else(|| self.ring.sentinel());
        CursorMut { list: self, at }
    }

    /// Mutable variant of [`RingList::cursor_back`].
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.last_key().unwrap_or_else(|| self.ring.sentinel());
        CursorMut { list: self, at }
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Raw successor link of any live node, sentinel included.
    #[inline]
    fn raw_next(&self, at: usize) -> usize {
        Storage::get(&self.storage, at)
            .expect("cursor position not in arena")
            .next
    }

    /// Raw predecessor link of any live node, sentinel included.
    #[inline]
    fn raw_prev(&self, at: usize) -> usize {
        Storage::get(&self.storage, at)
            .expect("cursor position not in arena")
            .prev
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T> Default for RingList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RingList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Clones `source` into `self`, reusing `self`'s existing nodes.
    ///
    /// The shared prefix is overwritten in place (those keys stay valid),
    /// surplus nodes are removed, missing ones appended.
    fn clone_from(&mut self, source: &Self) {
        let mut dst = self.first_key();
        for value in source.iter() {
            match dst {
                Some(key) => {
                    // Key came from ring traversal, must be live
                    *self.get_mut(key).expect("stale key") = value.clone();
                    dst = self.next_key(key);
                }
                None => {
                    self.push_back(value.clone());
                }
            }
        }

        // Drop the surplus tail, if self was longer
        while let Some(key) = dst {
            dst = self.next_key(key);
            self.remove(key);
        }
    }
}

impl<T> FromIterator<T> for RingList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for RingList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for RingList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for RingList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingList<T> {}

impl<T: Hash> Hash for RingList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T> IntoIterator for RingList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a RingList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: ring::Iter<'a, T, Arena<T>, usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T> {
    inner: ring::IterMut<'a, T, Arena<T>, usize>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Iterator over the keys of list elements.
#[derive(Clone)]
pub struct Keys<'a, T> {
    inner: ring::Keys<'a, T, Arena<T>, usize>,
}

impl<T> Iterator for Keys<'_, T> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Keys<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Keys<'_, T> {}

/// Owning iterator over list elements.
pub struct IntoIter<T> {
    list: RingList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// Draining iterator; see [`RingList::drain`].
pub struct Drain<'a, T> {
    list: &'a mut RingList<T>,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {}

impl<T> Drop for Drain<'_, T> {
    fn drop(&mut self) {
        self.list.clear();
    }
}

// =============================================================================
// Cursors
// =============================================================================

/// A read-only position on the list, including the ghost position.
///
/// A cursor sits either on an element or on the "ghost" between the back
/// and the front, where [`Cursor::current`] is `None`. Moving past either
/// end lands on the ghost; moving again wraps around, so a cursor can
/// circle the list indefinitely.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    list: &'a RingList<T>,
    at: usize,
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            at: self.at,
        }
    }
}

/// Position identity: two cursors are equal iff they sit on the same node
/// of the same list.
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.list, other.list) && self.at == other.at
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {
    /// Returns the element under the cursor, or `None` at the ghost.
    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        self.list.get(self.at)
    }

    /// Returns the key under the cursor, or `None` at the ghost.
    #[inline]
    pub fn key(&self) -> Option<usize> {
        if self.at == self.list.ring.sentinel() {
            None
        } else {
            Some(self.at)
        }
    }

    /// Moves to the next position (toward the back, then the ghost).
    #[inline]
    pub fn move_next(&mut self) {
        self.at = self.list.raw_next(self.at);
    }

    /// Moves to the previous position (toward the front, then the ghost).
    #[inline]
    pub fn move_prev(&mut self) {
        self.at = self.list.raw_prev(self.at);
    }

    /// Returns the element after the cursor without moving.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a T> {
        self.list.get(self.list.raw_next(self.at))
    }

    /// Returns the element before the cursor without moving.
    #[inline]
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.list.get(self.list.raw_prev(self.at))
    }
}

/// A mutable position on the list; supports editing during traversal.
///
/// Shares [`Cursor`]'s ghost-position convention.
pub struct CursorMut<'a, T> {
    list: &'a mut RingList<T>,
    at: usize,
}

impl<T> CursorMut<'_, T> {
    /// Returns the element under the cursor, or `None` at the ghost.
    #[inline]
    pub fn current(&mut self) -> Option<&mut T> {
        self.list.get_mut(self.at)
    }

    /// Returns the key under the cursor, or `None` at the ghost.
    #[inline]
    pub fn key(&self) -> Option<usize> {
        if self.at == self.list.ring.sentinel() {
            None
        } else {
            Some(self.at)
        }
    }

    /// Moves to the next position (toward the back, then the ghost).
    #[inline]
    pub fn move_next(&mut self) {
        self.at = self.list.raw_next(self.at);
    }

    /// Moves to the previous position (toward the front, then the ghost).
    #[inline]
    pub fn move_prev(&mut self) {
        self.at = self.list.raw_prev(self.at);
    }

    /// Removes and returns the element under the cursor, then moves to the
    /// next position. Returns `None` at the ghost (nothing is removed).
    pub fn remove_current(&mut self) -> Option<T> {
        if self.at == self.list.ring.sentinel() {
            return None;
        }

        let next = self.list.raw_next(self.at);
        let value = self.list.remove(self.at);
        self.at = next;
        value
    }

    /// Inserts a value after the cursor. At the ghost this prepends to the
    /// list. The cursor does not move.
    #[inline]
    pub fn insert_after(&mut self, value: T) -> usize {
        self.list.insert_after(self.at, value)
    }

    /// Inserts a value before the cursor. At the ghost this appends to the
    /// list. The cursor does not move.
    #[inline]
    pub fn insert_before(&mut self, value: T) -> usize {
        self.list.insert_before(self.at, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_list_is_empty() {
        let list: RingList<u64> = RingList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.front().is_none());
        assert!(list.back().is_none());
    }

    #[test]
    fn filled_construction() {
        let list = RingList::filled(3, 7u64);
        assert_eq!(list.len(), 3);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![7, 7, 7]);
    }

    #[test]
    fn from_range() {
        let list: RingList<u64> = (1..=4).collect();
        assert_eq!(list.len(), 4);
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&4));
    }

    #[test]
    fn from_array() {
        let list = RingList::from([1, 2, 3]);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn push_and_pop_both_ends() {
        let mut list = RingList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);

        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn keyed_access_and_removal() {
        let mut list = RingList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.get(b), Some(&"b"));
        *list.get_mut(b).unwrap() = "B";
        assert_eq!(list.remove(b), Some("B"));
        assert_eq!(list.remove(b), None);

        assert_eq!(list.get(a), Some(&"a"));
        assert_eq!(list.get(c), Some(&"c"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn insert_relative_to_keys() {
        let mut list = RingList::new();
        let a = list.push_back(1);
        let c = list.push_back(3);

        list.insert_after(a, 2);
        list.insert_before(a, 0);
        list.insert_after(c, 4);

        assert_eq!(
            list.iter().copied().collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn key_navigation_round_trip() {
        let mut list = RingList::new();
        let a = list.push_back(1);
        let b = list.push_back(2);
        let c = list.push_back(3);

        assert_eq!(list.first_key(), Some(a));
        assert_eq!(list.next_key(a), Some(b));
        assert_eq!(list.next_key(b), Some(c));
        assert_eq!(list.next_key(c), None);
        assert_eq!(list.prev_key(c), Some(b));
        assert_eq!(list.last_key(), Some(c));
    }

    #[test]
    fn keys_stay_valid_across_unrelated_removals() {
        let mut list = RingList::new();
        let keys: Vec<_> = (0..10u64).map(|i| list.push_back(i)).collect();

        for key in keys.iter().step_by(2) {
            list.remove(*key);
        }

        for (i, key) in keys.iter().enumerate().skip(1).step_by(2) {
            assert_eq!(list.get(*key), Some(&(i as u64)));
        }
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn iter_both_directions() {
        let list: RingList<u64> = (1..=4).collect();

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(
            list.iter().rev().copied().collect::<Vec<_>>(),
            vec![4, 3, 2, 1]
        );
        assert_eq!(list.iter().len(), 4);
    }

    #[test]
    fn iter_mut_and_loop_sugar() {
        let mut list: RingList<u64> = (1..=3).collect();

        for value in &mut list {
            *value += 10;
        }

        let mut total = 0;
        for value in &list {
            total += value;
        }
        assert_eq!(total, 11 + 12 + 13);
    }

    #[test]
    fn into_iter_consumes_in_order() {
        let list: RingList<u64> = (1..=4).collect();
        let forward: Vec<_> = list.clone().into_iter().collect();
        assert_eq!(forward, vec![1, 2, 3, 4]);

        let backward: Vec<_> = list.into_iter().rev().collect();
        assert_eq!(backward, vec![4, 3, 2, 1]);
    }

    #[test]
    fn drain_yields_then_empties() {
        let mut list: RingList<u64> = (1..=4).collect();

        let first_two: Vec<_> = list.drain().take(2).collect();
        assert_eq!(first_two, vec![1, 2]);

        // Dropping the drain removed the rest
        assert!(list.is_empty());
    }

    #[test]
    fn clear_then_reuse() {
        let mut list: RingList<u64> = (1..=3).collect();
        list.clear();
        assert!(list.is_empty());

        list.push_back(9);
        assert_eq!(list.front(), Some(&9));
    }

    #[test]
    fn append_moves_all_elements() {
        let mut a: RingList<u64> = (1..=2).collect();
        let mut b: RingList<u64> = (3..=4).collect();

        a.append(&mut b);

        assert_eq!(a.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(b.is_empty());

        b.push_back(5);
        assert_eq!(b.front(), Some(&5));
    }

    #[test]
    fn clone_is_deep() {
        let mut original: RingList<u64> = (1..=3).collect();
        let copy = original.clone();

        original.push_back(4);
        *original.front_mut().unwrap() = 100;

        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(original.len(), 4);
    }

    #[test]
    fn clone_from_reuses_prefix_nodes() {
        let mut dst: RingList<u64> = (1..=5).collect();
        let src: RingList<u64> = (10..=11).collect();

        let first = dst.first_key().unwrap();
        let second = dst.next_key(first).unwrap();

        dst.clone_from(&src);

        assert_eq!(dst.iter().copied().collect::<Vec<_>>(), vec![10, 11]);
        // Prefix keys survived the assignment
        assert_eq!(dst.get(first), Some(&10));
        assert_eq!(dst.get(second), Some(&11));
    }

    #[test]
    fn clone_from_grows_when_source_longer() {
        let mut dst: RingList<u64> = (1..=2).collect();
        let src: RingList<u64> = (10..=14).collect();

        dst.clone_from(&src);

        assert_eq!(
            dst.iter().copied().collect::<Vec<_>>(),
            vec![10, 11, 12, 13, 14]
        );
    }

    #[test]
    fn move_semantics_leave_source_empty() {
        let mut list: RingList<u64> = (1..=3).collect();

        let moved = std::mem::take(&mut list);

        assert_eq!(moved.len(), 3);
        assert!(list.is_empty());

        // The emptied source is fully usable
        list.push_back(9);
        assert_eq!(list.front(), Some(&9));
    }

    #[test]
    fn equality_and_hashing() {
        use std::collections::hash_map::DefaultHasher;

        let a: RingList<u64> = (1..=3).collect();
        let b = RingList::from([1, 2, 3]);
        let c = RingList::from([1, 2]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let hash = |list: &RingList<u64>| {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn debug_format() {
        let list = RingList::from([1, 2, 3]);
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    #[test]
    fn contains_scans() {
        let list = RingList::from([1, 2, 3]);
        assert!(list.contains(&2));
        assert!(!list.contains(&9));
    }

    #[test]
    fn extend_appends() {
        let mut list = RingList::from([1, 2]);
        list.extend([3, 4]);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn cursor_walks_and_wraps() {
        let list = RingList::from([1, 2, 3]);
        let mut cursor = list.cursor_front();

        assert_eq!(cursor.current(), Some(&1));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&3));

        // Past the back: the ghost position
        cursor.move_next();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.key(), None);

        // And wraps to the front
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&1));
    }

    #[test]
    fn cursor_retreat_mirrors_advance() {
        let list = RingList::from([1, 2, 3]);
        let mut cursor = list.cursor_back();

        assert_eq!(cursor.current(), Some(&3));
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&2));

        // Advance then retreat returns to the same element
        cursor.move_next();
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&2));

        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&1));
        cursor.move_prev();
        assert_eq!(cursor.current(), None);
        cursor.move_prev();
        assert_eq!(cursor.current(), Some(&3));
    }

    #[test]
    fn cursor_equality_is_positional() {
        let list = RingList::from([1, 2]);
        let mut a = list.cursor_front();
        let b = list.cursor_front();

        assert_eq!(a.clone(), b);
        a.move_next();
        assert_ne!(a, b);
        a.move_prev();
        assert_eq!(a, b);
    }

    #[test]
    fn with_capacity_reserves_slots() {
        let list: RingList<u64> = RingList::with_capacity(8);
        assert!(list.capacity() >= 8);
        assert!(list.is_empty());
    }

    #[test]
    fn arena_accounts_for_every_node() {
        let mut list = RingList::new();
        // Sentinel only
        assert_eq!(list.arena().len(), 1);

        list.push_back(1);
        list.push_back(2);
        assert_eq!(list.arena().len(), list.len() + 1);

        list.pop_front();
        assert_eq!(list.arena().len(), 2);
        list.clear();
        assert_eq!(list.arena().len(), 1);
    }

    #[test]
    fn cursor_peeks() {
        let list = RingList::from([1, 2, 3]);
        let mut cursor = list.cursor_front();

        assert_eq!(cursor.peek_prev(), None); // ghost behind the front
        assert_eq!(cursor.peek_next(), Some(&2));
        cursor.move_next();
        assert_eq!(cursor.peek_prev(), Some(&1));
    }

    #[test]
    fn cursor_mut_removes_during_traversal() {
        let mut list = RingList::from([1u64, 2, 3, 4, 5]);
        let mut cursor = list.cursor_front_mut();

        // Remove the even elements in one pass
        while let Some(&mut value) = cursor.current() {
            if value % 2 == 0 {
                cursor.remove_current();
            } else {
                cursor.move_next();
            }
        }

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn cursor_mut_inserts_at_ghost() {
        let mut list = RingList::from([2]);
        let mut cursor = list.cursor_front_mut();

        cursor.move_next(); // onto the ghost
        assert!(cursor.current().is_none());

        cursor.insert_after(1); // prepends
        cursor.insert_before(3); // appends

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn cursor_mut_edits_in_place() {
        let mut list = RingList::from([1, 2, 3]);
        let mut cursor = list.cursor_front_mut();

        cursor.move_next();
        *cursor.current().unwrap() = 20;
        assert_eq!(cursor.remove_current(), Some(20));
        assert_eq!(cursor.current(), Some(&mut 3));

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
