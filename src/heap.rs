//! Indexed binary min-heap over [`CacheItem`]s.
//!
//! The heap is a complete binary tree stored in a `Vec` (parent of `i` at
//! `(i - 1) / 2`, children at `2i + 1` and `2i + 2`) ordered by access
//! frequency, so the least frequently used item sits at the root.
//!
//! ```text
//!                 ┌──────────┐
//!                 │ a  f=1   │  index 0  ◀── next eviction
//!                 └────┬─────┘
//!            ┌─────────┴─────────┐
//!       ┌────┴─────┐        ┌────┴─────┐
//!       │ c  f=2   │        │ b  f=4   │  index 1, 2
//!       └────┬─────┘        └──────────┘
//!       ┌────┴─────┐
//!       │ d  f=5   │  index 3
//!       └──────────┘
//!
//!   positions: { a: 0, c: 1, b: 2, d: 3 }
//! ```
//!
//! Alongside the array the heap keeps a key → slot map that every swap
//! updates, so locating a resident key is a hash lookup rather than a scan.
//! `percolate_up` and `percolate_down` are the only two primitives that
//! restore the heap invariant; every mutation ends with one of them.

extern crate alloc;

use crate::config::TieBreak;
use crate::item::CacheItem;
use crate::{DefaultHashBuilder, HashMap};
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::slice;

/// Array-backed min-heap keyed by frequency, with O(1) key lookup.
///
/// # Examples
///
/// ```
/// use lfu_sim::heap::FrequencyHeap;
/// use lfu_sim::config::TieBreak;
/// use lfu_sim::CacheItem;
///
/// let mut heap: FrequencyHeap<&str> = FrequencyHeap::new(4, TieBreak::Oldest);
/// heap.insert(CacheItem::new("hot", 5, 1));
/// heap.insert(CacheItem::new("cold", 1, 2));
///
/// assert_eq!(heap.peek_min().map(|item| *item.key()), Some("cold"));
/// assert_eq!(heap.find_index_by_key("hot"), Some(1));
/// assert_eq!(heap.extract_min().map(|item| item.into_key()), Some("cold"));
/// ```
pub struct FrequencyHeap<K, S = DefaultHashBuilder> {
    items: Vec<CacheItem<K>>,
    positions: HashMap<K, usize, S>,
    tie_break: TieBreak,
}

impl<K: Hash + Eq + Clone> FrequencyHeap<K> {
    /// Creates an empty heap with room for `capacity` items.
    pub fn new(capacity: usize, tie_break: TieBreak) -> Self {
        Self::with_hasher(capacity, tie_break, DefaultHashBuilder::default())
    }
}

impl<K, S> FrequencyHeap<K, S> {
    /// Returns the number of items in the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the heap holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the ordering policy for equally frequent items.
    #[inline]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Returns the items in array order.
    #[inline]
    pub fn as_slice(&self) -> &[CacheItem<K>] {
        &self.items
    }

    /// Iterates the items in array order (not sorted).
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, CacheItem<K>> {
        self.items.iter()
    }

    /// Returns the item at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&CacheItem<K>> {
        self.items.get(index)
    }

    /// Returns the least frequently used item without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<&CacheItem<K>> {
        self.items.first()
    }
}

impl<K: Hash + Eq + Clone, S: BuildHasher> FrequencyHeap<K, S> {
    /// Creates an empty heap with room for `capacity` items, hashing keys with `hash_builder`.
    pub fn with_hasher(capacity: usize, tie_break: TieBreak, hash_builder: S) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            tie_break,
        }
    }

    /// Returns the slot currently holding `key`.
    #[inline]
    pub fn find_index_by_key<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.positions.get(key).copied()
    }

    /// Returns the item stored under `key`.
    #[inline]
    pub fn find_by_key<Q>(&self, key: &Q) -> Option<&CacheItem<K>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_index_by_key(key)
            .and_then(|index| self.items.get(index))
    }

    /// Adds an item and sifts it up to its place.
    ///
    /// If the key is already resident the stored item is replaced in place and
    /// the heap is repaired around it.
    pub fn insert(&mut self, item: CacheItem<K>) {
        if let Some(index) = self.find_index_by_key(item.key()) {
            let key = item.key().clone();
            self.items[index] = item;
            self.percolate_up(index);
            if let Some(index) = self.find_index_by_key(&key) {
                self.percolate_down(index);
            }
            return;
        }

        let index = self.items.len();
        self.positions.insert(item.key().clone(), index);
        self.items.push(item);
        self.percolate_up(index);
    }

    /// Removes and returns the least frequently used item.
    ///
    /// The last slot is moved into the root and sifted down. Returns `None`
    /// when the heap is empty.
    pub fn extract_min(&mut self) -> Option<CacheItem<K>> {
        if self.items.is_empty() {
            return None;
        }

        let min = self.items.swap_remove(0);
        self.positions.remove(min.key());

        if let Some(root) = self.items.first() {
            if let Some(slot) = self.positions.get_mut(root.key()) {
                *slot = 0;
            }
            self.percolate_down(0);
        }

        Some(min)
    }

    /// Bumps the frequency of the item at `index` and repairs the heap.
    ///
    /// Returns the new frequency, or `None` if `index` is out of bounds.
    pub fn increment(&mut self, index: usize) -> Option<u64> {
        let frequency = self.items.get_mut(index)?.touch();

        match self.tie_break {
            TieBreak::Oldest => self.percolate_down(index),
            TieBreak::HeapOrder => {
                // classic repair: last slot up first, then the touched slot down
                self.percolate_up(self.items.len() - 1);
                self.percolate_down(index);
            }
        }

        Some(frequency)
    }

    /// Sifts the item at `index` towards the root while it ranks strictly
    /// below its parent.
    pub fn percolate_up(&mut self, mut index: usize) {
        if index >= self.items.len() {
            return;
        }

        while index > 0 {
            let parent = (index - 1) / 2;
            if self.rank(index) < self.rank(parent) {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Sifts the item at `index` towards the leaves while it ranks strictly
    /// above its smaller child. The right child is taken only when it ranks
    /// strictly below the left one.
    ///
    /// Equally ranked children resolve to the left child. `HeapOrder`
    /// eviction sequences depend on this.
    pub fn percolate_down(&mut self, mut index: usize) {
        let len = self.items.len();

        loop {
            let left = 2 * index + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let child = if right < len && self.rank(left) > self.rank(right) {
                right
            } else {
                left
            };

            if self.rank(index) > self.rank(child) {
                self.swap(index, child);
                index = child;
            } else {
                break;
            }
        }
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }

    /// Checks the heap invariant and the key → slot map.
    ///
    /// Every parent must rank at or below both children and every key must
    /// map to the slot that actually holds it.
    pub fn is_valid(&self) -> bool {
        if self.positions.len() != self.items.len() {
            return false;
        }

        let ordered = (1..self.items.len()).all(|index| {
            let parent = (index - 1) / 2;
            self.items[parent].frequency() <= self.items[index].frequency()
                && self.rank(parent) <= self.rank(index)
        });

        ordered
            && self
                .items
                .iter()
                .enumerate()
                .all(|(index, item)| self.positions.get(item.key()) == Some(&index))
    }

    /// Ordering key of the item at `index`.
    #[inline]
    fn rank(&self, index: usize) -> (u64, u64) {
        let item = &self.items[index];
        match self.tie_break {
            TieBreak::Oldest => (item.frequency(), item.created_at()),
            TieBreak::HeapOrder => (item.frequency(), 0),
        }
    }

    /// Swaps two slots and records their new positions.
    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
        if let Some(slot) = self.positions.get_mut(self.items[a].key()) {
            *slot = a;
        }
        if let Some(slot) = self.positions.get_mut(self.items[b].key()) {
            *slot = b;
        }
    }
}

impl<K, S> core::fmt::Debug for FrequencyHeap<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrequencyHeap")
            .field("len", &self.items.len())
            .field("tie_break", &self.tie_break)
            .finish()
    }
}
