//! Frequency history index.
//!
//! Records the last frequency counted for every key the simulator has seen.
//! Entries outlive eviction: when a key comes back it resumes from its
//! recorded frequency instead of starting over at one. This is what makes the
//! simulated policy differ from textbook LFU, where a returning key is
//! indistinguishable from a brand new one.

extern crate alloc;

use crate::{DefaultHashBuilder, HashMap};
use alloc::borrow::ToOwned;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

/// Map from key to the last frequency recorded for it.
///
/// # Examples
///
/// ```
/// use lfu_sim::history::FrequencyHistory;
///
/// let mut history: FrequencyHistory<String> = FrequencyHistory::new();
/// assert_eq!(history.bump("a"), 1);
/// assert_eq!(history.bump("a"), 2);
/// assert_eq!(history.get("a"), Some(2));
/// assert_eq!(history.get("b"), None);
/// ```
pub struct FrequencyHistory<K, S = DefaultHashBuilder> {
    map: HashMap<K, u64, S>,
}

impl<K: Hash + Eq> FrequencyHistory<K> {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq> Default for FrequencyHistory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> FrequencyHistory<K, S> {
    /// Returns the number of keys ever recorded (and not forgotten).
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K: Hash + Eq, S: BuildHasher> FrequencyHistory<K, S> {
    /// Creates an empty history hashing keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: HashMap::with_hasher(hash_builder),
        }
    }

    /// Returns the last frequency recorded for `key`.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    /// Records `frequency` for `key`, overwriting any previous value.
    pub fn set<Q>(&mut self, key: &Q, frequency: u64)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        match self.map.get_mut(key) {
            Some(slot) => *slot = frequency,
            None => {
                self.map.insert(key.to_owned(), frequency);
            }
        }
    }

    /// Advances the recorded frequency of `key` by one and returns it.
    ///
    /// An unseen key is recorded at frequency one.
    pub fn bump<Q>(&mut self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    {
        match self.map.get_mut(key) {
            Some(slot) => {
                *slot = slot.saturating_add(1);
                *slot
            }
            None => {
                self.map.insert(key.to_owned(), 1);
                1
            }
        }
    }

    /// Drops the record for `key`, returning the frequency it held.
    pub fn forget<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, S> core::fmt::Debug for FrequencyHistory<K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrequencyHistory")
            .field("len", &self.map.len())
            .finish()
    }
}
