//! Resident cache record.
//!
//! A [`CacheItem`] binds an access key to the number of accesses counted for
//! it and to the engine's access counter at the moment it entered the cache.
//! The simulator never stores payloads, so the key is the whole record.

use core::fmt;

/// A key resident in the LFU heap.
///
/// # Fields
///
/// - `key`: The opaque access key
/// - `frequency`: Accesses counted for this key, always `>= 1` while resident
/// - `created_at`: The engine's `total_accesses` value when the item was admitted
///
/// # Examples
///
/// ```
/// use lfu_sim::CacheItem;
///
/// let item = CacheItem::new("page-7", 3, 42);
/// assert_eq!(*item.key(), "page-7");
/// assert_eq!(item.frequency(), 3);
/// assert_eq!(item.created_at(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheItem<K> {
    key: K,
    frequency: u64,
    created_at: u64,
}

impl<K> CacheItem<K> {
    /// Creates a new item. A frequency of zero is raised to one.
    #[inline]
    pub fn new(key: K, frequency: u64, created_at: u64) -> Self {
        Self {
            key,
            frequency: frequency.max(1),
            created_at,
        }
    }

    /// Returns the access key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the access count for the current residency.
    #[inline]
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    /// Returns the access counter value at admission time.
    #[inline]
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Consumes the item, returning its key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Bumps the frequency by one and returns the new value.
    #[inline]
    pub(crate) fn touch(&mut self) -> u64 {
        self.frequency = self.frequency.saturating_add(1);
        self.frequency
    }
}

impl<K: fmt::Display> fmt::Display for CacheItem<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(f: {} t: {})",
            self.key, self.frequency, self.created_at
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_item_frequency_floor() {
        let item = CacheItem::new(1u32, 0, 0);
        assert_eq!(item.frequency(), 1);
    }

    #[test]
    fn test_item_touch() {
        let mut item = CacheItem::new("a", 1, 5);
        assert_eq!(item.touch(), 2);
        assert_eq!(item.touch(), 3);
        assert_eq!(item.frequency(), 3);
        assert_eq!(item.created_at(), 5);
    }

    #[test]
    fn test_item_display() {
        let item = CacheItem::new("lpn", 4, 9);
        assert_eq!(item.to_string(), "lpn(f: 4 t: 9)");
    }
}
