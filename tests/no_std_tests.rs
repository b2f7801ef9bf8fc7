#![no_std]
extern crate alloc;
extern crate lfu_sim;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::num::NonZeroUsize;
use lfu_sim::config::{LfuSimConfig, TieBreak};
use lfu_sim::{Access, CacheItem, FrequencyHeap, FrequencyHistory, LfuSimulator};

// Helper function to create a simulator with the init pattern
fn make_lfu<K: core::hash::Hash + Eq + Clone>(cap: usize) -> LfuSimulator<K> {
    let config = LfuSimConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
        tie_break: TieBreak::Oldest,
        retain_history: true,
    };
    LfuSimulator::init(config, None)
}

#[test]
fn test_lfu_in_no_std() {
    let mut sim = make_lfu::<String>(2);

    // Using String as it requires the alloc crate
    let key1 = String::from("key1");
    let key2 = String::from("key2");

    assert_eq!(sim.record_access(key1.as_str()), Access::Miss);
    assert_eq!(sim.record_access(key2.as_str()), Access::Miss);

    // Access key1 multiple times to increase its frequency
    assert_eq!(sim.record_access(key1.as_str()), Access::Hit);
    assert_eq!(sim.record_access(key1.as_str()), Access::Hit);

    // Add a new key, which should evict key2 (lower frequency)
    sim.record_access("key3");

    assert!(sim.contains(key1.as_str()));
    assert!(!sim.contains(key2.as_str()));
    assert!(sim.contains("key3"));
    assert_eq!(sim.historical_frequency(key2.as_str()), Some(1));
}

#[test]
fn test_numeric_keys_in_no_std() {
    let mut sim = make_lfu::<u64>(10);
    let keys: Vec<u64> = (0..100).map(|i| i % 20).collect();

    for key in &keys {
        sim.record_access(key);
    }

    assert_eq!(sim.total_accesses(), 100);
    assert!(sim.len() <= 10);
    assert!(sim.heap().is_valid());
}

#[test]
fn test_heap_in_no_std() {
    let mut heap: FrequencyHeap<String> = FrequencyHeap::new(4, TieBreak::Oldest);
    for (i, freq) in [5u64, 3, 8, 1].into_iter().enumerate() {
        heap.insert(CacheItem::new(format!("key{i}"), freq, i as u64));
    }

    let min = heap.extract_min().unwrap();
    assert_eq!(min.key(), "key3");
    assert_eq!(format!("{min}"), "key3(f: 1 t: 3)");
    assert!(heap.is_valid());
}

#[test]
fn test_history_in_no_std() {
    let mut history: FrequencyHistory<String> = FrequencyHistory::new();

    assert_eq!(history.bump("key"), 1);
    assert_eq!(history.bump("key"), 2);
    history.set("key", 7);
    assert_eq!(history.get("key"), Some(7));
}
