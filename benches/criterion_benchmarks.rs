use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lfu_sim::config::{LfuSimConfig, TieBreak};
use lfu_sim::LfuSimulator;
use std::num::NonZeroUsize;

fn make_lfu(cap: usize, tie_break: TieBreak) -> LfuSimulator<u64> {
    let config = LfuSimConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
        tie_break,
        retain_history: true,
    };
    LfuSimulator::init(config, None)
}

/// Skewed trace: every fourth access goes to a small hot set, the rest are
/// spread over a much larger key space.
fn skewed_trace(len: usize, hot: u64, cold: u64) -> Vec<u64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|i| {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let r = state >> 33;
            if i % 4 == 0 {
                r % hot
            } else {
                hot + r % cold
            }
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("LFU Simulator");

    // Hits only: every key is resident
    {
        let mut sim = make_lfu(CACHE_SIZE, TieBreak::Oldest);
        for i in 0..CACHE_SIZE as u64 {
            sim.record_access(&i);
        }

        group.bench_function("record_access hit", |b| {
            b.iter(|| {
                for i in 0..100u64 {
                    black_box(sim.record_access(&(i % CACHE_SIZE as u64)));
                }
            });
        });
    }

    // Misses with eviction: keys never repeat
    {
        let mut sim = make_lfu(CACHE_SIZE, TieBreak::Oldest);
        let mut next = 0u64;

        group.bench_function("record_access miss", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    next += 1;
                    black_box(sim.record_access(&next));
                }
            });
        });
    }

    let trace = skewed_trace(20_000, 200, 20_000);
    for tie_break in [TieBreak::Oldest, TieBreak::HeapOrder] {
        group.bench_with_input(
            BenchmarkId::new("skewed replay", tie_break),
            &trace,
            |b, trace| {
                b.iter(|| {
                    let mut sim = make_lfu(CACHE_SIZE, tie_break);
                    for key in trace {
                        sim.record_access(key);
                    }
                    black_box(sim.hits())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
