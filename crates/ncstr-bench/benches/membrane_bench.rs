//! Membrane overhead benchmarks.
//!
//! Measures the per-call cost the ABI layer pays for ownership tracking
//! and null healing.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ncstr_membrane::config::safety_level;
use ncstr_membrane::{AllocationRegistry, global_healing_policy};

fn bench_registry_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_cycle");

    for &live in &[0usize, 1024, 65536] {
        let registry = AllocationRegistry::new();
        // Background population so lookups hit realistically sized shards.
        for i in 0..live {
            registry.register(0x1000_0000 + i * 64, 32);
        }
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("register_release", live), &registry, |b, reg| {
            let mut addr = 0x8000_0000usize;
            b.iter(|| {
                addr = addr.wrapping_add(16);
                reg.register(black_box(addr), 8);
                black_box(reg.release(black_box(addr)));
            });
        });
    }
    group.finish();
}

fn bench_null_heal(c: &mut Criterion) {
    let policy = global_healing_policy();
    c.bench_function("heal_null_buffer/non_null", |b| {
        b.iter(|| black_box(policy.heal_null_buffer(black_box(false))));
    });
    c.bench_function("safety_level/cached", |b| {
        b.iter(|| black_box(safety_level()));
    });
}

criterion_group!(benches, bench_registry_cycle, bench_null_heal);
criterion_main!(benches);
