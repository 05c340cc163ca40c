mod common;

use std::sync::Arc;
use std::thread;

use common::workload::{Workload, WorkloadSpec, run_hit_rate};
use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lfukit::builder::{CacheBuilder, CachePolicy};
use lfukit::policy::lfu::LfuCache;
use lfukit::traits::CacheService;

const CAPACITY: usize = 1024;

fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_some() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

fn policies() -> Vec<CachePolicy> {
    vec![
        CachePolicy::Lfu,
        #[cfg(feature = "lru")]
        CachePolicy::Lru,
    ]
}

fn service(policy: CachePolicy, capacity: usize) -> Arc<dyn CacheService<u64, u64> + Send + Sync> {
    match CacheBuilder::new().capacity(capacity).try_build(policy) {
        Ok(service) => service,
        Err(err) => panic!("bench configuration rejected: {err}"),
    }
}

fn bench_lfu_engine_put_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_engine");
    let ops_per_iter = CAPACITY as u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));
    group.bench_function("put_get", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..CAPACITY as u64 {
                    cache.put(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_engine_get_hotset(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_engine");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("get_hotset", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(4096);
                for i in 0..4096u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lfu_engine_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_engine");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("eviction_churn", |b| {
        b.iter_batched(
            || {
                let mut cache = LfuCache::new(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    cache.put(i, i);
                }
                cache
            },
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.put(std::hint::black_box(10_000 + i), i));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_service_hit_rate(c: &mut Criterion) {
    let workloads = [
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        ("scan", Workload::Scan),
        ("zipfian_0.99", Workload::Zipfian { theta: 0.99 }),
    ];

    let mut group = c.benchmark_group("service_hit_rate");
    group.throughput(Throughput::Elements(8192));
    for policy in policies() {
        for (name, workload) in workloads {
            let spec = WorkloadSpec {
                universe: 16_384,
                workload,
                seed: 42,
            };

            let probe = service(policy, CAPACITY);
            let hit_rate = run_hit_rate(probe.as_ref(), &mut spec.generator(), 8192);
            tracing::info!(policy = probe.name(), workload = name, hit_rate, "hit rate");

            let id = BenchmarkId::new(format!("{policy:?}").to_lowercase(), name);
            group.bench_function(id, |b| {
                b.iter_batched(
                    || (service(policy, CAPACITY), spec.generator()),
                    |(cache, mut generator)| {
                        std::hint::black_box(run_hit_rate(cache.as_ref(), &mut generator, 8192))
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_service_contention(c: &mut Criterion) {
    let threads = thread::available_parallelism().map_or(4, |n| n.get()).min(8);
    let ops_per_thread = 2048u64;

    let mut group = c.benchmark_group("service_contention");
    group.throughput(Throughput::Elements(threads as u64 * ops_per_thread));
    for policy in policies() {
        let id = BenchmarkId::new(format!("{policy:?}").to_lowercase(), threads);
        group.bench_function(id, |b| {
            b.iter_batched(
                || service(policy, CAPACITY),
                |cache| {
                    let handles: Vec<_> = (0..threads as u64)
                        .map(|t| {
                            let cache = Arc::clone(&cache);
                            thread::spawn(move || {
                                let mut generator = WorkloadSpec {
                                    universe: 8192,
                                    workload: Workload::Zipfian { theta: 0.99 },
                                    seed: t + 1,
                                }
                                .generator();
                                for _ in 0..ops_per_thread {
                                    let key = generator.next_key();
                                    if cache.get(&key).is_none() {
                                        cache.put(key, key);
                                    }
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        let _ = handle.join();
                    }
                },
                BatchSize::PerIteration,
            )
        });
    }
    group.finish();
}

fn configured() -> Criterion {
    init_tracing();
    Criterion::default()
}

criterion_group! {
    name = benches;
    config = configured();
    targets =
        bench_lfu_engine_put_get,
        bench_lfu_engine_get_hotset,
        bench_lfu_engine_eviction_churn,
        bench_service_hit_rate,
        bench_service_contention
}
criterion_main!(benches);
