//! Throughput Benchmark for mockkv
//!
//! Measures the cost of the command layer, canonicalization included, for
//! the workloads a test suite typically puts on the mock.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mockkv::{MockRedis, StoreConfig, Value};
use std::sync::Arc;
use std::time::Duration;

/// Benchmark SET with values of different shapes
fn bench_set(c: &mut Criterion) {
    let redis = MockRedis::new();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_text", |b| {
        let mut i = 0u64;
        b.iter(|| {
            redis.set(&format!("key:{}", i), "small_value");
            i += 1;
        });
    });

    group.bench_function("set_int", |b| {
        let mut i = 0u64;
        b.iter(|| {
            redis.set(&format!("key:{}", i), 42);
            i += 1;
        });
    });

    group.bench_function("set_nested", |b| {
        let value = Value::map([
            ("ids", Value::seq([1, 2, 3])),
            ("name", Value::from("it's \"quoted\"")),
            ("active", Value::from(true)),
        ]);
        let mut i = 0u64;
        b.iter(|| {
            redis.set(&format!("key:{}", i), value.clone());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark GET operations
fn bench_get(c: &mut Criterion) {
    let redis = MockRedis::new();

    for i in 0..100_000 {
        redis.set(&format!("key:{}", i), format!("value:{}", i));
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(redis.get(&format!("key:{}", i % 100_000)).ok());
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(redis.get(&format!("missing:{}", i)).ok());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark INCR and HINCRBY
fn bench_counters(c: &mut Criterion) {
    let redis = MockRedis::new();

    let mut group = c.benchmark_group("counters");
    group.throughput(Throughput::Elements(1));

    group.bench_function("incr_single", |b| {
        b.iter(|| black_box(redis.incr("counter").ok()));
    });

    group.bench_function("hincrby_fields", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(redis.hincrby("hcounter", &format!("f{}", i % 100), 1).ok());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark list pushes and range reads
fn bench_lists(c: &mut Criterion) {
    let redis = MockRedis::new();
    for i in 0..1_000 {
        redis.rpush("long", i).ok();
    }

    let mut group = c.benchmark_group("lists");
    group.throughput(Throughput::Elements(1));

    group.bench_function("rpush_lpop", |b| {
        b.iter(|| {
            redis.rpush("queue", "job").ok();
            black_box(redis.lpop("queue").ok());
        });
    });

    group.bench_function("lrange_100", |b| {
        b.iter(|| black_box(redis.lrange("long", 100, 199).ok()));
    });

    group.finish();
}

/// Benchmark hash and set writes
fn bench_collections(c: &mut Criterion) {
    let redis = MockRedis::new();

    let mut group = c.benchmark_group("collections");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hset", |b| {
        let mut i = 0u64;
        b.iter(|| {
            redis.hset("hash", &format!("field:{}", i % 1_000), i as i64).ok();
            i += 1;
        });
    });

    group.bench_function("sadd", |b| {
        let mut i = 0u64;
        b.iter(|| {
            redis.sadd("set", i as i64 % 1_000).ok();
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark concurrent access through one shared mock
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_mixed", |b| {
        b.iter(|| {
            let redis = Arc::new(MockRedis::new());
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let redis = Arc::clone(&redis);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = format!("key:{}:{}", t, i);
                            redis.set(&key, "value");
                            black_box(redis.get(&key).ok());
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().ok();
            }

            black_box(redis.dbsize());
        });
    });

    group.finish();
}

/// Benchmark TTL bookkeeping and the active sweep
fn bench_expiry(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("setex", |b| {
        let redis = MockRedis::new();
        let mut i = 0u64;
        b.iter(|| {
            redis.setex(&format!("key:{}", i), 3600, "value").ok();
            i += 1;
        });
    });

    group.bench_function("set_with_sweep", |b| {
        let redis = MockRedis::with_config(StoreConfig::default().with_sweep_every(100));
        for i in 0..10_000 {
            let key = format!("expire:{}", i);
            redis.set(&key, "value");
            redis.expire(&key, 3600);
        }

        let mut i = 0u64;
        b.iter(|| {
            redis.set(&format!("plain:{}", i % 10_000), "value");
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark KEYS pattern matching
fn bench_keys(c: &mut Criterion) {
    let redis = MockRedis::new();

    for i in 0..1_000 {
        redis.set(&format!("user:{}", i), "user_data");
        redis.set(&format!("session:{}", i), "session_data");
        redis.set(&format!("cache:{}", i), "cache_data");
    }

    let mut group = c.benchmark_group("keys");

    group.bench_function("keys_pattern", |b| {
        b.iter(|| black_box(redis.keys("user:*")));
    });

    group.bench_function("keys_all", |b| {
        b.iter(|| black_box(redis.keys("*")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_counters,
    bench_lists,
    bench_collections,
    bench_concurrent,
    bench_expiry,
    bench_keys,
);

criterion_main!(benches);
