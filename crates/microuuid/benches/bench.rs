use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use microuuid::{
    Generator, Identifier, MicroGenerator, MicroId, NanoGenerator, NanoId, StandardGenerator,
    StandardId, ThreadRandom, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

struct FixedMockTime {
    at: SystemTime,
}

impl Default for FixedMockTime {
    fn default() -> Self {
        Self {
            at: UNIX_EPOCH + Duration::from_micros(1_700_000_000_123_456),
        }
    }
}

impl TimeSource for FixedMockTime {
    fn now(&self) -> SystemTime {
        self.at
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks a single generator on one thread.
fn bench_generator<ID, G>(c: &mut Criterion, group_name: &str, generator_fn: impl Fn() -> G)
where
    G: Generator<ID>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_fn();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.generate());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared by several threads.
fn bench_generator_contended<ID, G>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> G,
) where
    G: Generator<ID> + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(format!("elems/{TOTAL_IDS}/threads/{thread_count}"), |b| {
            b.iter_custom(|iters| {
                let start = Instant::now();

                for _ in 0..iters {
                    let generator = Arc::new(generator_fn());
                    let barrier = Arc::new(Barrier::new(thread_count + 1));
                    scope(|s| {
                        for _ in 0..thread_count {
                            let generator = Arc::clone(&generator);
                            let barrier = Arc::clone(&barrier);
                            s.spawn(move || {
                                barrier.wait();
                                for _ in 0..ids_per_thread {
                                    black_box(generator.generate());
                                }
                            });
                        }
                        barrier.wait();
                    });
                }

                start.elapsed()
            });
        });
    }

    group.finish();
}

/// Benchmarks strict text decoding of pre-rendered identifiers.
fn bench_decode<ID: Identifier>(c: &mut Criterion, group_name: &str, ids: &[ID]) {
    let texts: Vec<String> = ids.iter().map(Identifier::encode).collect();
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(texts.len() as u64));

    group.bench_function(format!("elems/{}", texts.len()), |b| {
        b.iter(|| {
            for text in &texts {
                black_box(ID::decode(black_box(text))).ok();
            }
        });
    });

    group.finish();
}

fn micro_generator() -> MicroGenerator<FixedMockTime> {
    let generator = MicroGenerator::with_time(FixedMockTime::default());
    generator.set_server_id(1);
    generator
}

fn standard_generator() -> StandardGenerator<FixedMockTime, ThreadRandom> {
    let generator = StandardGenerator::with_sources(FixedMockTime::default(), ThreadRandom);
    generator.set_node(0x0242_ac11_0002);
    generator
}

fn benchmark_mock_sequential_micro(c: &mut Criterion) {
    bench_generator::<MicroId, _>(c, "mock/sequential/micro", micro_generator);
}

fn benchmark_mock_sequential_nano(c: &mut Criterion) {
    bench_generator::<NanoId, _>(c, "mock/sequential/nano", || {
        NanoGenerator::with_time(FixedMockTime::default())
    });
}

fn benchmark_mock_sequential_uuid1(c: &mut Criterion) {
    bench_generator::<StandardId, _>(c, "mock/sequential/uuid1", standard_generator);
}

fn benchmark_sequential_uuid4(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential/uuid4");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let generator = StandardGenerator::new();
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.v4());
            }
        });
    });
    group.finish();
}

fn benchmark_mock_contended_micro(c: &mut Criterion) {
    bench_generator_contended::<MicroId, _>(c, "mock/contended/micro", micro_generator);
}

fn benchmark_mock_contended_uuid1(c: &mut Criterion) {
    bench_generator_contended::<StandardId, _>(c, "mock/contended/uuid1", standard_generator);
}

fn benchmark_decode_micro(c: &mut Criterion) {
    let generator = micro_generator();
    let ids: Vec<_> = (0..TOTAL_IDS).map(|_| generator.generate()).collect();
    bench_decode(c, "decode/micro", &ids);
}

fn benchmark_decode_uuid(c: &mut Criterion) {
    let generator = standard_generator();
    let ids: Vec<_> = (0..TOTAL_IDS).map(|_| generator.v4()).collect();
    bench_decode(c, "decode/uuid", &ids);
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_micro,
    benchmark_mock_sequential_nano,
    benchmark_mock_sequential_uuid1,
    benchmark_sequential_uuid4,
    benchmark_mock_contended_micro,
    benchmark_mock_contended_uuid1,
    // Codec
    benchmark_decode_micro,
    benchmark_decode_uuid,
);
criterion_main!(benches);
