use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowgen::{
    Base62Codec, DEFAULT_EPOCH, GeneratorConfig, IdGenStatus, IdGenerator, MonotonicClock,
    SystemClock, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Hot path: the clock never moves and the sequence never runs out.
fn bench_poll_fixed_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("poll/fixed");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = IdGenerator::with_config(
                    0,
                    0,
                    GeneratorConfig::default(),
                    FixedMockTime {
                        millis: DEFAULT_EPOCH.as_millis() as u64 + 1,
                    },
                )
                .unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.poll_id().unwrap() {
                        IdGenStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdGenStatus::Pending { .. } => unreachable!(),
                    }
                }
            }
            start.elapsed()
        });
    });

    group.finish();
}

/// Blocking generation against real clocks.
fn bench_next_id<T, F>(c: &mut Criterion, group_name: &str, clock_factory: F)
where
    T: TimeSource,
    F: Fn() -> T,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let generator =
            IdGenerator::with_config(1, 1, GeneratorConfig::default(), clock_factory()).unwrap();
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id().unwrap());
            }
        });
    });

    group.finish();
}

/// Many threads contending on one generator.
fn bench_next_id_threaded(c: &mut Criterion) {
    let threads = num_cpus::get().max(2);
    let mut group = c.benchmark_group("next_id/threaded");
    group.throughput(Throughput::Elements((threads * TOTAL_IDS) as u64));

    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        let generator =
            IdGenerator::with_config(1, 1, GeneratorConfig::default(), MonotonicClock::new())
                .unwrap();
        b.iter_custom(|iters| {
            let barrier = Arc::new(Barrier::new(threads + 1));
            let mut start = Instant::now();
            scope(|s| {
                for _ in 0..threads {
                    let barrier = Arc::clone(&barrier);
                    let generator = &generator;
                    s.spawn(move || {
                        barrier.wait();
                        for _ in 0..iters {
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id().unwrap());
                            }
                        }
                    });
                }
                barrier.wait();
                start = Instant::now();
            });
            start.elapsed()
        });
    });

    group.finish();
}

fn bench_base62(c: &mut Criterion) {
    let mut group = c.benchmark_group("base62");
    group.throughput(Throughput::Elements(1));

    let value = 0x0123_4567_89AB_CDEF_u64;
    let encoded = Base62Codec::encode(value);

    group.bench_function("encode", |b| {
        b.iter(|| black_box(Base62Codec::encode(black_box(value))));
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(Base62Codec::decode(black_box(&encoded))));
    });
    group.bench_function("decode_strict", |b| {
        b.iter(|| black_box(Base62Codec::decode_strict(black_box(&encoded))));
    });

    group.finish();
}

fn benches(c: &mut Criterion) {
    bench_poll_fixed_time(c);
    bench_next_id(c, "next_id/system_clock", || SystemClock);
    bench_next_id(c, "next_id/monotonic_clock", MonotonicClock::new);
    bench_next_id_threaded(c);
    bench_base62(c);
}

criterion_group!(group, benches);
criterion_main!(group);
