use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowfall::{
    BasicSnowflakeGenerator, DEFAULT_EPOCH, Layout, LockSnowflakeGenerator, Poll,
    SnowflakeGenerator, SystemClock, TimeSource,
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

fn fixed_time() -> FixedMockTime {
    FixedMockTime {
        millis: DEFAULT_EPOCH + 1,
    }
}

// Number of IDs generated per benchmark iteration. Matches one millisecond of
// sequence space under the default layout, so a frozen clock never exhausts.
const TOTAL_IDS: usize = Layout::DEFAULT.max_sequence() as usize + 1;

/// Benchmarks a hot-path generator where polls are always `Ready`.
fn bench_generator<G, T>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: SnowflakeGenerator<T>,
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    match generator.try_poll_id() {
                        Ok(Poll::Ready { id }) => {
                            black_box(id);
                        }
                        Ok(Poll::Pending { .. }) | Err(_) => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks generators on the wall clock, spinning through exhausted
/// milliseconds.
fn bench_generator_wallclock<G>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: SnowflakeGenerator<SystemClock>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        let generator = generator_factory();
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks one generator shared across threads with a frozen clock.
fn bench_generator_contended<G, T>(
    c: &mut Criterion,
    group_name: &str,
    generator_fn: impl Fn() -> G,
) where
    G: SnowflakeGenerator<T> + Send + Sync,
    T: TimeSource,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
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
                                        black_box(generator.next_id().unwrap());
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mock_sequential(c: &mut Criterion) {
    bench_generator(c, "mono/sequential/basic", || {
        BasicSnowflakeGenerator::new(0, 0, DEFAULT_EPOCH, fixed_time()).unwrap()
    });
    bench_generator(c, "mono/sequential/lock", || {
        LockSnowflakeGenerator::new(0, 0, DEFAULT_EPOCH, fixed_time()).unwrap()
    });
}

fn benchmark_wallclock_sequential(c: &mut Criterion) {
    bench_generator_wallclock(c, "wall/sequential/basic", || {
        BasicSnowflakeGenerator::new(0, 0, DEFAULT_EPOCH, SystemClock).unwrap()
    });
    bench_generator_wallclock(c, "wall/sequential/lock", || {
        LockSnowflakeGenerator::new(0, 0, DEFAULT_EPOCH, SystemClock).unwrap()
    });
}

fn benchmark_mock_contended(c: &mut Criterion) {
    bench_generator_contended(c, "mono/contended/lock", || {
        LockSnowflakeGenerator::new(0, 0, DEFAULT_EPOCH, fixed_time()).unwrap()
    });
}

criterion_group!(
    benches,
    benchmark_mock_sequential,
    benchmark_wallclock_sequential,
    benchmark_mock_contended,
);
criterion_main!(benches);
