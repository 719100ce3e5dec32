//! Benchmark sweep: runs every kernel across the thread-count and input-size
//! grid, deriving speedup from the single-thread baseline.

use std::hint::black_box;
use std::path::Path;
use std::time::Instant;

use rayon::ThreadPoolBuilder;

use crate::error::HarnessError;
use crate::kernels;
use crate::orderbook::generate_order_book;
use crate::results::{write_results, Measurement};
use crate::BenchResult;

/// Input sizes exercised by the standard sweep.
pub const SWEEP_SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

/// Thread counts exercised by the standard sweep. The first entry is the
/// speedup baseline.
pub const SWEEP_THREADS: [usize; 4] = [1, 2, 4, 8];

/// Snapshot frequency for `market_snapshots` is `size / SNAPSHOT_DIVISOR`.
pub const SNAPSHOT_DIVISOR: usize = 10;

/// Fixed seed keeps the generated books identical across runs.
pub const BOOK_SEED: u64 = 42;

/// Run the standard sweep and persist the results table to `path`.
pub fn run_standard(path: impl AsRef<Path>) -> BenchResult<Vec<Measurement>> {
    let measurements = run_sweep(&SWEEP_SIZES, &SWEEP_THREADS)?;
    write_results(path, &measurements)?;
    Ok(measurements)
}

/// Run the full kernel × thread-count grid over each input size.
///
/// One measurement per (kernel, size, thread count); rows for a kernel appear
/// in sweep thread order within a size block. Each run executes inside a
/// dedicated rayon pool pinned to the requested thread count.
pub fn run_sweep(sizes: &[usize], thread_counts: &[usize]) -> Result<Vec<Measurement>, HarnessError> {
    let mut measurements = Vec::with_capacity(sizes.len() * thread_counts.len() * 3);

    for &size in sizes {
        let sweep_span = tracing::info_span!("benchmark sweep", %size);
        let _sweep_span_guard = sweep_span.enter();

        println!("\n=== Testing with {size} orders ===");

        let book = generate_order_book(size, BOOK_SEED);
        let freq = (size / SNAPSHOT_DIVISOR).max(1);

        let kernel_runs: Vec<(&str, Box<dyn Fn(&[u64]) + Sync>)> = vec![
            ("total_amount_traded", Box::new(|book: &[u64]| {
                black_box(kernels::total_amount_traded(book));
            })),
            ("order_stats", Box::new(|book: &[u64]| {
                black_box(kernels::order_stats(book));
            })),
            ("market_snapshots", Box::new(move |book: &[u64]| {
                black_box(kernels::market_snapshots(book, freq));
            })),
        ];

        for (name, kernel) in &kernel_runs {
            let mut baseline_ms = None;

            for &threads in thread_counts {
                let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

                let start = Instant::now();
                pool.install(|| kernel(&book));
                let time_ms = start.elapsed().as_secs_f64() * 1_000.;

                let baseline = *baseline_ms.get_or_insert(time_ms);
                let speedup = baseline / time_ms.max(f64::MIN_POSITIVE);

                println!("{name} [{threads} threads]: {time_ms:.3} ms (speedup: {speedup:.2}x)");
                tracing::debug!(%name, %size, %threads, %time_ms, %speedup, "measured kernel run.");

                measurements.push(Measurement {
                    function: (*name).to_string(),
                    size: size as u64,
                    threads: threads as u32,
                    time_ms,
                    speedup,
                });
            }
        }
    }

    Ok(measurements)
}
