use criterion::{black_box, criterion_group, Criterion};
use orderbench::kernels;
use orderbench::orderbook::generate_order_book;

const BOOK_LEN: usize = 10_000;
const SEED: u64 = 42;

fn bench_total_amount_traded(c: &mut Criterion) {
    let book = generate_order_book(BOOK_LEN, SEED);

    let mut group = c.benchmark_group("total_amount_traded");
    group.bench_function("sequential", |b| {
        b.iter(|| kernels::total_amount_traded_seq(black_box(&book)))
    });
    group.bench_function("parallel", |b| b.iter(|| kernels::total_amount_traded(black_box(&book))));
    group.finish();
}

fn bench_order_stats(c: &mut Criterion) {
    let book = generate_order_book(BOOK_LEN, SEED);

    let mut group = c.benchmark_group("order_stats");
    group.bench_function("sequential", |b| b.iter(|| kernels::order_stats_seq(black_box(&book))));
    group.bench_function("parallel", |b| b.iter(|| kernels::order_stats(black_box(&book))));
    group.finish();
}

fn bench_market_snapshots(c: &mut Criterion) {
    let book = generate_order_book(BOOK_LEN, SEED);
    let freq = BOOK_LEN / 10;

    let mut group = c.benchmark_group("market_snapshots");
    group.bench_function("sequential", |b| {
        b.iter(|| kernels::market_snapshots_seq(black_box(&book), freq))
    });
    group.bench_function("parallel", |b| {
        b.iter(|| kernels::market_snapshots(black_box(&book), freq))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_total_amount_traded,
    bench_order_stats,
    bench_market_snapshots
);
