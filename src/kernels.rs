//! Order-book processing kernels.
//!
//! Each kernel has a rayon-parallel implementation and a sequential reference
//! (`*_seq`) that produce identical results. The parallel versions run on
//! whatever rayon pool is installed, so a caller can pin the thread count by
//! wrapping the call in `ThreadPool::install`.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::orderbook::{Order, Side};

/// Total traded amount: Σ quantity × value over every order in the book.
pub fn total_amount_traded(book: &[u64]) -> i64 {
    book.par_iter()
        .map(|&packet| {
            let order = Order::decode(packet);
            i64::from(order.quantity) * i64::from(order.value)
        })
        .sum()
}

pub fn total_amount_traded_seq(book: &[u64]) -> i64 {
    book.iter()
        .map(|&packet| {
            let order = Order::decode(packet);
            i64::from(order.quantity) * i64::from(order.value)
        })
        .sum()
}

/// Per-stock aggregate over the full book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockStats {
    pub stock_id: u32,
    pub min_sell: Option<u8>,
    pub max_buy: Option<u8>,
    pub total_value: i64,
    pub order_count: u64,
}

impl StockStats {
    fn new(stock_id: u32) -> Self {
        Self { stock_id, min_sell: None, max_buy: None, total_value: 0, order_count: 0 }
    }

    fn apply(&mut self, order: &Order) {
        match order.side {
            Side::Sell => {
                self.min_sell = Some(self.min_sell.map_or(order.value, |min| min.min(order.value)));
            },
            Side::Buy => {
                self.max_buy = Some(self.max_buy.map_or(order.value, |max| max.max(order.value)));
            },
        }
        self.total_value += i64::from(order.value);
        self.order_count += 1;
    }

    fn merge(&mut self, other: &Self) {
        self.min_sell = match (self.min_sell, other.min_sell) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_buy = match (self.max_buy, other.max_buy) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.total_value += other.total_value;
        self.order_count += other.order_count;
    }

    /// Mean order value across buys and sells.
    pub fn mean_value(&self) -> f64 {
        if self.order_count == 0 {
            0.
        } else {
            self.total_value as f64 / self.order_count as f64
        }
    }
}

/// Per-stock min sell value, max buy value and order totals, sorted by stock id.
///
/// Parallel fold into per-worker maps, then pairwise merge.
pub fn order_stats(book: &[u64]) -> Vec<StockStats> {
    let merged = book
        .par_iter()
        .fold(BTreeMap::new, |mut acc: BTreeMap<u32, StockStats>, &packet| {
            let order = Order::decode(packet);
            acc.entry(order.stock_id)
                .or_insert_with(|| StockStats::new(order.stock_id))
                .apply(&order);
            acc
        })
        .reduce(BTreeMap::new, |mut lhs, rhs| {
            for (stock_id, stats) in rhs {
                match lhs.entry(stock_id) {
                    std::collections::btree_map::Entry::Occupied(mut entry) => entry.get_mut().merge(&stats),
                    std::collections::btree_map::Entry::Vacant(entry) => {
                        entry.insert(stats);
                    },
                }
            }
            lhs
        });

    merged.into_values().collect()
}

pub fn order_stats_seq(book: &[u64]) -> Vec<StockStats> {
    let mut stats: BTreeMap<u32, StockStats> = BTreeMap::new();
    for &packet in book {
        let order = Order::decode(packet);
        stats
            .entry(order.stock_id)
            .or_insert_with(|| StockStats::new(order.stock_id))
            .apply(&order);
    }
    stats.into_values().collect()
}

/// One stock's quote state inside a market snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub stock_id: u32,
    pub last_sell: u8,
    pub last_buy: u8,
    pub spread: u8,
}

#[derive(Debug, Copy, Clone, Default)]
struct QuoteState {
    last_buy: u8,
    last_sell: u8,
}

/// Replay the book, snapshotting quote state every `freq` orders, plus a
/// trailing snapshot when the book length is not a multiple of `freq`.
///
/// Snapshot count is `ceil(book.len() / freq)`. Entries are sorted by
/// descending spread, then descending stock id. Snapshot sorting is
/// parallelized across snapshots; the replay itself is order-dependent and
/// stays sequential.
pub fn market_snapshots(book: &[u64], freq: usize) -> Vec<Vec<SnapshotEntry>> {
    let mut snapshots = collect_snapshots(book, freq);
    snapshots.par_iter_mut().for_each(|snapshot| sort_snapshot(snapshot));
    snapshots
}

pub fn market_snapshots_seq(book: &[u64], freq: usize) -> Vec<Vec<SnapshotEntry>> {
    let mut snapshots = collect_snapshots(book, freq);
    snapshots.iter_mut().for_each(|snapshot| sort_snapshot(snapshot));
    snapshots
}

fn collect_snapshots(book: &[u64], freq: usize) -> Vec<Vec<SnapshotEntry>> {
    if book.is_empty() || freq == 0 {
        return Vec::new();
    }

    let mut states: BTreeMap<u32, QuoteState> = BTreeMap::new();
    let mut snapshots = Vec::with_capacity(book.len().div_ceil(freq));

    for (idx, &packet) in book.iter().enumerate() {
        let order = Order::decode(packet);
        let state = states.entry(order.stock_id).or_default();
        match order.side {
            Side::Buy => state.last_buy = order.value,
            Side::Sell => state.last_sell = order.value,
        }

        let at_boundary = (idx + 1) % freq == 0;
        let at_end = idx + 1 == book.len();
        if at_boundary || at_end {
            let snapshot = states
                .iter()
                .map(|(&stock_id, state)| SnapshotEntry {
                    stock_id,
                    last_sell: state.last_sell,
                    last_buy: state.last_buy,
                    spread: state.last_sell.abs_diff(state.last_buy),
                })
                .collect();
            snapshots.push(snapshot);
        }
    }

    snapshots
}

fn sort_snapshot(snapshot: &mut [SnapshotEntry]) {
    snapshot.sort_by(|a, b| b.spread.cmp(&a.spread).then(b.stock_id.cmp(&a.stock_id)));
}
