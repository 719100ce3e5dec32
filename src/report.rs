//! Best-observed-speedup summary over a results table.

use std::fmt::Write;

use crate::results::{Measurement, ResultSet};

/// Best observed run for one function: the speedup at its largest input size
/// and, within that size, the largest thread count.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSummary {
    pub function: String,
    pub speedup: f64,
    pub threads: u32,
}

/// Summarize every function in first-seen order.
///
/// A function whose max-size/max-threads subset resolves to no rows is skipped
/// with a warning. The loader cannot produce such a table, since groups derive
/// from the same rows, but the behavior is defined rather than left to panic.
pub fn summarize(results: &ResultSet) -> Vec<FunctionSummary> {
    let mut summaries = Vec::new();
    for function in results.functions() {
        match best_run(results, function) {
            Some(row) => summaries.push(FunctionSummary {
                function: function.to_string(),
                speedup: row.speedup,
                threads: row.threads,
            }),
            None => {
                tracing::warn!(%function, "no rows at the function's maximum size; skipped in summary.")
            },
        }
    }
    summaries
}

fn best_run<'r>(results: &'r ResultSet, function: &str) -> Option<&'r Measurement> {
    let rows = results.rows_for_function(function);
    let max_size = rows.iter().map(|row| row.size).max()?;

    let at_max_size: Vec<&Measurement> = rows.into_iter().filter(|row| row.size == max_size).collect();
    let max_threads = at_max_size.iter().map(|row| row.threads).max()?;

    // first matching row wins ties, mirroring file order
    at_max_size.into_iter().find(|row| row.threads == max_threads)
}

/// Render the summary block exactly as it is printed to the console.
pub fn render_summary(summaries: &[FunctionSummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Performance Summary ===");
    for summary in summaries {
        let _ = writeln!(
            out,
            "{}: {:.2}x speedup with {} threads",
            summary.function, summary.speedup, summary.threads
        );
    }
    out
}
