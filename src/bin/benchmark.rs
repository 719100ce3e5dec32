use anyhow::Result;
use orderbench::harness;
use orderbench::tracing::{get_subscriber, init_subscriber};

const RESULTS_PATH: &str = "benchmark_results.csv";

fn main() -> Result<()> {
    let subscriber = get_subscriber("benchmark", "info");
    init_subscriber(subscriber);

    let measurements = harness::run_standard(RESULTS_PATH)?;

    println!("\nBenchmark complete. {} results saved to {RESULTS_PATH}", measurements.len());
    Ok(())
}
