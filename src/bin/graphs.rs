use anyhow::Result;
use orderbench::tracing::{get_subscriber, init_subscriber};
use orderbench::{plot, report, ResultSet};

const RESULTS_PATH: &str = "benchmark_results.csv";
const FIGURE_PATH: &str = "benchmark_results.png";

fn main() -> Result<()> {
    let subscriber = get_subscriber("graphs", "info");
    init_subscriber(subscriber);

    let results = ResultSet::from_path(RESULTS_PATH)?;
    plot::render_charts(&results, FIGURE_PATH)?;
    println!("Graph saved as {FIGURE_PATH}");

    let summaries = report::summarize(&results);
    print!("\n{}", report::render_summary(&summaries));
    Ok(())
}
