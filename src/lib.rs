pub mod error;
pub mod harness;
pub mod kernels;
pub mod orderbook;
pub mod plot;
pub mod report;
pub mod results;
pub mod tracing;

pub use results::{Measurement, ResultSet};

pub type BenchResult<T> = Result<T, error::BenchError>;
