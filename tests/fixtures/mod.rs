use orderbench::tracing::{get_subscriber, init_subscriber};
use orderbench::Measurement;

#[allow(dead_code)]
pub fn init_tracing<S: AsRef<str>>(name: S) {
    let subscriber = get_subscriber(name.as_ref(), "warn");
    init_subscriber(subscriber);
}

#[allow(dead_code)]
pub fn measurement(function: &str, size: u64, threads: u32, time_ms: f64, speedup: f64) -> Measurement {
    Measurement { function: function.to_string(), size, threads, time_ms, speedup }
}
