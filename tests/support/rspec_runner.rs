//! Runs rspec suites one example at a time and fails the test on any failure.

use rspec::report::Report;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Runs an rspec suite serially; the shared `App` is not safe to tick from
/// several threads.
///
/// # Panics
///
/// Panics when any example in the suite fails, so `cargo test` reports it.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let report = Runner::new(config, vec![logger]).run(suite);
    assert!(
        report.is_success(),
        "{} of {} examples failed",
        report.get_failed(),
        report.get_passed() + report.get_failed()
    );
}
