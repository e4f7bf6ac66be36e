//! Operator-facing output
//!
//! Progress during a run is reported through log lines; this module holds
//! the aggregate counters printed at the end and the store summary behind
//! `--stats`.

mod stats;

pub use stats::{load_statistics, print_run_summary, print_statistics, RunStats, StoreStatistics};
