//! Run and store statistics
//!
//! This module provides the per-run counters the orchestrator aggregates,
//! plus the store-level summary behind the `--stats` mode. Neither is
//! persisted; both exist for the operator reading the console.

use crate::storage::Storage;
use crate::CardexError;

/// Counters scoped to one pipeline invocation
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Cards already in the store when the run started
    pub existing_at_start: u64,

    /// Index pages fetched successfully
    pub pages_visited: u64,

    /// Index pages that failed to fetch or parse
    pub failed_pages: u64,

    /// Cards persisted for the first time this run
    pub new_records: u64,

    /// Detail pages dropped by the validity gate
    pub invalid_records: u64,

    /// Detail pages that exhausted their retries
    pub failed_records: u64,
}

impl RunStats {
    /// Creates run statistics with the starting store size recorded
    pub fn new(existing_at_start: u64) -> Self {
        Self {
            existing_at_start,
            ..Self::default()
        }
    }
}

/// Prints the end-of-run summary to stdout
pub fn print_run_summary(stats: &RunStats) {
    println!("=== Run Summary ===\n");
    println!("  Cards at start:     {}", stats.existing_at_start);
    println!("  New cards:          {}", stats.new_records);
    println!("  Index pages OK:     {}", stats.pages_visited);
    println!("  Index pages failed: {}", stats.failed_pages);
    println!("  Invalid (skipped):  {}", stats.invalid_records);
    println!("  Failed records:     {}", stats.failed_records);
}

/// Store-level summary for the `--stats` mode
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Total cards stored
    pub total_cards: u64,

    /// Card counts per tier label
    pub by_tier: Vec<(String, u64)>,

    /// Number of event cards
    pub event_cards: u64,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(CardexError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn Storage) -> Result<StoreStatistics, CardexError> {
    Ok(StoreStatistics {
        total_cards: storage.count_cards()?,
        by_tier: storage.count_by_tier()?,
        event_cards: storage.count_event_cards()?,
    })
}

/// Prints store statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Card Store Statistics ===\n");
    println!("  Total cards: {}", stats.total_cards);

    if !stats.by_tier.is_empty() {
        println!("\n  Cards by tier:");
        for (tier, count) in &stats.by_tier {
            println!("    {}: {}", tier, count);
        }
    }

    println!("\n  Event cards: {}", stats.event_cards);
}
