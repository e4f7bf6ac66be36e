//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::CardRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This trait defines all database operations needed by the scraper. The
/// key space is the detail-page URL: `upsert_card` has insert-or-replace
/// semantics on it, and `all_urls` projects it in full to seed the dedup
/// ledger at run start.
pub trait Storage {
    /// Returns every stored card URL
    ///
    /// Queried once per run, before any page is visited.
    fn all_urls(&self) -> StorageResult<Vec<String>>;

    /// Inserts or replaces a card, keyed on its URL
    ///
    /// Re-upserting an existing URL overwrites its fields; it never
    /// produces a second row.
    fn upsert_card(&mut self, card: &CardRecord) -> StorageResult<()>;

    /// Gets a card by URL
    fn get_card(&self, url: &str) -> StorageResult<Option<CardRecord>>;

    /// Gets total card count
    fn count_cards(&self) -> StorageResult<u64>;

    /// Gets card counts grouped by tier label, unlabelled cards excluded
    fn count_by_tier(&self) -> StorageResult<Vec<(String, u64)>>;

    /// Gets the number of event cards
    fn count_event_cards(&self) -> StorageResult<u64>;
}
