//! Storage module for persisting scraped cards
//!
//! This module handles all database operations for the scraper, including:
//! - SQLite database initialization and schema management
//! - Keyed-by-URL upsert of card records
//! - The full-key projection used to seed the dedup ledger
//! - Statistics queries for the `--stats` mode

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{Storage, StorageError, StorageResult};

use crate::CardexError;
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized storage
/// * `Err(CardexError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStore, CardexError> {
    SqliteStore::new(path)
}

/// One scraped card, the unit of extraction and persistence
///
/// A record reaches the store only when both `name` and `media` are
/// non-empty; the extractor drops anything else before it gets here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Detail-page URL, the unique key
    pub url: String,
    /// Card name from the last breadcrumb entry
    pub name: String,
    /// Tier label, when the breadcrumb carries one
    pub tier: Option<String>,
    /// Series name, when the breadcrumb carries one
    pub series: Option<String>,
    /// Image or video source for the card art
    pub media: String,
    /// Card maker, label prefix stripped
    pub maker: Option<String>,
    /// True only for cards scraped from an event target
    pub is_event: bool,
    /// Event identifier, present only for event cards
    pub event: Option<String>,
}
