//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageResult};
use crate::storage::CardRecord;
use crate::CardexError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(CardexError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, CardexError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        // Initialize schema
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, CardexError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<CardRecord> {
        Ok(CardRecord {
            url: row.get(0)?,
            name: row.get(1)?,
            tier: row.get(2)?,
            series: row.get(3)?,
            media: row.get(4)?,
            maker: row.get(5)?,
            is_event: row.get::<_, i64>(6)? != 0,
            event: row.get(7)?,
        })
    }
}

impl Storage for SqliteStore {
    fn all_urls(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT url FROM cards")?;
        let urls = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(urls)
    }

    fn upsert_card(&mut self, card: &CardRecord) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        // first_seen_at survives re-scrapes; every other field takes the
        // latest extracted value.
        self.conn.execute(
            "INSERT INTO cards (url, name, tier, series, media, maker, is_event, event, first_seen_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             ON CONFLICT(url) DO UPDATE SET
                 name = excluded.name,
                 tier = excluded.tier,
                 series = excluded.series,
                 media = excluded.media,
                 maker = excluded.maker,
                 is_event = excluded.is_event,
                 event = excluded.event,
                 updated_at = excluded.updated_at",
            params![
                card.url,
                card.name,
                card.tier,
                card.series,
                card.media,
                card.maker,
                card.is_event as i64,
                card.event,
                now,
            ],
        )?;
        Ok(())
    }

    fn get_card(&self, url: &str) -> StorageResult<Option<CardRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT url, name, tier, series, media, maker, is_event, event
             FROM cards WHERE url = ?1",
        )?;

        let card = stmt
            .query_row(params![url], Self::row_to_record)
            .optional()?;

        Ok(card)
    }

    fn count_cards(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_by_tier(&self) -> StorageResult<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT tier, COUNT(*) FROM cards WHERE tier IS NOT NULL
             GROUP BY tier ORDER BY tier",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn count_event_cards(&self) -> StorageResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cards WHERE is_event = 1", [], |row| {
                    row.get(0)
                })?;
        Ok(count as u64)
    }
}
