//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the cardex database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per scraped card, keyed by detail-page URL
CREATE TABLE IF NOT EXISTS cards (
    url TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    tier TEXT,
    series TEXT,
    media TEXT NOT NULL,
    maker TEXT,
    is_event INTEGER NOT NULL DEFAULT 0,
    event TEXT,
    first_seen_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_cards_tier ON cards(tier);
CREATE INDEX IF NOT EXISTS idx_cards_event ON cards(event);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
