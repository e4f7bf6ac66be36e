//! Cardex: an incremental card-catalog scraper
//!
//! This crate walks the index pages of a paginated card catalog, discovers
//! detail-page links, extracts a fixed field set from each previously-unseen
//! detail page, and upserts the result into SQLite keyed by URL.

pub mod config;
pub mod crawler;
pub mod output;
pub mod server;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for cardex operations
#[derive(Debug, Error)]
pub enum CardexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("Browser launch error: {0}")]
    BrowserLaunch(String),

    #[error("Navigation timeout for {url}")]
    Timeout { url: String },

    #[error("Element {selector} never appeared on {url}")]
    MissingElement { url: String, selector: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for cardex operations
pub type Result<T> = std::result::Result<T, CardexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlTarget, RecordKind};
pub use state::Ledger;
pub use storage::CardRecord;
