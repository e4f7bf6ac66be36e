//! Configuration loading and validation
//!
//! Cardex is configured through a TOML file naming the target site, the
//! crawl targets (tiers and events with their page spans), delays and
//! retry bounds, the keep-alive port, and the database path.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    Config, CrawlerConfig, EventEntry, OutputConfig, ServerConfig, SiteConfig, TierEntry,
};
pub use validation::validate;
