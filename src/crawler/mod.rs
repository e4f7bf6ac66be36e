//! Crawler module for index traversal and card extraction
//!
//! This module contains the core scraping logic, including:
//! - Crawl targets and their index-URL templates
//! - Rendered-document fetching through a disposable browser session
//! - Detail-link collection and field extraction
//! - Bounded retry with session restart
//! - Overall run orchestration

mod extractor;
mod fetcher;
mod links;
mod orchestrator;
mod retry;
mod targets;

pub use extractor::{extract_card, RecordKind};
pub use fetcher::{fetch_document, RenderSession, WaitFor, DETAIL_READY_SELECTOR};
pub use links::collect_detail_links;
pub use orchestrator::{run_crawl, Orchestrator};
pub use retry::{with_retries, RetryOutcome};
pub use targets::{CrawlTarget, CARD_LINK_PREFIX, EVENT_LINK_PREFIX};

use crate::config::Config;
use crate::output::RunStats;
use crate::Result;

/// Runs a complete scrape operation
///
/// This is the main entry point for starting a run. It will:
/// 1. Open the record store
/// 2. Seed the dedup ledger from stored URLs
/// 3. Walk every configured target's index pages
/// 4. Visit, extract, and persist unseen detail pages
/// 5. Return the run statistics
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(RunStats)` - Run completed
/// * `Err(CardexError)` - Startup failed
pub async fn crawl(config: Config) -> Result<RunStats> {
    run_crawl(config).await
}
