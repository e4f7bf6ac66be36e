//! Crawl orchestration - main traversal loop
//!
//! This module drives the whole run:
//! - Seeding the dedup ledger from the store
//! - Walking each configured target's pages in order
//! - Collecting detail links per index page and filtering the ledger
//! - Wrapping each detail visit in the retry controller
//! - Enforcing the inter-record and inter-page delays
//! - Aggregating run statistics
//!
//! Failure scope is deliberately small: an index page that cannot be
//! fetched or parsed costs that page, a detail page that exhausts its
//! retries costs that record, and nothing short of startup aborts the run.

use crate::config::Config;
use crate::crawler::extractor::{extract_card, RecordKind};
use crate::crawler::fetcher::{fetch_document, WaitFor, DETAIL_READY_SELECTOR};
use crate::crawler::links::collect_detail_links;
use crate::crawler::retry::{with_retries, RetryOutcome};
use crate::crawler::targets::CrawlTarget;
use crate::output::RunStats;
use crate::state::Ledger;
use crate::storage::{SqliteStore, Storage};
use crate::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

/// Main orchestrator structure
pub struct Orchestrator {
    config: Config,
    storage: Arc<Mutex<SqliteStore>>,
    ledger: Ledger,
    stats: RunStats,
}

impl Orchestrator {
    /// Creates a new orchestrator, seeding the dedup ledger from the store
    ///
    /// # Arguments
    ///
    /// * `config` - The validated scraper configuration
    /// * `storage` - The opened record store
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run
    /// * `Err(CardexError)` - The existing-URL projection failed
    pub fn new(config: Config, storage: SqliteStore) -> Result<Self> {
        let existing = storage.all_urls()?;
        tracing::info!("loaded {} existing cards from the store", existing.len());

        let ledger = Ledger::from_urls(existing);
        let stats = RunStats::new(ledger.len() as u64);

        Ok(Self {
            config,
            storage: Arc::new(Mutex::new(storage)),
            ledger,
            stats,
        })
    }

    /// Runs the full traversal and returns the aggregated statistics
    pub async fn run(&mut self) -> Result<RunStats> {
        let targets = CrawlTarget::from_config(&self.config);
        let start_time = std::time::Instant::now();

        for target in &targets {
            self.crawl_target(target).await;
        }

        tracing::info!(
            "run complete: {} new cards in {:?}",
            self.stats.new_records,
            start_time.elapsed()
        );

        Ok(self.stats.clone())
    }

    /// Walks one target's page span in ascending order
    async fn crawl_target(&mut self, target: &CrawlTarget) {
        let pages = target.pages();
        tracing::info!(
            "starting {} (pages {}..={})",
            target.describe(),
            pages.start(),
            pages.end()
        );

        let kind = target.record_kind();

        for page in pages {
            if let Err(e) = self.crawl_index_page(target, &kind, page).await {
                self.stats.failed_pages += 1;
                tracing::warn!("failed index page {} of {}: {}", page, target.describe(), e);
            }

            // Inter-page throttle, applied whatever the outcome was
            sleep(Duration::from_millis(self.config.crawler.page_delay_ms)).await;
        }
    }

    /// Fetches one index page and visits its unseen detail links
    async fn crawl_index_page(
        &mut self,
        target: &CrawlTarget,
        kind: &RecordKind,
        page: u32,
    ) -> Result<()> {
        let index_url = target.index_url(&self.config.site.origin, page);
        tracing::info!("scraping index: {}", index_url);

        let html = fetch_document(&self.config.crawler, &index_url, WaitFor::Navigation).await?;
        self.stats.pages_visited += 1;

        let links = collect_detail_links(&html, &self.config.site.origin, target.link_prefix());
        tracing::debug!("{} detail links on {}", links.len(), index_url);

        for link in links {
            if self.ledger.contains(&link) {
                continue;
            }

            self.visit_detail(&link, kind).await;

            // Inter-record throttle, success or not
            sleep(Duration::from_millis(self.config.crawler.record_delay_ms)).await;
        }

        Ok(())
    }

    /// One retry-wrapped detail visit: fetch, extract, persist
    ///
    /// The upsert runs inside the retried attempt so a store-write failure
    /// gets a fresh attempt like any other transient fault. The ledger is
    /// only touched after the whole attempt has succeeded, so a failed
    /// write can never mark a URL as done.
    async fn visit_detail(&mut self, url: &str, kind: &RecordKind) {
        let crawler = self.config.crawler.clone();
        let storage = Arc::clone(&self.storage);
        let kind = kind.clone();
        let owned_url = url.to_string();
        let max_attempts = crawler.max_attempts;

        let outcome = with_retries(url, max_attempts, move |attempt| {
            let crawler = crawler.clone();
            let storage = Arc::clone(&storage);
            let kind = kind.clone();
            let url = owned_url.clone();

            async move {
                tracing::debug!("visiting {} (attempt {})", url, attempt);

                // Fresh session per attempt; fetch_document closes it
                // before returning.
                let html =
                    fetch_document(&crawler, &url, WaitFor::Selector(DETAIL_READY_SELECTOR))
                        .await?;

                let card = match extract_card(&html, &url, &kind) {
                    Some(card) => card,
                    None => return Ok(None),
                };

                storage.lock().unwrap().upsert_card(&card)?;
                Ok(Some(card))
            }
        })
        .await;

        match outcome {
            RetryOutcome::Success(card) => {
                tracing::info!("scraped card: {}", card.name);
                self.ledger.add(card.url);
                self.stats.new_records += 1;
            }
            RetryOutcome::Invalid => {
                self.stats.invalid_records += 1;
            }
            RetryOutcome::Exhausted => {
                self.stats.failed_records += 1;
            }
        }
    }
}

/// Runs the main crawl operation
///
/// Opens the store at the configured path, seeds the ledger, and drives
/// the orchestrator through every configured target once.
///
/// # Arguments
///
/// * `config` - The validated scraper configuration
///
/// # Returns
///
/// * `Ok(RunStats)` - Crawl finished; statistics for the operator
/// * `Err(CardexError)` - Startup failed before traversal began
pub async fn run_crawl(config: Config) -> Result<RunStats> {
    let storage = crate::storage::open_storage(std::path::Path::new(&config.output.database_path))?;
    let mut orchestrator = Orchestrator::new(config, storage)?;
    orchestrator.run().await
}
