//! Rendered-document acquisition
//!
//! The catalog renders card grids and detail content client-side, so a
//! plain HTTP GET sees an empty shell. Fetching therefore goes through a
//! headless Chrome session driven over CDP: navigate, wait until the page
//! is actually ready, read the rendered markup back as text.
//!
//! A session is deliberately short-lived. The orchestrator launches one
//! per index page and the retry controller one per attempt, so a renderer
//! crash or detached-frame fault is contained to the single fetch that
//! hit it.

use crate::config::CrawlerConfig;
use crate::{CardexError, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};

/// Element every extractable detail page must carry; used as the
/// readiness condition for detail fetches.
pub const DETAIL_READY_SELECTOR: &str = "ol.breadcrumb-new";

/// Readiness condition for one fetch
#[derive(Debug, Clone, Copy)]
pub enum WaitFor {
    /// Navigation completed; good enough for index pages
    Navigation,
    /// A named element is present in the DOM. Content can render well
    /// after navigation completes, so detail fetches wait for the element
    /// the extractor needs.
    Selector(&'static str),
}

/// A disposable headless-Chrome session
pub struct RenderSession {
    browser: Browser,
    handler: JoinHandle<()>,
    nav_timeout: Duration,
}

impl RenderSession {
    /// Launches a fresh headless browser
    pub async fn launch(config: &CrawlerConfig) -> Result<Self> {
        let browser_config = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--no-zygote")
            .build()
            .map_err(CardexError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // The CDP event stream must be drained for the connection to make
        // progress; errors on it are not fetch failures.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("browser handler event error: {}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler: handler_task,
            nav_timeout: Duration::from_secs(config.navigation_timeout_secs),
        })
    }

    /// Fetches the rendered markup of one URL
    ///
    /// Opens a fresh tab, navigates, waits for the readiness condition,
    /// reads the document, and closes the tab before returning. The tab
    /// is released on every exit path and never reused across calls.
    pub async fn fetch(&self, url: &str, wait: WaitFor) -> Result<String> {
        let page = self.browser.new_page("about:blank").await?;
        let result = self.fetch_on(&page, url, wait).await;

        if let Err(e) = page.close().await {
            tracing::debug!("failed to close tab for {}: {}", url, e);
        }

        result
    }

    async fn fetch_on(&self, page: &Page, url: &str, wait: WaitFor) -> Result<String> {
        timeout(self.nav_timeout, async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, CardexError>(())
        })
        .await
        .map_err(|_| CardexError::Timeout {
            url: url.to_string(),
        })??;

        if let WaitFor::Selector(selector) = wait {
            self.wait_for_selector(page, url, selector).await?;
        }

        Ok(page.content().await?)
    }

    /// Polls for an element until it appears or the timeout elapses
    async fn wait_for_selector(&self, page: &Page, url: &str, selector: &str) -> Result<()> {
        let start = Instant::now();
        let poll_interval = Duration::from_millis(250);

        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(());
            }

            if start.elapsed() >= self.nav_timeout {
                return Err(CardexError::MissingElement {
                    url: url.to_string(),
                    selector: selector.to_string(),
                });
            }

            sleep(poll_interval).await;
        }
    }

    /// Shuts the browser down and reaps its process
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("browser close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!("browser wait failed: {}", e);
        }
        self.handler.abort();
    }
}

/// Fetches one document inside a session scoped to exactly this call
///
/// Launch, fetch, close; the session is gone before the caller sees the
/// markup, whatever the outcome was.
pub async fn fetch_document(config: &CrawlerConfig, url: &str, wait: WaitFor) -> Result<String> {
    let session = RenderSession::launch(config).await?;
    let result = session.fetch(url, wait).await;
    session.close().await;
    result
}
