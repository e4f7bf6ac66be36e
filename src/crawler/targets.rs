//! Crawl targets and their URL templates
//!
//! A target is one tier or one event with an inclusive page span. Targets
//! are fixed for the lifetime of a run and processed in configured order;
//! each expands into a sequence of index-page URLs by template
//! substitution.

use crate::config::Config;
use crate::crawler::extractor::RecordKind;
use std::ops::RangeInclusive;

/// Path prefix of standard-card detail links
pub const CARD_LINK_PREFIX: &str = "/cards/info/";

/// Path prefix of event-card detail links
pub const EVENT_LINK_PREFIX: &str = "/event-cards/info/";

/// One traversal unit: a tier or an event, with its page span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlTarget {
    Tier { label: String, pages: RangeInclusive<u32> },
    Event { name: String, pages: RangeInclusive<u32> },
}

impl CrawlTarget {
    /// Builds the ordered target list from the configuration: tiers in
    /// configured order, then events in configured order.
    pub fn from_config(config: &Config) -> Vec<CrawlTarget> {
        let tiers = config.tiers.iter().map(|t| CrawlTarget::Tier {
            label: t.label.clone(),
            pages: t.first_page..=t.last_page,
        });
        let events = config.events.iter().map(|e| CrawlTarget::Event {
            name: e.name.clone(),
            pages: e.first_page..=e.last_page,
        });
        tiers.chain(events).collect()
    }

    /// The inclusive page span to walk, ascending
    pub fn pages(&self) -> RangeInclusive<u32> {
        match self {
            CrawlTarget::Tier { pages, .. } | CrawlTarget::Event { pages, .. } => pages.clone(),
        }
    }

    /// Index-page URL for one page number of this target
    pub fn index_url(&self, origin: &str, page: u32) -> String {
        match self {
            CrawlTarget::Tier { label, .. } => {
                format!("{}/cards?page={}&tier={}", origin, page, label)
            }
            CrawlTarget::Event { name, .. } => {
                format!("{}/event-cards?page={}&event={}", origin, page, name)
            }
        }
    }

    /// Path prefix that detail links of this target start with
    pub fn link_prefix(&self) -> &'static str {
        match self {
            CrawlTarget::Tier { .. } => CARD_LINK_PREFIX,
            CrawlTarget::Event { .. } => EVENT_LINK_PREFIX,
        }
    }

    /// Extraction policy for detail pages reached through this target
    pub fn record_kind(&self) -> RecordKind {
        match self {
            CrawlTarget::Tier { .. } => RecordKind::Standard,
            CrawlTarget::Event { name, .. } => RecordKind::Event { name: name.clone() },
        }
    }

    /// Short human label for log lines
    pub fn describe(&self) -> String {
        match self {
            CrawlTarget::Tier { label, .. } => format!("tier {}", label),
            CrawlTarget::Event { name, .. } => format!("event {}", name),
        }
    }
}
