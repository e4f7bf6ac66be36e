//! Run-scoped crawl state
//!
//! The only state the scraper carries between pages is the dedup ledger:
//! the set of detail-page URLs already persisted.

mod ledger;

pub use ledger::Ledger;
