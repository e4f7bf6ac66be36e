use std::collections::HashSet;

/// The set of detail-page URLs already persisted
///
/// Seeded from the store's full key projection at run start, consulted
/// before every detail visit, and extended only after a confirmed
/// successful upsert. Entries are never removed; the ledger lives for one
/// run and is rebuilt on the next.
#[derive(Debug, Default)]
pub struct Ledger {
    urls: HashSet<String>,
}

impl Ledger {
    /// Builds a ledger from the store's stored URLs
    pub fn from_urls(urls: Vec<String>) -> Self {
        Self {
            urls: urls.into_iter().collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn add(&mut self, url: String) {
        self.urls.insert(url);
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
