use serde::Deserialize;

/// Main configuration structure for cardex
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "tier")]
    pub tiers: Vec<TierEntry>,
    #[serde(default, rename = "event")]
    pub events: Vec<EventEntry>,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site origin, e.g. "https://shoob.gg". No trailing slash.
    pub origin: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Attempts per detail page before the record is given up
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause after every detail-page visit (milliseconds)
    #[serde(rename = "record-delay-ms", default = "default_record_delay")]
    pub record_delay_ms: u64,

    /// Pause after every index page (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Upper bound on a single navigation, including render wait (seconds)
    #[serde(rename = "navigation-timeout-secs", default = "default_nav_timeout")]
    pub navigation_timeout_secs: u64,
}

/// Keep-alive server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Port for the liveness route; bound on all interfaces
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// A tier target: one label, one inclusive page span
#[derive(Debug, Clone, Deserialize)]
pub struct TierEntry {
    /// Tier label as it appears in the index URL (e.g. "6" or "S")
    pub label: String,

    #[serde(rename = "first-page", default = "default_first_page")]
    pub first_page: u32,

    #[serde(rename = "last-page")]
    pub last_page: u32,
}

/// An event target: one event name, one inclusive page span
#[derive(Debug, Clone, Deserialize)]
pub struct EventEntry {
    /// Event identifier as it appears in the index URL (e.g. "halloween")
    pub name: String,

    #[serde(rename = "first-page", default = "default_first_page")]
    pub first_page: u32,

    #[serde(rename = "last-page")]
    pub last_page: u32,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_record_delay() -> u64 {
    1000
}

fn default_page_delay() -> u64 {
    2000
}

fn default_nav_timeout() -> u64 {
    60
}

fn default_port() -> u16 {
    3000
}

fn default_first_page() -> u32 {
    1
}
