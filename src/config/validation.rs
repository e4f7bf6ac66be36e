use crate::config::types::{Config, CrawlerConfig, EventEntry, SiteConfig, TierEntry};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_tier_entries(&config.tiers)?;
    validate_event_entries(&config.events)?;

    if config.tiers.is_empty() && config.events.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[tier]] or [[event]] target is required".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site origin: {}", e)))?;

    if url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "site origin '{}' must use HTTPS scheme",
            config.origin
        )));
    }

    if config.origin.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "site origin '{}' must not end with a slash",
            config.origin
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.navigation_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "navigation_timeout_secs must be >= 1, got {}",
            config.navigation_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates tier target entries
fn validate_tier_entries(tiers: &[TierEntry]) -> Result<(), ConfigError> {
    for entry in tiers {
        if entry.label.is_empty() {
            return Err(ConfigError::Validation(
                "tier label cannot be empty".to_string(),
            ));
        }

        validate_page_span(&format!("tier '{}'", entry.label), entry.first_page, entry.last_page)?;
    }

    Ok(())
}

/// Validates event target entries
fn validate_event_entries(events: &[EventEntry]) -> Result<(), ConfigError> {
    for entry in events {
        if entry.name.is_empty() {
            return Err(ConfigError::Validation(
                "event name cannot be empty".to_string(),
            ));
        }

        if !entry
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "event name '{}' must contain only alphanumerics, hyphens, and underscores",
                entry.name
            )));
        }

        validate_page_span(&format!("event '{}'", entry.name), entry.first_page, entry.last_page)?;
    }

    Ok(())
}

/// Validates one inclusive page span
fn validate_page_span(what: &str, first: u32, last: u32) -> Result<(), ConfigError> {
    if first < 1 {
        return Err(ConfigError::Validation(format!(
            "{}: first-page must be >= 1, got {}",
            what, first
        )));
    }

    if last < first {
        return Err(ConfigError::Validation(format!(
            "{}: last-page {} is below first-page {}",
            what, last, first
        )));
    }

    Ok(())
}
