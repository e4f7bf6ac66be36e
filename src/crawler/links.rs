//! Detail-link collection from index pages
//!
//! An index page is worth exactly one thing: the set of detail links on
//! it. Links are matched by path prefix, made absolute against the site
//! origin, and deduplicated while keeping first-seen order so downstream
//! processing is deterministic.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Collects the detail-page URLs referenced by an index page
///
/// # Arguments
///
/// * `html` - The rendered index-page markup
/// * `origin` - Site origin used to absolutize the hrefs (no trailing slash)
/// * `path_prefix` - Path prefix a detail link must start with
///
/// # Returns
///
/// Absolute URLs, each distinct URL exactly once, in the order first seen.
pub fn collect_detail_links(html: &str, origin: &str, path_prefix: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(&format!("a[href^='{}']", path_prefix)) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        if let Some(href) = anchor.value().attr("href") {
            let absolute = format!("{}{}", origin, href);
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://cards.example";

    #[test]
    fn test_collects_matching_anchors_in_order() {
        let html = r#"<html><body>
            <a href="/cards/info/a">A</a>
            <a href="/cards/info/b">B</a>
            <a href="/cards/info/c">C</a>
        </body></html>"#;

        let links = collect_detail_links(html, ORIGIN, "/cards/info/");
        assert_eq!(
            links,
            vec![
                "https://cards.example/cards/info/a",
                "https://cards.example/cards/info/b",
                "https://cards.example/cards/info/c",
            ]
        );
    }

    #[test]
    fn test_duplicates_collapse_to_first_seen() {
        let html = r#"<html><body>
            <a href="/cards/info/a">A</a>
            <a href="/cards/info/b">B</a>
            <a href="/cards/info/a">A again</a>
        </body></html>"#;

        let links = collect_detail_links(html, ORIGIN, "/cards/info/");
        assert_eq!(
            links,
            vec![
                "https://cards.example/cards/info/a",
                "https://cards.example/cards/info/b",
            ]
        );
    }

    #[test]
    fn test_ignores_other_paths() {
        let html = r#"<html><body>
            <a href="/cards/info/a">A</a>
            <a href="/cards">index</a>
            <a href="/profile/xyz">profile</a>
            <a href="https://elsewhere.example/cards/info/b">offsite</a>
        </body></html>"#;

        let links = collect_detail_links(html, ORIGIN, "/cards/info/");
        assert_eq!(links, vec!["https://cards.example/cards/info/a"]);
    }

    #[test]
    fn test_event_prefix_excludes_standard_links() {
        let html = r#"<html><body>
            <a href="/event-cards/info/witch">witch</a>
            <a href="/cards/info/a">A</a>
        </body></html>"#;

        let links = collect_detail_links(html, ORIGIN, "/event-cards/info/");
        assert_eq!(links, vec!["https://cards.example/event-cards/info/witch"]);
    }

    #[test]
    fn test_empty_page_yields_no_links() {
        let links = collect_detail_links("<html><body></body></html>", ORIGIN, "/cards/info/");
        assert!(links.is_empty());
    }
}
