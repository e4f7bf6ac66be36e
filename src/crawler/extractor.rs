//! Field extraction from rendered detail pages
//!
//! This module turns the markup of one detail page into a CardRecord, or
//! rejects it. Which breadcrumb positions carry the tier and series, and
//! whether a video source may stand in for the card image, depend on the
//! record kind; the kind is decided once per crawl target, not per field.

use crate::storage::CardRecord;
use scraper::{ElementRef, Html, Selector};

/// Name sits in the last breadcrumb entry regardless of kind
const NAME_SELECTOR: &str = "ol.breadcrumb-new li:last-child span[itemprop='name']";

const TIER_SELECTOR_STANDARD: &str = "ol.breadcrumb-new li:nth-child(3) span[itemprop='name']";
const SERIES_SELECTOR_STANDARD: &str = "ol.breadcrumb-new li:nth-child(4) span[itemprop='name']";

// Event pages insert an event crumb, pushing tier and series one deeper.
const TIER_SELECTOR_EVENT: &str = "ol.breadcrumb-new li:nth-child(4) span[itemprop='name']";
const SERIES_SELECTOR_EVENT: &str = "ol.breadcrumb-new li:nth-child(5) span[itemprop='name']";

const IMAGE_SELECTOR: &str = ".cardData img.img-fluid";
const VIDEO_SELECTOR: &str = ".cardData video source";

/// Literal prefix on event-page tier crumbs ("Tier 3" instead of "3")
const TIER_PREFIX: &str = "Tier ";

/// Label prefix on the maker paragraph
const MAKER_PREFIX: &str = "Card Maker:";

/// Extraction policy, fixed per crawl target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    Standard,
    Event { name: String },
}

/// Extracts one card from the rendered markup of a detail page
///
/// Returns `None` when the page has no name or no usable media source;
/// such a page is a content problem, not a transient failure, so the
/// caller must not retry it. The skip is logged here with the source URL.
pub fn extract_card(html: &str, url: &str, kind: &RecordKind) -> Option<CardRecord> {
    let document = Html::parse_document(html);

    let name = select_text(&document, NAME_SELECTOR);
    let media = extract_media(&document, kind);

    let (name, media) = match (name, media) {
        (Some(name), Some(media)) => (name, media),
        _ => {
            tracing::warn!(url = %url, "skipped invalid card: missing name or media");
            return None;
        }
    };

    let (tier, series) = match kind {
        RecordKind::Standard => (
            select_text(&document, TIER_SELECTOR_STANDARD),
            select_text(&document, SERIES_SELECTOR_STANDARD),
        ),
        RecordKind::Event { .. } => (
            select_text(&document, TIER_SELECTOR_EVENT).map(strip_tier_prefix),
            select_text(&document, SERIES_SELECTOR_EVENT),
        ),
    };

    let (is_event, event) = match kind {
        RecordKind::Standard => (false, None),
        RecordKind::Event { name } => (true, Some(name.clone())),
    };

    Some(CardRecord {
        url: url.to_string(),
        name,
        tier,
        series,
        media,
        maker: extract_maker(&document),
        is_event,
        event,
    })
}

/// Resolves the media source per kind
///
/// Event pages often carry animated cards, so a video source is preferred
/// and the still image is the fallback. Standard pages only ever have the
/// image.
fn extract_media(document: &Html, kind: &RecordKind) -> Option<String> {
    match kind {
        RecordKind::Standard => select_attr(document, IMAGE_SELECTOR, "src"),
        RecordKind::Event { .. } => select_attr(document, VIDEO_SELECTOR, "src")
            .or_else(|| select_attr(document, IMAGE_SELECTOR, "src")),
    }
}

/// Finds the maker paragraph by its marker child and strips the label
///
/// A missing maker never invalidates the record.
fn extract_maker(document: &Html) -> Option<String> {
    let paragraph_selector = Selector::parse("p").ok()?;
    let marker_selector = Selector::parse("span.padr5").ok()?;

    document
        .select(&paragraph_selector)
        .find(|p| p.select(&marker_selector).next().is_some())
        .and_then(|p| {
            let text = element_text(&p).replacen(MAKER_PREFIX, "", 1);
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
}

fn strip_tier_prefix(tier: String) -> String {
    tier.strip_prefix(TIER_PREFIX)
        .map(|t| t.trim().to_string())
        .unwrap_or(tier)
}

/// First match's text content, trimmed; None when empty or absent
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|s| !s.is_empty())
}

/// First match's attribute value; None when absent or empty
fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://cards.example/cards/info/belfast";

    fn standard_page() -> String {
        r#"<html><body>
            <ol class="breadcrumb-new">
                <li><span itemprop="name">Home</span></li>
                <li><span itemprop="name">Cards</span></li>
                <li><span itemprop="name">6</span></li>
                <li><span itemprop="name">Azur Lane</span></li>
                <li><span itemprop="name">Belfast</span></li>
            </ol>
            <div class="cardData">
                <img class="img-fluid" src="https://cdn.example/belfast.png">
            </div>
            <p><span class="padr5"></span>Card Maker: Ryou</p>
        </body></html>"#
            .to_string()
    }

    fn event_page() -> String {
        r#"<html><body>
            <ol class="breadcrumb-new">
                <li><span itemprop="name">Home</span></li>
                <li><span itemprop="name">Events</span></li>
                <li><span itemprop="name">Halloween 2023</span></li>
                <li><span itemprop="name">Tier 3</span></li>
                <li><span itemprop="name">Spooky Tales</span></li>
                <li><span itemprop="name">Pumpkin Witch</span></li>
            </ol>
            <div class="cardData">
                <video><source src="https://cdn.example/witch.mp4"></video>
                <img class="img-fluid" src="https://cdn.example/witch.png">
            </div>
        </body></html>"#
            .to_string()
    }

    #[test]
    fn test_standard_card_fields() {
        let card = extract_card(&standard_page(), URL, &RecordKind::Standard).unwrap();

        assert_eq!(card.url, URL);
        assert_eq!(card.name, "Belfast");
        assert_eq!(card.tier.as_deref(), Some("6"));
        assert_eq!(card.series.as_deref(), Some("Azur Lane"));
        assert_eq!(card.media, "https://cdn.example/belfast.png");
        assert_eq!(card.maker.as_deref(), Some("Ryou"));
        assert!(!card.is_event);
        assert_eq!(card.event, None);
    }

    #[test]
    fn test_event_card_reads_deeper_breadcrumbs() {
        let kind = RecordKind::Event {
            name: "halloween".to_string(),
        };
        let card = extract_card(&event_page(), URL, &kind).unwrap();

        assert_eq!(card.name, "Pumpkin Witch");
        assert_eq!(card.tier.as_deref(), Some("3")); // "Tier " prefix stripped
        assert_eq!(card.series.as_deref(), Some("Spooky Tales"));
    }

    #[test]
    fn test_event_card_prefers_video_source() {
        let kind = RecordKind::Event {
            name: "halloween".to_string(),
        };
        let card = extract_card(&event_page(), URL, &kind).unwrap();
        assert_eq!(card.media, "https://cdn.example/witch.mp4");
    }

    #[test]
    fn test_event_card_falls_back_to_image() {
        let html = event_page().replace(
            r#"<video><source src="https://cdn.example/witch.mp4"></video>"#,
            "",
        );
        let kind = RecordKind::Event {
            name: "halloween".to_string(),
        };
        let card = extract_card(&html, URL, &kind).unwrap();
        assert_eq!(card.media, "https://cdn.example/witch.png");
    }

    #[test]
    fn test_event_flags_set_unconditionally() {
        let kind = RecordKind::Event {
            name: "halloween".to_string(),
        };
        let card = extract_card(&event_page(), URL, &kind).unwrap();
        assert!(card.is_event);
        assert_eq!(card.event.as_deref(), Some("halloween"));
    }

    #[test]
    fn test_missing_name_invalidates() {
        let html = standard_page().replace(r#"<span itemprop="name">Belfast</span>"#, "");
        assert!(extract_card(&html, URL, &RecordKind::Standard).is_none());
    }

    #[test]
    fn test_missing_media_invalidates() {
        let html = standard_page().replace(
            r#"<img class="img-fluid" src="https://cdn.example/belfast.png">"#,
            "",
        );
        assert!(extract_card(&html, URL, &RecordKind::Standard).is_none());
    }

    #[test]
    fn test_standard_kind_ignores_video() {
        // A standard page with only a video has no usable media.
        let html = standard_page().replace(
            r#"<img class="img-fluid" src="https://cdn.example/belfast.png">"#,
            r#"<video><source src="https://cdn.example/belfast.mp4"></video>"#,
        );
        assert!(extract_card(&html, URL, &RecordKind::Standard).is_none());
    }

    #[test]
    fn test_missing_maker_is_tolerated() {
        let html = standard_page().replace(
            r#"<p><span class="padr5"></span>Card Maker: Ryou</p>"#,
            "",
        );
        let card = extract_card(&html, URL, &RecordKind::Standard).unwrap();
        assert_eq!(card.maker, None);
    }

    #[test]
    fn test_maker_without_marker_is_ignored() {
        let html = standard_page().replace(
            r#"<p><span class="padr5"></span>Card Maker: Ryou</p>"#,
            "<p>Card Maker: Ryou</p>",
        );
        let card = extract_card(&html, URL, &RecordKind::Standard).unwrap();
        assert_eq!(card.maker, None);
    }

    #[test]
    fn test_maker_whitespace_trimmed() {
        let html = standard_page().replace(
            "Card Maker: Ryou",
            "Card Maker:   Ryou  ",
        );
        let card = extract_card(&html, URL, &RecordKind::Standard).unwrap();
        assert_eq!(card.maker.as_deref(), Some("Ryou"));
    }

    #[test]
    fn test_tier_without_prefix_kept_verbatim() {
        let html = event_page().replace("Tier 3", "3");
        let kind = RecordKind::Event {
            name: "halloween".to_string(),
        };
        let card = extract_card(&html, URL, &kind).unwrap();
        assert_eq!(card.tier.as_deref(), Some("3"));
    }

    #[test]
    fn test_short_breadcrumb_leaves_optionals_empty() {
        let html = r#"<html><body>
            <ol class="breadcrumb-new">
                <li><span itemprop="name">Home</span></li>
                <li><span itemprop="name">Belfast</span></li>
            </ol>
            <div class="cardData">
                <img class="img-fluid" src="https://cdn.example/belfast.png">
            </div>
        </body></html>"#;
        let card = extract_card(html, URL, &RecordKind::Standard).unwrap();
        assert_eq!(card.name, "Belfast");
        assert_eq!(card.tier, None);
        assert_eq!(card.series, None);
    }
}
