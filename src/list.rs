use crate::blacklist::Blacklist;
use crate::models::ComicSummary;
use crate::registry::DomainDescriptor;
use scraper::{Html, Selector};

/// Sentinel some sites render into cards that have no real title.
const NO_TITLE_SENTINEL: &str = "no title";

/// Why a matched card was dropped instead of becoming a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyTitle,
    EmptyDetails,
    Blacklisted(String),
}

/// Result of running the extractors over one listing document.
pub struct ListExtraction {
    pub comics: Vec<ComicSummary>,
    pub skipped: Vec<SkipReason>,
}

impl ListExtraction {
    pub fn empty() -> Self {
        Self {
            comics: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// The path segment that distinguishes a comic within a domain.
///
/// Detail paths look like `/manga/<slug>/`; the section name comes first,
/// so the second non-empty segment is the slug, with the first as a
/// fallback for sites that link comics at the root.
pub fn slug_from_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    segments
        .get(1)
        .or_else(|| segments.first())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Apply a domain's extraction config across every card in a listing
/// document, in document order.
///
/// Each card is handled independently: a card that fails validation is
/// recorded as a skip and never aborts the batch. Returned records always
/// have a non-empty title and details, clamped numeric fields, and a slug
/// that is not blacklisted.
pub fn extract_comics(
    document: &Html,
    domain: &DomainDescriptor,
    blacklist: &Blacklist,
) -> ListExtraction {
    let selector = match Selector::parse(domain.config.list_selector()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("Bad list selector for {}: {:?}", domain.name, e);
            return ListExtraction::empty();
        }
    };

    let mut comics = Vec::new();
    let mut skipped = Vec::new();

    for node in document.select(&selector) {
        let config = &domain.config;

        let title = config.title(node);
        if title.trim().is_empty() || title.trim().eq_ignore_ascii_case(NO_TITLE_SENTINEL) {
            skipped.push(SkipReason::EmptyTitle);
            continue;
        }

        let details = config.details(node, domain.base_url);
        if details.trim().is_empty() {
            skipped.push(SkipReason::EmptyDetails);
            continue;
        }

        let slug = slug_from_path(&details);
        if blacklist.contains(&slug) {
            log::debug!("Skipping blacklisted slug {} on {}", slug, domain.name);
            skipped.push(SkipReason::Blacklisted(slug));
            continue;
        }

        comics.push(ComicSummary {
            comic_type: config.comic_type(node),
            title: truncate_chars(title.trim(), 100),
            thumb: config.thumb(node),
            details,
            chapters: config.chapter_count(node).max(0.0),
            rating: config.rating(node).clamp(0.0, 10.0),
            slug,
        });
    }

    log::debug!(
        "{}: extracted {} comics, skipped {}",
        domain.name,
        comics.len(),
        skipped.len()
    );

    ListExtraction { comics, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::komiku::KomikuConfig;
    use crate::registry::DomainDescriptor;

    fn komiku_domain() -> DomainDescriptor {
        DomainDescriptor {
            name: "komiku",
            base_url: "https://komiku.id",
            is_active: true,
            config: Box::new(KomikuConfig),
        }
    }

    fn listing(cards: &str) -> Html {
        Html::parse_document(&format!(
            r#"<div class="daftar"><div class="daftar">{}</div></div>"#,
            cards
        ))
    }

    fn card(title: &str, href: &str, chapters: &str) -> String {
        format!(
            r#"<div class="bge"><a href="{href}">
                 <img src="/thumb.jpg"><h3>{title}</h3>
                 <div class="kan">{chapters}</div>
               </a></div>"#
        )
    }

    #[test]
    fn test_extracts_valid_records_in_document_order() {
        let doc = listing(&format!(
            "{}{}",
            card("Beta Comic", "https://komiku.id/manga/beta/", "Ch. 12"),
            card("Alpha Comic", "https://komiku.id/manga/alpha/", "Ch. 99"),
        ));
        let out = extract_comics(&doc, &komiku_domain(), &Blacklist::default());
        assert_eq!(out.comics.len(), 2);
        assert_eq!(out.comics[0].title, "Beta Comic");
        assert_eq!(out.comics[1].title, "Alpha Comic");
        assert_eq!(out.comics[0].chapters, 12.0);
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_empty_and_sentinel_titles_are_skipped() {
        let doc = listing(&format!(
            "{}{}{}",
            card("", "https://komiku.id/manga/a/", "1"),
            card("No Title", "https://komiku.id/manga/b/", "2"),
            card("Kept", "https://komiku.id/manga/c/", "3"),
        ));
        let out = extract_comics(&doc, &komiku_domain(), &Blacklist::default());
        assert_eq!(out.comics.len(), 1);
        assert_eq!(out.comics[0].title, "Kept");
        assert_eq!(
            out.skipped,
            vec![SkipReason::EmptyTitle, SkipReason::EmptyTitle]
        );
    }

    #[test]
    fn test_blacklisted_slug_is_dropped() {
        let doc = listing(&format!(
            "{}{}",
            card("Banned", "https://komiku.id/manga/sweet-guy/", "1"),
            card("Fine", "https://komiku.id/manga/fine/", "1"),
        ));
        let out = extract_comics(&doc, &komiku_domain(), &Blacklist::default());
        assert_eq!(out.comics.len(), 1);
        assert_eq!(out.comics[0].slug, "fine");
        assert_eq!(
            out.skipped,
            vec![SkipReason::Blacklisted("sweet-guy".to_string())]
        );
    }

    #[test]
    fn test_missing_href_counts_as_empty_details() {
        let doc = listing(
            r#"<div class="bge"><a><img src="/t.jpg"><h3>Orphan</h3></a></div>"#,
        );
        let out = extract_comics(&doc, &komiku_domain(), &Blacklist::default());
        assert!(out.comics.is_empty());
        assert_eq!(out.skipped, vec![SkipReason::EmptyDetails]);
    }

    #[test]
    fn test_title_truncated_to_100_chars() {
        let long = "x".repeat(150);
        let doc = listing(&card(&long, "https://komiku.id/manga/long/", "1"));
        let out = extract_comics(&doc, &komiku_domain(), &Blacklist::default());
        assert_eq!(out.comics[0].title.chars().count(), 100);
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(slug_from_path("/manga/one-piece/"), "one-piece");
        assert_eq!(slug_from_path("/one-piece"), "one-piece");
        assert_eq!(slug_from_path(""), "");
    }
}
