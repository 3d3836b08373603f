use crate::document::relativize;
use crate::extractors::Family;
use crate::models::{ChapterRef, ComicDetail};
use crate::registry::DomainDescriptor;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Candidate selectors for one family's detail-page layout, tried in order.
struct DetailSelectors {
    info_blocks: &'static [&'static str],
    title: &'static [&'static str],
    thumb: &'static [&'static str],
    description: &'static [&'static str],
    genres: &'static [&'static str],
    rating: &'static [&'static str],
    chapter_items: &'static [&'static str],
}

const KOMIKU: DetailSelectors = DetailSelectors {
    info_blocks: &["#Informasi", ".post-content", ".series-info", ".info-meta"],
    title: &["h1", ".series-title", ".post-title"],
    thumb: &[".ims img", ".thumb img", ".series-cover img", "img"],
    description: &["#Sinopsis p", ".desc", ".synopsis", ".summary p"],
    genres: &["a[href*=\"/genre/\"]", ".genre-tags a", ".tag a"],
    rating: &[".rating strong", ".score"],
    chapter_items: &["#Daftar_Chapter td.judulseries", ".list-chap li", ".chapter-list li"],
};

const MANGASTREAM: DetailSelectors = DetailSelectors {
    info_blocks: &[".bigcontent", ".infox", ".main-info", ".info-meta"],
    title: &["h1.entry-title", "h1", ".series-title"],
    thumb: &[".thumb img", ".series-cover img", "img"],
    description: &[".entry-content p", ".desc", ".synopsis", ".summary p"],
    genres: &[".mgen a", "a[href*=\"/genres/\"]", "a[href*=\"/genre/\"]", ".tag a"],
    rating: &[".num", ".rating strong", ".score"],
    chapter_items: &["#chapterlist li", ".eplister li", ".chapter-list li", ".bixbox ul li"],
};

fn selectors_for(family: Family) -> &'static DetailSelectors {
    match family {
        Family::Komiku => &KOMIKU,
        Family::MangaStream => &MANGASTREAM,
    }
}

fn first_match<'a>(scope: ElementRef<'a>, candidates: &[&str]) -> Option<ElementRef<'a>> {
    for sel in candidates {
        if let Ok(selector) = Selector::parse(sel) {
            if let Some(el) = scope.select(&selector).next() {
                return Some(el);
            }
        }
    }
    None
}

fn first_text(scope: ElementRef, candidates: &[&str]) -> Option<String> {
    first_match(scope, candidates)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Compiled `Label[:\s]value` matchers for the metadata block, built once.
struct LabelPatterns {
    status: Regex,
    released: Regex,
    author: Regex,
    comic_type: Regex,
}

fn label_patterns() -> &'static LabelPatterns {
    static PATTERNS: OnceLock<LabelPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| LabelPatterns {
        status: label_regex("Status"),
        released: label_regex("Released"),
        author: label_regex("Author"),
        comic_type: label_regex("Type"),
    })
}

fn label_regex(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){}[:\s]+([^\n,]+)", label)).unwrap()
}

/// Extract `Label: value` from concatenated block text, case-insensitive,
/// stopping at a newline or comma. Returns the fallback when absent so
/// "missing" stays distinguishable from "not yet fetched".
fn label_field(text: &str, re: &Regex, fallback: &str) -> String {
    if let Some(cap) = re.captures(text) {
        let value = cap[1].trim();
        if !value.is_empty() {
            return value.to_string();
        }
    }
    fallback.to_string()
}

/// Chapter number from a chapter title like "Chapter 12.5" or "Ch. 7".
fn chapter_number(title: &str, position: usize) -> f64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"(?i)ch(?:apter)?\.?\s*(\d+(?:\.\d+)?)").unwrap());
    re.captures(title)
        .and_then(|cap| cap[1].parse::<f64>().ok())
        .unwrap_or((position + 1) as f64)
}

fn page_title_fallback(document: &Html) -> String {
    let sel = Selector::parse("title").unwrap();
    document
        .select(&sel)
        .next()
        .map(|e| e.text().collect::<String>())
        .map(|t| t.split(" - ").next().unwrap_or("").trim().to_string())
        .unwrap_or_default()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Normalize a detail page into a `ComicDetail`.
///
/// Returns `None` when no info block or title can be found, which the
/// orchestrator treats as "try the next domain". Pages without any info
/// block (404s, interstitials) must not be mistaken for detail pages, so
/// the title fallbacks only apply once a block has matched.
pub fn extract_detail(document: &Html, domain: &DomainDescriptor) -> Option<ComicDetail> {
    let sels = selectors_for(domain.config.family());

    let root = document.root_element();
    let Some(info) = first_match(root, sels.info_blocks) else {
        log::warn!("{}: no info block on detail page", domain.name);
        return None;
    };

    let title = first_text(info, sels.title)
        .or_else(|| first_text(root, sels.title))
        .unwrap_or_else(|| page_title_fallback(document));
    if title.is_empty() {
        log::warn!("{}: no title found on detail page", domain.name);
        return None;
    }

    let thumb = first_match(info, sels.thumb)
        .and_then(|e| {
            e.value()
                .attr("src")
                .or_else(|| e.value().attr("data-src"))
        })
        .map(|s| s.to_string())
        .unwrap_or_else(|| "https://via.placeholder.com/250x350?text=No+Cover".to_string());

    let description = first_text(info, sels.description)
        .or_else(|| first_text(root, sels.description))
        .unwrap_or_else(|| "No description available".to_string());

    // Genres: deduplicated, capped at 10
    let mut genres: Vec<String> = Vec::new();
    for sel in sels.genres {
        if let Ok(selector) = Selector::parse(sel) {
            for el in info.select(&selector) {
                let g = el.text().collect::<String>().trim().to_string();
                if !g.is_empty() && !genres.contains(&g) {
                    genres.push(g);
                }
            }
        }
        if !genres.is_empty() {
            break;
        }
    }
    genres.truncate(10);

    let info_text = info.text().collect::<String>();
    let labels = label_patterns();
    let status = label_field(&info_text, &labels.status, "Ongoing");
    let released = label_field(&info_text, &labels.released, "N/A");
    let author = label_field(&info_text, &labels.author, "Unknown");
    let comic_type = label_field(&info_text, &labels.comic_type, "Manga");

    let rating = first_text(info, sels.rating)
        .map(|t| crate::extractors::parse_number(&t))
        .unwrap_or(0.0)
        .clamp(0.0, 10.0);

    let chapters = extract_chapters(document, domain, sels);

    log::info!(
        "{}: detail loaded: {} ({} chapters)",
        domain.name,
        title,
        chapters.len()
    );

    Some(ComicDetail {
        title: truncate_chars(&title, 150),
        thumb,
        description: truncate_chars(&description, 500),
        genres,
        status,
        released,
        author,
        comic_type,
        rating,
        chapters,
    })
}

/// Chapter list: candidate item selectors tried in order, numbers parsed
/// from titles, sorted descending by number, capped at the 50 most recent.
fn extract_chapters(
    document: &Html,
    domain: &DomainDescriptor,
    sels: &DetailSelectors,
) -> Vec<ChapterRef> {
    let mut chapters: Vec<ChapterRef> = Vec::new();
    let link_sel = Selector::parse("a").unwrap();

    for sel in sels.chapter_items {
        if let Ok(selector) = Selector::parse(sel) {
            for (i, item) in document.select(&selector).enumerate() {
                let Some(link) = item.select(&link_sel).next() else {
                    continue;
                };
                let title = link.text().collect::<String>().trim().to_string();
                let Some(href) = link.value().attr("href") else {
                    continue;
                };
                if title.is_empty() || href.is_empty() {
                    continue;
                }
                chapters.push(ChapterRef {
                    number: chapter_number(&title, i),
                    title,
                    path: relativize(domain.base_url, href),
                });
            }
        }
        if !chapters.is_empty() {
            log::debug!("{}: found {} chapters via {}", domain.name, chapters.len(), sel);
            break;
        }
    }

    // Canonical order is newest first regardless of source markup order
    chapters.sort_by(|a, b| b.number.partial_cmp(&a.number).unwrap_or(std::cmp::Ordering::Equal));
    chapters.truncate(50);
    chapters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::mangastream::MangaStreamConfig;
    use crate::registry::DomainDescriptor;

    fn kiryuu_domain() -> DomainDescriptor {
        DomainDescriptor {
            name: "kiryuu",
            base_url: "https://kiryuu.id",
            is_active: true,
            config: Box::new(MangaStreamConfig::kiryuu()),
        }
    }

    fn detail_page(chapter_items: &str) -> String {
        format!(
            r#"<html><head><title>Solo Leveling - Kiryuu</title></head><body>
            <div class="bigcontent">
              <h1 class="entry-title">Solo Leveling</h1>
              <div class="thumb"><img src="https://kiryuu.id/cover.jpg"></div>
              <div class="entry-content"><p>A hunter grows stronger.</p></div>
              <div class="mgen"><a>Action</a><a>Fantasy</a><a>Action</a></div>
              <div class="spe">
                <span>Status: Ongoing</span>
                <span>Author: Chugong</span>
                <span>Type: Manhwa</span>
                <span>Released: 2018</span>
              </div>
              <div class="num">9.1</div>
            </div>
            <div id="chapterlist"><ul>{}</ul></div>
            </body></html>"#,
            chapter_items
        )
    }

    fn chapter_li(n: &str) -> String {
        format!(r#"<li><a href="https://kiryuu.id/solo-leveling-chapter-{n}/">Chapter {n}</a></li>"#)
    }

    #[test]
    fn test_detail_fields() {
        let html = detail_page(&format!("{}{}", chapter_li("1"), chapter_li("2")));
        let doc = Html::parse_document(&html);
        let detail = extract_detail(&doc, &kiryuu_domain()).unwrap();

        assert_eq!(detail.title, "Solo Leveling");
        assert_eq!(detail.thumb, "https://kiryuu.id/cover.jpg");
        assert_eq!(detail.description, "A hunter grows stronger.");
        assert_eq!(detail.genres, vec!["Action", "Fantasy"]);
        assert_eq!(detail.status, "Ongoing");
        assert_eq!(detail.author, "Chugong");
        assert_eq!(detail.comic_type, "Manhwa");
        assert_eq!(detail.released, "2018");
        assert_eq!(detail.rating, 9.1);
    }

    #[test]
    fn test_chapters_sorted_descending_and_relativized() {
        let html = detail_page(&format!(
            "{}{}{}",
            chapter_li("3"),
            chapter_li("12"),
            chapter_li("7.5"),
        ));
        let doc = Html::parse_document(&html);
        let detail = extract_detail(&doc, &kiryuu_domain()).unwrap();

        let numbers: Vec<f64> = detail.chapters.iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![12.0, 7.5, 3.0]);
        assert_eq!(detail.chapters[0].path, "/solo-leveling-chapter-12/");
    }

    #[test]
    fn test_chapters_capped_at_50() {
        let items: String = (1..=80).map(|n| chapter_li(&n.to_string())).collect();
        let doc = Html::parse_document(&detail_page(&items));
        let detail = extract_detail(&doc, &kiryuu_domain()).unwrap();

        assert_eq!(detail.chapters.len(), 50);
        // Most recent kept: 80 down to 31
        assert_eq!(detail.chapters[0].number, 80.0);
        assert_eq!(detail.chapters[49].number, 31.0);
    }

    #[test]
    fn test_missing_labels_use_fallbacks() {
        let html = r#"<html><head><title>Bare - Site</title></head><body>
            <div class="bigcontent"><h1>Bare</h1></div></body></html>"#;
        let doc = Html::parse_document(html);
        let detail = extract_detail(&doc, &kiryuu_domain()).unwrap();

        assert_eq!(detail.status, "Ongoing");
        assert_eq!(detail.author, "Unknown");
        assert_eq!(detail.released, "N/A");
        assert_eq!(detail.comic_type, "Manga");
        assert_eq!(detail.description, "No description available");
        assert!(detail.chapters.is_empty());
    }

    #[test]
    fn test_no_title_yields_none() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(extract_detail(&doc, &kiryuu_domain()).is_none());
    }

    #[test]
    fn test_title_falls_back_to_page_title() {
        let html = r#"<html><head><title>Fallback Comic - Kiryuu</title></head>
            <body><div class="bigcontent"><p>Status: Completed</p></div></body></html>"#;
        let doc = Html::parse_document(html);
        let detail = extract_detail(&doc, &kiryuu_domain()).unwrap();
        assert_eq!(detail.title, "Fallback Comic");
        assert_eq!(detail.status, "Completed");
    }

    #[test]
    fn test_label_field_stops_at_comma() {
        let text = "Author: Chugong, Dubu\nStatus: Ongoing";
        assert_eq!(label_field(text, &label_patterns().author, "Unknown"), "Chugong");
        assert_eq!(label_field(text, &label_regex("Artist"), "Unknown"), "Unknown");
    }

    #[test]
    fn test_titled_page_without_info_block_is_none() {
        // A 404 or interstitial still carries a <title>; it must not
        // short-circuit the domain fallback with junk detail
        let html = r#"<html><head><title>404 Not Found - Kiryuu</title></head>
            <body><p>Page not found</p></body></html>"#;
        let doc = Html::parse_document(html);
        assert!(extract_detail(&doc, &kiryuu_domain()).is_none());
    }
}
