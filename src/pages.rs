use crate::document::relativize;
use crate::extractors::Family;
use crate::models::{PageImage, PageSet, Pagination};
use crate::registry::DomainDescriptor;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

const PLACEHOLDER_PAGE: &str = "https://via.placeholder.com/800x1200?text=Chapter+Not+Available";

/// URL tokens that mark an image as an ad or a lazy-load stand-in.
/// Matched against whole alphanumeric runs, so `/uploads/` paths on
/// WordPress sites are not mistaken for "ads".
const REJECT_TOKENS: &[&str] = &["ads", "banner", "blank", "placeholder"];

fn reader_selectors(family: Family) -> &'static [&'static str] {
    match family {
        Family::Komiku => &["#Baca_Komik img", ".ww img", "#readerarea img"],
        Family::MangaStream => &[
            "#readerarea img",
            ".reading-content img",
            ".chapter-content img",
        ],
    }
}

fn title_selectors(family: Family) -> &'static [&'static str] {
    match family {
        Family::Komiku => &[".headpost h1", "h1"],
        Family::MangaStream => &["h1.entry-title", ".chapter-title", "h1"],
    }
}

/// Accept only real page images: an eager `src` (or lazy `data-src`) with
/// an image extension and none of the ad/placeholder markers.
fn acceptable_image(src: &str) -> bool {
    static EXT_RE: OnceLock<Regex> = OnceLock::new();
    let lower = src.to_lowercase();
    if lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|token| REJECT_TOKENS.contains(&token))
    {
        return false;
    }
    let ext_re =
        EXT_RE.get_or_init(|| Regex::new(r"(?i)\.(jpg|jpeg|png|webp)(\?.*)?$").unwrap());
    ext_re.is_match(src)
}

/// Make protocol-relative and root-relative URLs absolute against the
/// domain's base address.
fn absolutize(src: &str, base: &str) -> String {
    if let Some(rest) = src.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if src.starts_with('/') {
        return format!("{}{}", base.trim_end_matches('/'), src);
    }
    src.to_string()
}

fn attr_u32(el: scraper::ElementRef, attr: &str, default: u32) -> u32 {
    el.value()
        .attr(attr)
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(default)
}

fn page_title(document: &Html, family: Family) -> String {
    for sel in title_selectors(family) {
        if let Ok(selector) = Selector::parse(sel) {
            if let Some(el) = document.select(&selector).next() {
                let t = el.text().collect::<String>().trim().to_string();
                if !t.is_empty() {
                    return t;
                }
            }
        }
    }
    let sel = Selector::parse("title").unwrap();
    document
        .select(&sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn pagination(document: &Html, base: &str) -> Pagination {
    let resolve = |candidates: &[&str]| -> Option<String> {
        for sel in candidates {
            if let Ok(selector) = Selector::parse(sel) {
                if let Some(href) = document
                    .select(&selector)
                    .next()
                    .and_then(|e| e.value().attr("href"))
                {
                    return Some(relativize(base, href));
                }
            }
        }
        None
    };

    Pagination {
        prev: resolve(&["a[rel=\"prev\"]", ".prev-page", ".ch-prev-btn"]),
        next: resolve(&["a[rel=\"next\"]", ".next-page", ".ch-next-btn"]),
    }
}

/// Normalize a reader page into a `PageSet`.
///
/// Returns `None` when not even a chapter title can be found; a `Some`
/// with zero pages means the chapter shell parsed but no usable images
/// were present, which the orchestrator treats as "try the next domain".
pub fn extract_pages(document: &Html, domain: &DomainDescriptor) -> Option<PageSet> {
    let family = domain.config.family();

    let title = page_title(document, family);
    if title.is_empty() {
        log::warn!("{}: no chapter title on reader page", domain.name);
        return None;
    }

    let mut pages: Vec<PageImage> = Vec::new();
    for sel in reader_selectors(family) {
        if let Ok(selector) = Selector::parse(sel) {
            for el in document.select(&selector) {
                let Some(src) = el
                    .value()
                    .attr("src")
                    .or_else(|| el.value().attr("data-src"))
                else {
                    continue;
                };
                if !acceptable_image(src) {
                    continue;
                }
                pages.push(PageImage {
                    src: absolutize(src, domain.base_url),
                    page: pages.len() + 1,
                    width: attr_u32(el, "width", 800),
                    height: attr_u32(el, "height", 1200),
                });
            }
        }
        if !pages.is_empty() {
            log::debug!("{}: {} pages via {}", domain.name, pages.len(), sel);
            break;
        }
    }

    Some(PageSet {
        title,
        pagination: pagination(document, domain.base_url),
        pages,
    })
}

/// Last-resort synthetic page used once every domain has been exhausted
/// but at least one produced a readable chapter shell.
pub fn placeholder_page_set(title: &str) -> PageSet {
    PageSet {
        title: title.to_string(),
        pagination: Pagination::default(),
        pages: vec![PageImage {
            src: PLACEHOLDER_PAGE.to_string(),
            page: 1,
            width: 800,
            height: 1200,
        }],
    }
}
