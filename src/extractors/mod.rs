pub mod komiku;
pub mod mangastream;

use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

/// Markup family a domain belongs to.
///
/// Detail and reader pages differ structurally between families, so the
/// normalizers dispatch on this rather than on per-domain closures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Komiku,
    MangaStream,
}

/// Per-domain extraction rules for listing cards and path building.
///
/// One implementation per markup family; per-site differences (rating
/// selector, thumbnail rewrites, search query suffix) are parameters of
/// the family type, not separate implementations.
pub trait ExtractionConfig {
    fn family(&self) -> Family;

    /// Selector matching one comic card on a listing/search page.
    fn list_selector(&self) -> &str;

    fn title(&self, node: ElementRef) -> String;
    fn thumb(&self, node: ElementRef) -> String;

    /// Site-relative detail path for the card, or empty when absent.
    fn details(&self, node: ElementRef, base: &str) -> String;

    fn chapter_count(&self, node: ElementRef) -> f64;
    fn comic_type(&self, node: ElementRef) -> String;
    fn rating(&self, node: ElementRef) -> f64;

    fn search_path(&self, query: &str) -> String;

    fn list_path(&self) -> &str {
        "/manga/"
    }
}

/// First element under `node` matching `sel`, or `None`.
pub(crate) fn select_first<'a>(node: ElementRef<'a>, sel: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(sel).ok()?;
    node.select(&selector).next()
}

pub(crate) fn text_of(node: ElementRef, sel: &str) -> String {
    select_first(node, sel)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

pub(crate) fn attr_of(node: ElementRef, sel: &str, attr: &str) -> Option<String> {
    select_first(node, sel)
        .and_then(|e| e.value().attr(attr))
        .map(|s| s.to_string())
}

/// Parse a number out of noisy text like "Ch. 1052" or "★ 8.5".
///
/// Takes the first numeric run in the text; anything without one yields 0.
pub(crate) fn parse_number(text: &str) -> f64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());
    re.captures(text)
        .and_then(|cap| cap[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Clamp a scraped rating into the 0..=10 contract.
pub(crate) fn clamp_rating(value: f64) -> f64 {
    value.clamp(0.0, 10.0)
}
