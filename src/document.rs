use crate::http_client::HtmlSource;
use reqwest::Url;
use scraper::Html;

/// Parse raw HTML into a queryable document.
///
/// Never fails: `scraper` degrades gracefully on malformed markup, and a
/// broken page simply produces empty selector matches downstream.
pub fn load(html: &str) -> Html {
    Html::parse_document(html)
}

/// Join a site-relative path onto a base address.
///
/// Paths that are already absolute URLs pass through untouched, so a
/// detail path returned from a listing never gets double-prefixed.
pub fn join_url(base: &str, path: &str) -> Option<String> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    let base = Url::parse(base).ok()?;
    base.join(path).ok().map(|u| u.to_string())
}

/// Strip a domain's base address off an absolute URL, yielding the
/// site-relative path used in `ComicSummary::details` and chapter paths.
pub fn relativize(base: &str, url: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if let Some(rest) = url.strip_prefix(trimmed) {
        if rest.is_empty() {
            return "/".to_string();
        }
        return rest.to_string();
    }
    url.to_string()
}

/// Fetch a page and parse it.
///
/// Returns `None` on any fetch or URL failure: callers treat a missing
/// document as "try the next domain", never as a fatal error.
pub async fn get_html<S: HtmlSource>(source: &S, base: &str, path: &str) -> Option<Html> {
    let url = match join_url(base, path) {
        Some(u) => u,
        None => {
            log::warn!("Invalid URL from base {} and path {}", base, path);
            return None;
        }
    };

    log::debug!("Fetching: {}", url);
    match source.fetch_html(&url).await {
        Ok(html) => Some(load(&html)),
        Err(e) => {
            log::warn!("Fetch failed for {}: {}", url, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_load_malformed_markup() {
        let doc = load("<div><p>unclosed");
        let sel = Selector::parse("p").unwrap();
        assert_eq!(doc.select(&sel).count(), 1);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://komiku.id", "/manga/one-piece").unwrap(),
            "https://komiku.id/manga/one-piece"
        );
        // Absolute paths pass through without double-prefixing
        assert_eq!(
            join_url("https://komiku.id", "https://kiryuu.id/manga/x").unwrap(),
            "https://kiryuu.id/manga/x"
        );
    }

    #[test]
    fn test_relativize() {
        assert_eq!(
            relativize("https://komiku.id", "https://komiku.id/manga/one-piece/"),
            "/manga/one-piece/"
        );
        assert_eq!(relativize("https://komiku.id", "/already/relative"), "/already/relative");
    }
}
