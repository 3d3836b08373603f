use crate::blacklist::Blacklist;
use crate::config::ScraperConfig;
use crate::detail::extract_detail;
use crate::document::get_html;
use crate::error::ScrapeError;
use crate::http_client::HtmlSource;
use crate::list::extract_comics;
use crate::models::{ComicDetail, ComicSummary, PageSet};
use crate::pages::{extract_pages, placeholder_page_set};
use crate::registry::{DomainDescriptor, DomainRegistry};
use std::time::Duration;
use tokio::time::sleep;

/// Listing query parameters.
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub search_term: Option<String>,
}

impl ListQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
        }
    }

    fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Domain-fallback orchestrator.
///
/// Walks the active domains in registry order for each operation and takes
/// the first usable result. Domains are tried one at a time, never in
/// parallel, with a courtesy delay between successive attempts. All
/// per-domain failures are contained here; only total exhaustion on
/// detail/pages surfaces as `ScrapeError::NoDomainAvailable`.
pub struct Scraper<S: HtmlSource> {
    source: S,
    registry: DomainRegistry,
    blacklist: Blacklist,
    config: ScraperConfig,
}

impl<S: HtmlSource> Scraper<S> {
    pub fn new(
        source: S,
        registry: DomainRegistry,
        blacklist: Blacklist,
        config: ScraperConfig,
    ) -> Self {
        Self {
            source,
            registry,
            blacklist,
            config,
        }
    }

    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    async fn courtesy_delay(&self, attempt: usize) {
        if attempt > 0 && self.config.rate_limit_delay_ms > 0 {
            sleep(Duration::from_millis(self.config.rate_limit_delay_ms)).await;
        }
    }

    async fn list_from_domain(
        &self,
        domain: &DomainDescriptor,
        path: &str,
    ) -> Vec<ComicSummary> {
        match get_html(&self.source, domain.base_url, path).await {
            Some(doc) => extract_comics(&doc, domain, &self.blacklist).comics,
            None => Vec::new(),
        }
    }

    /// List or search comics. Best-effort: never errors, returns an empty
    /// sequence when every domain fails.
    ///
    /// The first domain yielding at least one valid record wins and later
    /// domains are not consulted. If a search misses on every domain, a
    /// second pass aggregates each domain's default listing instead, so
    /// callers still get something to show.
    pub async fn list_comics(
        &self,
        query: &ListQuery,
        max_results: Option<i64>,
    ) -> Vec<ComicSummary> {
        let limit = self.config.clamp_limit(max_results);
        let term = query.term();

        for (i, domain) in self.registry.active_domains().enumerate() {
            self.courtesy_delay(i).await;
            let path = match term {
                Some(q) => domain.config.search_path(q),
                None => domain.config.list_path().to_string(),
            };
            let mut comics = self.list_from_domain(domain, &path).await;
            if !comics.is_empty() {
                log::info!("list: {} won with {} records", domain.name, comics.len());
                comics.truncate(limit);
                return comics;
            }
            log::warn!("list: {} yielded nothing, advancing", domain.name);
        }

        // Every domain came up empty. For searches, fall back to
        // aggregating default listings across all domains.
        let Some(q) = term else {
            log::warn!("list: all domains exhausted, returning empty");
            return Vec::new();
        };
        log::warn!("list: search '{}' missed everywhere, aggregating listings", q);

        let mut accumulated: Vec<ComicSummary> = Vec::new();
        for (i, domain) in self.registry.active_domains().enumerate() {
            self.courtesy_delay(i).await;
            let path = domain.config.list_path().to_string();
            accumulated.extend(self.list_from_domain(domain, &path).await);
            if accumulated.len() >= limit {
                break;
            }
        }
        accumulated.truncate(limit);
        accumulated
    }

    /// Comic detail from the first domain whose page parses to a titled
    /// record. Errors only when every active domain fails.
    pub async fn get_comic_detail(&self, path: &str) -> Result<ComicDetail, ScrapeError> {
        for (i, domain) in self.registry.active_domains().enumerate() {
            self.courtesy_delay(i).await;
            let detail = match get_html(&self.source, domain.base_url, path).await {
                Some(doc) => extract_detail(&doc, domain),
                None => None,
            };
            match detail {
                Some(d) => {
                    log::info!("detail: {} supplied {}", domain.name, d.title);
                    return Ok(d);
                }
                None => log::warn!("detail: {} yielded nothing, advancing", domain.name),
            }
        }
        Err(ScrapeError::NoDomainAvailable(path.to_string()))
    }

    /// Reader pages from the first domain producing at least one image.
    ///
    /// A domain that parses the chapter shell but has no usable images is
    /// remembered; if every domain ends up imageless, that shell is
    /// returned with a single synthetic placeholder page. Errors only when
    /// no domain produced anything at all.
    pub async fn get_comic_pages(&self, path: &str) -> Result<PageSet, ScrapeError> {
        let mut shell: Option<PageSet> = None;

        for (i, domain) in self.registry.active_domains().enumerate() {
            self.courtesy_delay(i).await;
            let set = match get_html(&self.source, domain.base_url, path).await {
                Some(doc) => extract_pages(&doc, domain),
                None => None,
            };
            match set {
                Some(set) if !set.is_empty() => {
                    log::info!(
                        "pages: {} supplied {} pages for {}",
                        domain.name,
                        set.pages.len(),
                        set.title
                    );
                    return Ok(set);
                }
                Some(set) => {
                    log::warn!("pages: {} parsed shell but no images, advancing", domain.name);
                    shell.get_or_insert(set);
                }
                None => log::warn!("pages: {} yielded nothing, advancing", domain.name),
            }
        }

        if let Some(mut set) = shell {
            log::warn!("pages: all domains imageless, emitting placeholder for {}", set.title);
            set.pages = placeholder_page_set(&set.title).pages;
            return Ok(set);
        }
        Err(ScrapeError::NoDomainAvailable(path.to_string()))
    }
}
