use serde::{Deserialize, Serialize};

/// One comic card from a listing or search result page.
///
/// Identity fields (`title`, `details`) are guaranteed non-empty: records
/// that fail that check are dropped during extraction, never returned.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ComicSummary {
    pub comic_type: String,
    pub title: String,
    pub thumb: String,
    /// Site-relative detail path, e.g. `/manga/one-piece`.
    pub details: String,
    pub chapters: f64,
    /// Clamped to 0..=10.
    pub rating: f64,
    /// Path segment used for blacklist matching.
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChapterRef {
    pub title: String,
    pub path: String,
    pub number: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ComicDetail {
    pub title: String,
    pub thumb: String,
    pub description: String,
    pub genres: Vec<String>,
    pub status: String,
    pub released: String,
    pub author: String,
    pub comic_type: String,
    pub rating: f64,
    /// Sorted descending by `number`, at most 50 entries.
    pub chapters: Vec<ChapterRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageImage {
    pub src: String,
    pub page: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Pagination {
    pub prev: Option<String>,
    pub next: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageSet {
    pub title: String,
    pub pagination: Pagination,
    pub pages: Vec<PageImage>,
}

impl PageSet {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
