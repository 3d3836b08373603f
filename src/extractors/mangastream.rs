use super::{attr_of, clamp_rating, parse_number, text_of, ExtractionConfig, Family};
use crate::document::relativize;
use scraper::ElementRef;

/// MangaStream-theme listing layout (`.listupd` grids of `.bsx` cards),
/// shared by several sites that differ only in small parameters.
pub struct MangaStreamConfig {
    list_selector: &'static str,
    /// Selector for the rating badge, if the site shows one on cards.
    rating_selector: Option<&'static str>,
    /// Thumbnail size rewrite applied to cover URLs, e.g. 225x320 -> 160x227.
    thumb_resize: Option<(&'static str, &'static str)>,
    /// Query-string suffix after `/?s=<query>`.
    search_suffix: &'static str,
    /// Fall back to the cover's `alt` text when the link has no title attr.
    title_from_img_alt: bool,
}

impl MangaStreamConfig {
    pub fn kiryuu() -> Self {
        Self {
            list_selector: ".daftar > .bixbox > .listupd > .bsx, .listupd > .bsx",
            rating_selector: Some(".num"),
            thumb_resize: Some(("/225/", "/160/")),
            search_suffix: "&post_type=manga",
            title_from_img_alt: false,
        }
    }

    pub fn shinigami() -> Self {
        Self {
            list_selector: ".listupd > .bsx",
            rating_selector: Some(".rating i"),
            thumb_resize: Some(("/225x320/", "/160x227/")),
            search_suffix: "&post_type=wp-manga",
            title_from_img_alt: false,
        }
    }

    pub fn sektekomik() -> Self {
        Self {
            list_selector: ".listupd > .bsx",
            rating_selector: Some(".num"),
            thumb_resize: Some(("/225x320/", "/160x227/")),
            search_suffix: "&post_type=wp-manga",
            title_from_img_alt: false,
        }
    }

    pub fn komikcast() -> Self {
        Self {
            list_selector: ".listupd .bsx",
            rating_selector: None,
            thumb_resize: Some(("225x320", "160x227")),
            search_suffix: "",
            title_from_img_alt: true,
        }
    }
}

impl ExtractionConfig for MangaStreamConfig {
    fn family(&self) -> Family {
        Family::MangaStream
    }

    fn list_selector(&self) -> &str {
        self.list_selector
    }

    fn title(&self, node: ElementRef) -> String {
        if let Some(t) = attr_of(node, "a", "title") {
            let t = t.trim().to_string();
            if !t.is_empty() {
                return t;
            }
        }
        if self.title_from_img_alt {
            if let Some(alt) = attr_of(node, "img", "alt") {
                return alt.trim().to_string();
            }
        }
        String::new()
    }

    fn thumb(&self, node: ElementRef) -> String {
        let src = attr_of(node, "img", "src")
            .or_else(|| attr_of(node, "img", "data-src"))
            .unwrap_or_default();
        match self.thumb_resize {
            Some((from, to)) => src.replace(from, to),
            None => src,
        }
    }

    fn details(&self, node: ElementRef, base: &str) -> String {
        match attr_of(node, "a", "href") {
            Some(href) => relativize(base, &href),
            None => String::new(),
        }
    }

    fn chapter_count(&self, node: ElementRef) -> f64 {
        parse_number(&text_of(node, ".epxs"))
    }

    fn comic_type(&self, node: ElementRef) -> String {
        let t = text_of(node, ".type");
        if t.is_empty() {
            "Manga".to_string()
        } else {
            t
        }
    }

    fn rating(&self, node: ElementRef) -> f64 {
        match self.rating_selector {
            Some(sel) => clamp_rating(parse_number(&text_of(node, sel))),
            None => 0.0,
        }
    }

    fn search_path(&self, query: &str) -> String {
        format!("/?s={}{}", urlencoding::encode(query), self.search_suffix)
    }
}
