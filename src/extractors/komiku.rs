use super::{attr_of, parse_number, text_of, ExtractionConfig, Family};
use crate::document::relativize;
use scraper::ElementRef;

/// Komiku-family listing layout: each card is an `<a>` wrapping the cover
/// and an `<h3>` title, with the chapter count in a `.kan` block. Cards
/// carry no rating.
pub struct KomikuConfig;

impl ExtractionConfig for KomikuConfig {
    fn family(&self) -> Family {
        Family::Komiku
    }

    fn list_selector(&self) -> &str {
        ".daftar > .daftar > .bge > a, .bge > a"
    }

    fn title(&self, node: ElementRef) -> String {
        text_of(node, "h3")
    }

    fn thumb(&self, node: ElementRef) -> String {
        // Lazy-loaded covers put the real URL in data-src
        attr_of(node, "img", "data-src")
            .or_else(|| attr_of(node, "img", "src"))
            .unwrap_or_default()
    }

    fn details(&self, node: ElementRef, base: &str) -> String {
        match node.value().attr("href") {
            Some(href) => relativize(base, href),
            None => String::new(),
        }
    }

    fn chapter_count(&self, node: ElementRef) -> f64 {
        parse_number(&text_of(node, ".kan"))
    }

    fn comic_type(&self, node: ElementRef) -> String {
        let t = text_of(node, ".tpe1_inf b");
        if t.is_empty() {
            "Manga".to_string()
        } else {
            t
        }
    }

    fn rating(&self, _node: ElementRef) -> f64 {
        0.0
    }

    fn search_path(&self, query: &str) -> String {
        format!("/manga/?s={}", urlencoding::encode(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    const CARD: &str = r#"
        <div class="daftar"><div class="daftar">
          <div class="bge"><a href="https://komiku.id/manga/one-piece/">
            <img data-src="https://cdn.komiku.id/op.jpg" src="/blank.gif">
            <h3> One Piece </h3>
            <div class="kan">Ch. 1052</div>
          </a></div>
        </div></div>
    "#;

    fn first_card(doc: &Html) -> ElementRef<'_> {
        let sel = Selector::parse(".bge > a").unwrap();
        doc.select(&sel).next().unwrap()
    }

    #[test]
    fn test_komiku_card_fields() {
        let doc = Html::parse_document(CARD);
        let node = first_card(&doc);
        let cfg = KomikuConfig;

        assert_eq!(cfg.title(node), "One Piece");
        assert_eq!(cfg.thumb(node), "https://cdn.komiku.id/op.jpg");
        assert_eq!(cfg.details(node, "https://komiku.id"), "/manga/one-piece/");
        assert_eq!(cfg.chapter_count(node), 1052.0);
        assert_eq!(cfg.comic_type(node), "Manga");
        assert_eq!(cfg.rating(node), 0.0);
    }

    #[test]
    fn test_search_path_encodes_query() {
        let cfg = KomikuConfig;
        assert_eq!(cfg.search_path("one piece"), "/manga/?s=one%20piece");
    }
}
