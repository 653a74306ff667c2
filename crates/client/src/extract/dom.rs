//! Small helpers over the `scraper` tree.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::patterns::CONTENT_REGION;

/// The part of the page believed to hold the article body.
///
/// A page may expose several matching containers, some nested in others.
/// Selections run over all of them at once and come back in document order
/// without duplicates.
pub struct ContentRegion<'a> {
    document: &'a Html,
    roots: Vec<ElementRef<'a>>,
}

impl<'a> ContentRegion<'a> {
    pub fn locate(document: &'a Html) -> Self {
        let roots = document.select(&CONTENT_REGION).collect();
        Self { document, roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Descendants of any region root that match `selector`.
    pub fn select(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        if self.roots.is_empty() {
            return Vec::new();
        }
        self.document
            .select(selector)
            .filter(|el| el.ancestors().any(|a| self.roots.iter().any(|root| root.id() == a.id())))
            .collect()
    }
}

/// Concatenated text of an element and its descendants.
pub fn text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn trimmed_text(el: &ElementRef<'_>) -> String {
    text(el).trim().to_string()
}

pub fn is_tag(el: &ElementRef<'_>, names: &[&str]) -> bool {
    names.contains(&el.value().name())
}

pub fn next_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

pub fn prev_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.prev_siblings().find_map(ElementRef::wrap)
}

pub fn parent_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}

/// Attribute value, treating blank values as missing.
pub fn attr<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name).map(str::trim).filter(|v| !v.is_empty())
}

/// The element's `href` when it is an absolute http(s) URL.
///
/// Relative, malformed and non-web hrefs yield `None`.
pub fn absolute_href<'a>(el: &ElementRef<'a>) -> Option<&'a str> {
    let href = attr(el, "href")?;
    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::patterns::{ANCHOR, PARAGRAPH};

    #[test]
    fn test_region_dedups_nested_containers() {
        let html = r#"
            <html><body>
                <article><div class="entry-content">
                    <p>one</p><p>two</p>
                </div></article>
                <p>outside</p>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let region = ContentRegion::locate(&doc);
        let texts: Vec<String> = region.select(&PARAGRAPH).iter().map(trimmed_text).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_region_missing() {
        let doc = Html::parse_document("<html><body><p>loose</p></body></html>");
        let region = ContentRegion::locate(&doc);
        assert!(region.is_empty());
        assert!(region.select(&PARAGRAPH).is_empty());
    }

    #[test]
    fn test_absolute_href() {
        let html = r#"
            <a href="https://host/a">ok</a>
            <a href="/relative">rel</a>
            <a href="javascript:void(0)">js</a>
            <a href="  http://host/b  ">padded</a>
            <a>none</a>
        "#;
        let doc = Html::parse_fragment(html);
        let hrefs: Vec<Option<&str>> = doc.select(&ANCHOR).map(|a| absolute_href(&a)).collect();
        assert_eq!(hrefs, vec![Some("https://host/a"), None, None, Some("http://host/b"), None]);
    }

    #[test]
    fn test_sibling_navigation_skips_text_nodes() {
        let doc = Html::parse_fragment("<div><h3>a</h3> text <p>b</p></div>");
        let sel = Selector::parse("h3").unwrap();
        let h3 = doc.select(&sel).next().unwrap();
        let next = next_element(&h3).unwrap();
        assert_eq!(next.value().name(), "p");
        assert_eq!(prev_element(&next).map(|e| trimmed_text(&e)), Some("a".to_string()));
        assert_eq!(parent_element(&h3).map(|e| e.value().name().to_string()), Some("div".into()));
    }
}
