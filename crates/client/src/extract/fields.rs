//! Field resolvers for title, synopsis, content type and images.
//!
//! Title and synopsis are each an ordered list of strategies. Strategies are
//! plain functions over the parsed [`Page`]; the first one to produce a
//! non-empty string wins. The resolvers never look at each other's output.

use marquee_core::ContentType;

use super::Page;
use super::dom::{attr, is_tag, next_element, text, trimmed_text};
use super::patterns::{
    EXCLUDED_IMAGE_MARKERS, IMAGE, MARKER_HEADING, PAGE_TITLE, PARAGRAPH, SERIES_HEADING, SERIES_MARKER,
    SYNOPSIS_EXCLUDED, SYNOPSIS_HEADING, SYNOPSIS_MARKER, TITLE_DECORATION, TITLE_HEADING,
};

/// A single way of deriving a field from the page.
pub type Strategy = fn(&Page<'_>) -> Option<String>;

/// Title strategies, most specific first.
pub const TITLE_STRATEGIES: &[(&str, Strategy)] = &[
    ("download_heading", title_from_download_heading),
    ("title_heading", title_from_heading),
    ("document_title", title_from_document),
];

pub const SYNOPSIS_STRATEGIES: &[(&str, Strategy)] = &[
    ("synopsis_heading", synopsis_from_marker),
    ("long_paragraph", synopsis_from_paragraphs),
];

/// Run `strategies` in order and return the first non-empty result.
///
/// Returns an empty string when every strategy misses.
pub fn resolve(field: &str, strategies: &[(&str, Strategy)], page: &Page<'_>) -> String {
    for (name, strategy) in strategies {
        if let Some(value) = strategy(page)
            && !value.is_empty()
        {
            tracing::debug!(field, strategy = name, "field resolved");
            return value;
        }
    }
    tracing::debug!(field, "no strategy produced a value");
    String::new()
}

pub fn resolve_title(page: &Page<'_>) -> String {
    resolve("title", TITLE_STRATEGIES, page)
}

pub fn resolve_synopsis(page: &Page<'_>) -> String {
    resolve("synopsis", SYNOPSIS_STRATEGIES, page)
}

/// First `h3` in the content region mentioning a download, minus the marker
/// keyword and anything after a `~`.
fn title_from_download_heading(page: &Page<'_>) -> Option<String> {
    let heading = page
        .region
        .select(&MARKER_HEADING)
        .into_iter()
        .find(|h| text(h).to_lowercase().contains("download"))?;
    let raw = text(&heading);
    Some(TITLE_DECORATION.replace_all(&raw, "").trim().to_string())
}

fn title_from_heading(page: &Page<'_>) -> Option<String> {
    page.document.select(&TITLE_HEADING).next().map(|h| trimmed_text(&h))
}

/// `<title>` up to the first `|`.
fn title_from_document(page: &Page<'_>) -> Option<String> {
    let title = page.document.select(&PAGE_TITLE).next()?;
    let raw = text(&title);
    raw.split('|').next().map(|s| s.trim().to_string())
}

/// Paragraph immediately after a heading or bold label reading "Synopsis".
fn synopsis_from_marker(page: &Page<'_>) -> Option<String> {
    page.region
        .select(&SYNOPSIS_HEADING)
        .into_iter()
        .filter(|el| SYNOPSIS_MARKER.is_match(&text(el)))
        .filter_map(|el| next_element(&el))
        .filter(|next| is_tag(next, &["p"]))
        .map(|p| trimmed_text(&p))
        .find(|s| !s.is_empty())
}

/// First long paragraph that is not part of the download or screenshot sections.
fn synopsis_from_paragraphs(page: &Page<'_>) -> Option<String> {
    let min_chars = page.config.synopsis_min_chars;
    page.region.select(&PARAGRAPH).into_iter().find_map(|p| {
        let raw = text(&p);
        let long_enough = raw.chars().count() > min_chars;
        let excluded = SYNOPSIS_EXCLUDED.iter().any(|needle| raw.contains(needle));
        (long_enough && !excluded).then(|| raw.trim().to_string())
    })
}

/// `Series` when the region names a season, an episode or a series.
pub fn detect_content_type(page: &Page<'_>) -> ContentType {
    let is_series = page
        .region
        .select(&SERIES_HEADING)
        .iter()
        .any(|el| SERIES_MARKER.is_match(&text(el)));
    if is_series { ContentType::Series } else { ContentType::Movie }
}

/// Image sources in the content region, in document order.
///
/// `src` is preferred over the lazy-load `data-src`.
pub fn collect_images(page: &Page<'_>) -> Vec<String> {
    page.region
        .select(&IMAGE)
        .iter()
        .filter_map(|img| attr(img, "src").or_else(|| attr(img, "data-src")))
        .filter(|src| {
            let lower = src.to_lowercase();
            !EXCLUDED_IMAGE_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .map(str::to_string)
        .collect()
}
