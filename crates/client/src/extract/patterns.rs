//! Regex vocabulary and CSS selectors shared by the extraction stages.
//!
//! The block segmenter and the fallback link scanner both read quality and
//! size through [`quality_of`] and [`size_of`], so the two paths always agree
//! on what a `720p` or a `[1.4GB]` looks like.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

/// Bracketed file size, e.g. `[750MB]` or `[ 1.4 GB ]`.
pub static SIZE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[\s*\d+(?:\.\d+)?\s*(?:MB|GB)\s*\]").expect("SIZE_TAG regex"));

/// Bare file size without brackets, e.g. `700 MB`.
pub static SIZE_EXPR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+(?:\.\d+)?\s*(?:MB|GB)").expect("SIZE_EXPR regex"));

/// Explicit `<digits>p` resolution token.
pub static QUALITY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+p)\b").expect("QUALITY_TOKEN regex"));

/// Fixed set of resolution labels, checked when no `<digits>p` token exists.
pub static KNOWN_RESOLUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(480p|720p|1080p|2160p|4K)").expect("KNOWN_RESOLUTION regex"));

/// Loose resolution hint used when classifying fallback links.
pub static RESOLUTION_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\d+p").expect("RESOLUTION_HINT regex"));

pub static SERIES_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)series\s+name|season|episode").expect("SERIES_MARKER regex"));

/// Matches `Synopsis`, `SYNOPSIS/PLOT`, `synopsis:` and friends.
pub static SYNOPSIS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)synopsis").expect("SYNOPSIS_MARKER regex"));

pub static DOWNLOAD_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)download|server|click\s*here|episode").expect("DOWNLOAD_MARKER regex"));

/// Marker keyword plus any trailing `~decoration` in a title heading.
pub static TITLE_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)download|~.*$").expect("TITLE_DECORATION regex"));

/// Substrings that disqualify a paragraph from being picked as the synopsis.
pub const SYNOPSIS_EXCLUDED: &[&str] = &["Download", "Screenshot"];

/// Image sources containing any of these are decorative and skipped.
pub const EXCLUDED_IMAGE_MARKERS: &[&str] = &["emoji"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid selector")
}

/// Containers that hold the article body.
pub static CONTENT_REGION: LazyLock<Selector> =
    LazyLock::new(|| selector(".entry-content, .post-inner, .post-body, article"));
pub static TITLE_HEADING: LazyLock<Selector> =
    LazyLock::new(|| selector("h1.entry-title, h1.post-title, .title h1"));
pub static PAGE_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
pub static MARKER_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
pub static SYNOPSIS_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3, h4, strong"));
pub static SERIES_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3, strong"));
pub static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("img"));
pub static BLOCK_OPENER: LazyLock<Selector> = LazyLock::new(|| selector("h3, h4, h5, h6, p"));
pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
/// Elements inside a link that may carry its label.
pub static LINK_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("button, span, strong"));

/// Heading tags that can close a download block.
pub const BOUNDARY_TAGS: &[&str] = &["h3", "h4", "h5", "h6"];

/// Resolution token in `text`: the first `<digits>p`, else a known label.
pub fn quality_of(text: &str) -> String {
    QUALITY_TOKEN
        .captures(text)
        .or_else(|| KNOWN_RESOLUTION.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// File size in `text` with brackets removed, e.g. `[ 1.4GB ]` becomes `1.4GB`.
///
/// Bracketed tags win over bare sizes.
pub fn size_of(text: &str) -> String {
    if let Some(m) = SIZE_TAG.find(text) {
        return m.as_str().replace(['[', ']'], "").trim().to_string();
    }
    SIZE_EXPR.find(text).map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

/// Whether `text` looks like it belongs to a download link.
pub fn is_download_candidate(text: &str) -> bool {
    DOWNLOAD_MARKER.is_match(text) || RESOLUTION_HINT.is_match(text) || SIZE_EXPR.is_match(text)
}
