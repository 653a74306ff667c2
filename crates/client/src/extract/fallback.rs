//! Whole-region link sweep, used only when no download block yields links.
//!
//! Each accepted link becomes its own single-link group whose metadata is
//! read from the text around the link.

use marquee_core::ServerGroup;

use super::dom::{ContentRegion, absolute_href, parent_element, prev_element, text, trimmed_text};
use super::patterns::{ANCHOR, is_download_candidate, quality_of, size_of};
use super::walker::link_record;

/// Server name for fallback links with no readable text.
pub const FALLBACK_SERVER_NAME: &str = "Download Link";

/// Label length cap, in characters.
pub const MAX_LABEL_CHARS: usize = 100;

pub fn scan_links(region: &ContentRegion<'_>) -> Vec<ServerGroup> {
    let mut groups = Vec::new();

    for anchor in region.select(&ANCHOR) {
        if absolute_href(&anchor).is_none() {
            continue;
        }

        let link_text = trimmed_text(&anchor);
        let parent_text = parent_element(&anchor).map(|p| text(&p)).unwrap_or_default();
        if !is_download_candidate(&link_text) && !is_download_candidate(&parent_text) {
            continue;
        }

        let Some(link) = link_record(&anchor, FALLBACK_SERVER_NAME) else {
            continue;
        };

        let prev_text = prev_element(&anchor).map(|p| text(&p)).unwrap_or_default();
        let surrounding = format!("{parent_text} {prev_text}");

        groups.push(ServerGroup {
            label: context_label(&surrounding),
            quality: quality_of(&surrounding),
            size: size_of(&surrounding),
            links: vec![link],
        });
    }

    groups
}

fn context_label(surrounding: &str) -> String {
    let label: String = surrounding.chars().take(MAX_LABEL_CHARS).collect();
    let label = label.trim();
    if label.is_empty() { "Download".to_string() } else { label.to_string() }
}
