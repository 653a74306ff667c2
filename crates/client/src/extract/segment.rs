//! Download block segmentation.
//!
//! A block opens at any heading or paragraph whose text carries a bracketed
//! size tag. The block's label, quality and size all come from that one
//! element's text.

use scraper::ElementRef;

use super::dom::{ContentRegion, is_tag, text, trimmed_text};
use super::patterns::{BLOCK_OPENER, BOUNDARY_TAGS, SIZE_TAG, quality_of, size_of};

/// An opened download block, before its links are collected.
#[derive(Debug, Clone)]
pub struct DownloadBlock<'a> {
    /// Element carrying the size tag; links are searched in its following siblings.
    pub opener: ElementRef<'a>,
    pub label: String,
    pub quality: String,
    pub size: String,
}

impl<'a> DownloadBlock<'a> {
    fn open(opener: ElementRef<'a>) -> Self {
        let label = trimmed_text(&opener);
        let quality = quality_of(&label);
        let size = size_of(&label);
        Self { opener, label, quality, size }
    }
}

/// Every block opener in the region, in document order.
pub fn find_blocks<'a>(region: &ContentRegion<'a>) -> Vec<DownloadBlock<'a>> {
    region
        .select(&BLOCK_OPENER)
        .into_iter()
        .filter(|el| SIZE_TAG.is_match(&text(el)))
        .map(DownloadBlock::open)
        .collect()
}

/// A heading that opens a block of its own and so ends the previous one.
///
/// Paragraph openers do not end a walk.
pub fn is_boundary(el: &ElementRef<'_>) -> bool {
    is_tag(el, BOUNDARY_TAGS) && SIZE_TAG.is_match(&text(el))
}
