//! Forward sibling walk that gathers the links of one download block.
//!
//! The walk starts at the element right after the block opener and visits
//! element siblings one at a time. It stops at the first heading that opens
//! another block, after `max_hops` visits, or when siblings run out. Links
//! gathered before stopping are kept in every case.

use marquee_core::LinkRecord;
use scraper::ElementRef;

use super::dom::{absolute_href, is_tag, next_element, trimmed_text};
use super::patterns::{ANCHOR, LINK_LABEL};
use super::segment::is_boundary;

/// Server name used when a link carries no readable text.
pub const DEFAULT_SERVER_NAME: &str = "Download";

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The next sibling opens its own block; it was not consumed.
    BoundaryHit,
    HopLimitHit,
    NoMoreSiblings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Scanning,
    Done(WalkOutcome),
}

/// Per-block walk state.
pub struct SiblingWalker<'a> {
    cursor: Option<ElementRef<'a>>,
    hops: usize,
    max_hops: usize,
    state: WalkState,
    links: Vec<LinkRecord>,
}

impl<'a> SiblingWalker<'a> {
    pub fn new(opener: &ElementRef<'a>, max_hops: usize) -> Self {
        Self { cursor: next_element(opener), hops: 0, max_hops, state: WalkState::Scanning, links: Vec::new() }
    }

    /// Visit one sibling. Returns the outcome once the walk has finished.
    pub fn step(&mut self) -> Option<WalkOutcome> {
        if let WalkState::Done(outcome) = self.state {
            return Some(outcome);
        }

        let Some(sibling) = self.cursor else {
            return Some(self.finish(WalkOutcome::NoMoreSiblings));
        };
        if self.hops >= self.max_hops {
            return Some(self.finish(WalkOutcome::HopLimitHit));
        }
        self.hops += 1;

        if is_boundary(&sibling) {
            return Some(self.finish(WalkOutcome::BoundaryHit));
        }

        self.links.extend(links_in(&sibling, DEFAULT_SERVER_NAME));
        self.cursor = next_element(&sibling);
        None
    }

    /// Step until finished, returning the gathered links and why the walk stopped.
    pub fn run(mut self) -> (Vec<LinkRecord>, WalkOutcome) {
        loop {
            if let Some(outcome) = self.step() {
                return (self.links, outcome);
            }
        }
    }

    pub fn hops(&self) -> usize {
        self.hops
    }

    fn finish(&mut self, outcome: WalkOutcome) -> WalkOutcome {
        self.state = WalkState::Done(outcome);
        outcome
    }
}

/// Links inside `el`, followed by `el` itself when it is an anchor.
pub fn links_in(el: &ElementRef<'_>, placeholder: &str) -> Vec<LinkRecord> {
    let mut links: Vec<LinkRecord> = el.select(&ANCHOR).filter_map(|a| link_record(&a, placeholder)).collect();
    if is_tag(el, &["a"])
        && let Some(link) = link_record(el, placeholder)
    {
        links.push(link);
    }
    links
}

/// Build a link record from an anchor with an absolute href.
///
/// The server name is the anchor's own text, then the text of a nested
/// button or label, then `placeholder`.
pub fn link_record(anchor: &ElementRef<'_>, placeholder: &str) -> Option<LinkRecord> {
    let Some(url) = absolute_href(anchor) else {
        tracing::trace!(href = anchor.value().attr("href"), "skipping non-absolute link");
        return None;
    };
    Some(LinkRecord { url: url.to_string(), server_name: server_name(anchor, placeholder) })
}

fn server_name(anchor: &ElementRef<'_>, placeholder: &str) -> String {
    let own = trimmed_text(anchor);
    if !own.is_empty() {
        return own;
    }
    let nested: String = anchor.select(&LINK_LABEL).map(|el| trimmed_text(&el)).collect();
    if !nested.is_empty() {
        return nested;
    }
    placeholder.to_string()
}
