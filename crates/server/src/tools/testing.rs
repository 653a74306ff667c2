//! In-memory fetcher for tool tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use marquee_client::DocumentFetcher;
use marquee_core::Error;

#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubFetcher {
    pub fn with_page(id: &str, html: &str) -> Self {
        Self::default().page(id, html)
    }

    pub fn page(mut self, id: &str, html: &str) -> Self {
        self.pages.insert(id.to_string(), html.to_string());
        self
    }

    /// Number of `fetch_markup` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch_markup(&self, page_id: &str) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| Error::SourceUnavailable(format!("status 404 for {page_id}")))
    }
}
