//! Fetch-then-extract for a single listing page.

use marquee_core::{ContentRecord, Error};

use crate::extract::Extractor;
use crate::fetch::DocumentFetcher;

/// Fetch the page named by `page_id` and extract its record.
///
/// The extractor only runs when the fetch succeeded.
pub async fn scrape_detail(
    fetcher: &dyn DocumentFetcher, extractor: &dyn Extractor, page_id: &str,
) -> Result<ContentRecord, Error> {
    let markup = fetcher.fetch_markup(page_id).await.inspect_err(|e| {
        tracing::warn!(page_id, error = %e, "listing page unavailable");
    })?;
    extractor.extract(&markup)
}
