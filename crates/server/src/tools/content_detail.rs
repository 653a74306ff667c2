//! content_detail tool implementation.
//!
//! Resolves a listing URL or post id, fetches the page and extracts its record.

use chrono::Utc;
use marquee_client::{DocumentFetcher, Extractor, scrape_detail};
use marquee_core::{ContentRecord, Error};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for content_detail tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentDetailParams {
    /// Full listing URL or just the post id.
    pub url: String,
}

/// Output structure for content_detail tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentDetailOutput {
    /// The URL or post id as requested.
    pub source: String,
    /// ISO8601 timestamp of when the page was fetched.
    pub fetched_at: String,
    #[serde(flatten)]
    pub record: ContentRecord,
}

/// Fetch and extract one listing page.
pub async fn detail_record(
    fetcher: &dyn DocumentFetcher, extractor: &dyn Extractor, params: ContentDetailParams,
) -> Result<ContentDetailOutput, Error> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url parameter is required (full URL or post id)".into()));
    }

    let record = scrape_detail(fetcher, extractor, &params.url).await?;
    let fetched_at = Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    Ok(ContentDetailOutput { source: params.url, fetched_at, record })
}

/// Implementation of the content_detail tool.
pub async fn detail_impl(
    fetcher: &dyn DocumentFetcher, extractor: &dyn Extractor, params: ContentDetailParams,
) -> Result<CallToolResult, McpError> {
    let output = detail_record(fetcher, extractor, params).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
