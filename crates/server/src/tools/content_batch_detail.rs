//! content_batch_detail tool implementation.
//!
//! Fetches and extracts multiple listing pages in parallel with bounded concurrency.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use marquee_client::{DocumentFetcher, Extractor};
use marquee_core::{AppConfig, Error};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::tools::content_detail::{ContentDetailOutput, ContentDetailParams, detail_record};

/// Hard cap on concurrent fetches regardless of request or config.
const MAX_CONCURRENCY: usize = 16;

/// Input parameters for content_batch_detail tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ContentBatchDetailParams {
    /// Listing URLs or post ids.
    pub urls: Vec<String>,

    /// Maximum number of concurrent requests (default: from config, max: 16).
    #[serde(default)]
    pub max_concurrency: Option<u8>,

    /// Fail fast: dispatch no further pages after the first error (default: false).
    /// Pages already in flight still finish and are reported.
    #[serde(default)]
    pub fail_fast: bool,
}

/// Batch item status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum BatchItemStatus {
    Success,
    Failed,
}

/// Individual batch result item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchItem {
    /// The URL or post id as requested.
    pub url: String,
    pub status: BatchItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ContentDetailOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Batch summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BatchSummary {
    pub total: u32,
    pub succeeded: u32,
    pub failed: u32,
}

/// Output structure for content_batch_detail tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentBatchDetailOutput {
    /// Individual results, in input order.
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}

/// Run the batch and collect per-page results.
pub async fn batch_records(
    fetcher: Arc<dyn DocumentFetcher>, extractor: Arc<dyn Extractor>, config: &AppConfig,
    params: ContentBatchDetailParams,
) -> Result<ContentBatchDetailOutput, McpError> {
    if params.urls.is_empty() {
        return Err(Error::InvalidInput("urls cannot be empty".into()).into());
    }

    let max_concurrency = params
        .max_concurrency
        .map(usize::from)
        .unwrap_or(config.max_concurrency)
        .min(MAX_CONCURRENCY);
    if max_concurrency == 0 {
        return Err(Error::InvalidInput("max_concurrency must be at least 1".into()).into());
    }

    let semaphore = Arc::new(Semaphore::new(max_concurrency));
    let stop = Arc::new(AtomicBool::new(false));
    let mut join_set = JoinSet::new();

    for (index, url) in params.urls.iter().cloned().enumerate() {
        if stop.load(Ordering::Acquire) {
            break;
        }
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        if stop.load(Ordering::Acquire) {
            break;
        }
        let fetcher = Arc::clone(&fetcher);
        let extractor = Arc::clone(&extractor);
        let task_stop = params.fail_fast.then(|| Arc::clone(&stop));

        join_set.spawn(async move {
            // NOTE: Hold permit for task duration to enforce concurrency limit
            let _permit = permit;
            if task_stop.as_ref().is_some_and(|s| s.load(Ordering::Acquire)) {
                return None;
            }
            let result =
                detail_record(fetcher.as_ref(), extractor.as_ref(), ContentDetailParams { url: url.clone() }).await;
            // Raised before the permit drops so the dispatcher sees it on its next acquire.
            if result.is_err()
                && let Some(task_stop) = task_stop
            {
                task_stop.store(true, Ordering::Release);
            }
            Some((index, url, result))
        });
    }

    let mut results: Vec<(usize, BatchItem)> = Vec::with_capacity(params.urls.len());
    let mut succeeded = 0u32;
    let mut failed = 0u32;

    while let Some(joined) = join_set.join_next().await {
        let Some((index, url, task_result)) = joined.map_err(|e| McpError::internal_error(e.to_string(), None))?
        else {
            continue;
        };

        let item = match task_result {
            Ok(output) => {
                succeeded += 1;
                BatchItem { url, status: BatchItemStatus::Success, result: Some(output), error: None }
            }
            Err(e) => {
                failed += 1;
                BatchItem { url, status: BatchItemStatus::Failed, result: None, error: Some(e.to_string()) }
            }
        };
        results.push((index, item));
    }

    if params.fail_fast && failed > 0 {
        tracing::warn!(skipped = params.urls.len() - results.len(), "batch stopped after first failure");
    }

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<BatchItem> = results.into_iter().map(|(_, item)| item).collect();

    tracing::info!(total = results.len(), succeeded, failed, "batch detail finished");

    Ok(ContentBatchDetailOutput {
        summary: BatchSummary { total: results.len() as u32, succeeded, failed },
        results,
    })
}

/// Implementation of the content_batch_detail tool.
pub async fn batch_detail_impl(
    fetcher: Arc<dyn DocumentFetcher>, extractor: Arc<dyn Extractor>, config: &AppConfig,
    params: ContentBatchDetailParams,
) -> Result<CallToolResult, McpError> {
    let output = batch_records(fetcher, extractor, config, params).await?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
