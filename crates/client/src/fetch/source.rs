//! Document fetcher for the listing source site.

use async_trait::async_trait;
use marquee_core::{AppConfig, Error};

use super::url::{canonicalize, page_url, resolve_page_id};
use super::{FetchClient, FetchConfig};

/// Supplies raw markup for a page identifier.
///
/// `Ok` carries the markup; `Err` carries the diagnostic and means the page is
/// not available for extraction.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_markup(&self, page_id: &str) -> Result<String, Error>;
}

/// Fetches listing pages from one source site.
pub struct SourceFetcher {
    client: FetchClient,
    base: url::Url,
}

impl SourceFetcher {
    /// Create a fetcher rooted at `base_url`.
    pub fn new(client: FetchClient, base_url: &str) -> Result<Self, Error> {
        let base = canonicalize(base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self { client, base })
    }

    /// Build a fetcher from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = FetchClient::new(FetchConfig::from(config))?;
        Self::new(client, &config.source_base_url)
    }

    pub fn base(&self) -> &url::Url {
        &self.base
    }

    /// Absolute URL for user input that is either a page URL or an identifier.
    pub fn resolve(&self, input: &str) -> Result<url::Url, Error> {
        let page_id = resolve_page_id(input, &self.base).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        page_url(&self.base, &page_id).map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl DocumentFetcher for SourceFetcher {
    async fn fetch_markup(&self, page_id: &str) -> Result<String, Error> {
        let url = self.resolve(page_id)?;
        tracing::info!(%url, "fetching listing page");

        let response = self.client.fetch(url.as_str()).await?;
        tracing::debug!(
            requested = %response.url,
            final_url = %response.final_url,
            status = response.status.as_u16(),
            content_type = response.content_type.as_deref().unwrap_or("unknown"),
            fetch_ms = response.fetch_ms,
            bytes = response.bytes.len(),
            "listing page fetched"
        );
        let markup = response.text();
        if markup.trim().is_empty() {
            return Err(Error::SourceUnavailable(format!("{} returned an empty body", response.final_url)));
        }

        Ok(markup)
    }
}
