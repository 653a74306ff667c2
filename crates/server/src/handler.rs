//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::content_batch_detail::batch_detail_impl;
use crate::tools::content_detail::detail_impl;
use crate::tools::content_extract::extract_impl;
use crate::tools::{ContentBatchDetailParams, ContentDetailParams, ContentExtractParams};

use marquee_client::{DocumentFetcher, ExtractConfig, Extractor, ListingExtractor, SourceFetcher};
use marquee_core::{AppConfig, Error};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for marquee.
#[derive(Clone)]
pub struct MarqueeServer {
    tool_router: ToolRouter<Self>,
    config: AppConfig,
    fetcher: Arc<dyn DocumentFetcher>,
    extractor: Arc<dyn Extractor>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl MarqueeServer {
    /// Create a server that fetches from the configured source site.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let fetcher: Arc<dyn DocumentFetcher> = Arc::new(SourceFetcher::from_config(&config)?);
        let extractor: Arc<dyn Extractor> = Arc::new(ListingExtractor::new(ExtractConfig::from(&config)));
        Ok(Self::with_parts(config, fetcher, extractor))
    }

    /// Create a server from explicit collaborators.
    pub fn with_parts(config: AppConfig, fetcher: Arc<dyn DocumentFetcher>, extractor: Arc<dyn Extractor>) -> Self {
        Self { tool_router: Self::tool_router(), config, fetcher, extractor }
    }

    /// Extract a listing record from HTML.
    ///
    /// No network requests are made.
    #[tool(
        description = "Extract title, synopsis, type, images and download server groups from the HTML of a movie/series listing page."
    )]
    async fn content_extract(&self, params: Parameters<ContentExtractParams>) -> Result<CallToolResult, McpError> {
        extract_impl(self.extractor.as_ref(), params.0)
    }

    /// Fetch a listing page by URL or post id and extract its record.
    #[tool(
        description = "Fetch a movie/series listing page (full URL or post id) and extract its title, synopsis, type, images and download server groups."
    )]
    async fn content_detail(&self, params: Parameters<ContentDetailParams>) -> Result<CallToolResult, McpError> {
        detail_impl(self.fetcher.as_ref(), self.extractor.as_ref(), params.0).await
    }

    /// Fetch and extract several listing pages in parallel.
    #[tool(description = "Fetch and extract several listing pages in parallel. Results are returned in input order.")]
    async fn content_batch_detail(
        &self, params: Parameters<ContentBatchDetailParams>,
    ) -> Result<CallToolResult, McpError> {
        batch_detail_impl(Arc::clone(&self.fetcher), Arc::clone(&self.extractor), &self.config, params.0).await
    }
}

impl ServerHandler for MarqueeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "marquee".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::StubFetcher;

    fn server() -> MarqueeServer {
        MarqueeServer::with_parts(
            AppConfig::default(),
            Arc::new(StubFetcher::default()),
            Arc::new(ListingExtractor::default()),
        )
    }

    #[test]
    fn test_lists_all_tools() {
        let mut names: Vec<String> = server().tool_router.list_all().into_iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["content_batch_detail", "content_detail", "content_extract"]);
    }

    #[test]
    fn test_server_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "marquee");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_new_from_default_config() {
        assert!(MarqueeServer::new(AppConfig::default()).is_ok());
    }
}
