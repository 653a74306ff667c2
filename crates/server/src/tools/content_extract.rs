//! content_extract tool implementation.
//!
//! Extracts a listing record from HTML supplied by the client.
//! No network I/O is performed.

use marquee_client::Extractor;
use marquee_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for content_extract tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentExtractParams {
    /// The raw HTML of a listing page.
    pub html: String,
}

/// Implementation of the content_extract tool.
pub fn extract_impl(extractor: &dyn Extractor, params: ContentExtractParams) -> Result<CallToolResult, McpError> {
    if params.html.trim().is_empty() {
        return Err(Error::InvalidInput("html cannot be empty".into()).into());
    }

    let record = extractor.extract(&params.html)?;

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&record).unwrap_or_default(),
    )]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_client::ListingExtractor;
    use marquee_core::ContentRecord;

    #[test]
    fn test_extract_listing() {
        let params = ContentExtractParams {
            html: r#"<html><body><div class="entry-content">
                <h3>Download Some Film ~ 2024</h3>
                <h4>[900MB] 720p</h4>
                <p><a href="https://host/a">Server 1</a></p>
            </div></body></html>"#
                .into(),
        };

        let result = extract_impl(&ListingExtractor::default(), params).unwrap();
        assert!(!result.is_error.unwrap_or(false));

        let text = &result.content[0].as_text().unwrap().text;
        let record: ContentRecord = serde_json::from_str(text).unwrap();
        assert_eq!(record.title, "Some Film");
        assert_eq!(record.servers[0].size, "900MB");
    }

    #[test]
    fn test_extract_empty_html_fails() {
        let params = ContentExtractParams { html: "  ".into() };
        let err = extract_impl(&ListingExtractor::default(), params).unwrap_err();
        assert_eq!(err.code.0, -32602);
    }

    #[test]
    fn test_extract_parse_failure_maps_code() {
        let params = ContentExtractParams { html: "<!-- only a comment -->".into() };
        let err = extract_impl(&ListingExtractor::default(), params).unwrap_err();
        assert_eq!(err.code.0, -32000);
    }
}
