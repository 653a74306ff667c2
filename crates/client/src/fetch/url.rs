//! URL canonicalization and page identifier resolution.

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Canonicalize a URL string.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str().map(str::to_lowercase) {
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Reduce user input to a page identifier on the source site.
///
/// Accepts:
/// - a full URL on the source site: everything after `host/` is kept, query included
/// - any other http(s) URL: its path without the leading slash
/// - anything else: taken as the identifier itself
pub fn resolve_page_id(input: &str, base: &url::Url) -> Result<String, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let id = match base.host_str().map(|host| format!("{host}/")) {
        Some(marker) if trimmed.contains(&marker) => {
            trimmed.split_once(&marker).map(|(_, rest)| rest.to_string()).unwrap_or_default()
        }
        _ if trimmed.starts_with("http") => match url::Url::parse(trimmed) {
            Ok(parsed) => parsed.path().strip_prefix('/').unwrap_or(parsed.path()).to_string(),
            Err(_) => trimmed.to_string(),
        },
        _ => trimmed.to_string(),
    };

    if id.is_empty() { Err(UrlError::Empty) } else { Ok(id) }
}

/// Absolute URL of a page identifier under `base`.
///
/// The identifier is appended to the base as a path, so a base with its own
/// path prefix keeps it.
pub fn page_url(base: &url::Url, page_id: &str) -> Result<url::Url, UrlError> {
    let endpoint = if page_id.starts_with('/') { page_id.to_string() } else { format!("/{page_id}") };
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), endpoint);
    url::Url::parse(&joined).map_err(|e| UrlError::InvalidUrl(e.to_string()))
}
