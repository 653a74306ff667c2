//! Listing records produced by the extraction engine.
//!
//! A [`ContentRecord`] is built once per extraction call and never mutated
//! afterwards. Every field is always present, possibly empty.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coarse classification of a listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mirror link inside a download group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Absolute http(s) URL.
    pub url: String,
    /// Display label for the hosting mirror.
    pub server_name: String,
}

/// One download offering: heading metadata plus its mirror links.
///
/// Groups are only emitted with at least one link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServerGroup {
    /// Raw heading (or surrounding) text the group was derived from.
    #[serde(alias = "downloadtitle")]
    pub label: String,
    /// Resolution token such as `720p`, empty when unknown.
    pub quality: String,
    /// File size such as `750MB`, empty when unknown.
    pub size: String,
    pub links: Vec<LinkRecord>,
}

/// Normalized record extracted from a single listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub synopsis: String,
    pub images: Vec<String>,
    pub servers: Vec<ServerGroup>,
}

impl ContentRecord {
    /// Total number of links across all server groups.
    pub fn link_count(&self) -> usize {
        self.servers.iter().map(|s| s.links.len()).sum()
    }
}
