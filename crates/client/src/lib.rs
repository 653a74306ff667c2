//! Client code for marquee.
//!
//! This crate provides the listing page extraction engine, the HTTP fetch
//! pipeline that feeds it, and the glue that runs one after the other.

pub mod detail;
pub mod extract;
pub mod fetch;

pub use detail::scrape_detail;
pub use extract::{ExtractConfig, Extractor, ListingExtractor, extract_detail};
pub use fetch::{DocumentFetcher, FetchClient, FetchConfig, FetchResponse, SourceFetcher};
