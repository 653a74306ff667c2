//! MCP tool implementations.
//!
//! This module contains all tools exposed by the marquee server.

pub mod content_batch_detail;
pub mod content_detail;
pub mod content_extract;

#[cfg(test)]
pub(crate) mod testing;

pub use content_batch_detail::ContentBatchDetailParams;
pub use content_detail::ContentDetailParams;
pub use content_extract::ContentExtractParams;
