//! Core types and shared functionality for marquee.
//!
//! This crate provides:
//! - Listing record types produced by the extraction engine
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod record;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use record::{ContentRecord, ContentType, LinkRecord, ServerGroup};
