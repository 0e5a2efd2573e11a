//! Ports Layer - Trait definitions for external dependencies
//!
//! This module defines the interfaces (ports) that adapters must implement.
//! Following hexagonal architecture, these traits abstract:
//! - Outbound HTTP transport (`HttpSource`)
//! - The per-source ingestion contract (`SourceAdapter`)

pub mod source;
pub mod mocks;

pub use source::{FetchError, FetchErrorKind, HttpSource, SourceAdapter};
pub use mocks::MockHttpSource;
