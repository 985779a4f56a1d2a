//! Twitter/X API integration module.
//!
//! This module contains the search client, the response model, and the
//! pagination cursor used by the collector.

mod api;
mod cursor;
mod models;

// Re-export public API
pub use api::{SearchApi, SearchQuery, TwitterApi};
pub use cursor::{PostCursor, MAX_PAGE_SIZE};
pub use models::{EmbeddedPost, Post, SearchPage};

// Crate-internal re-exports (used by the collector)
pub(crate) use api::sanitize_for_logging;
