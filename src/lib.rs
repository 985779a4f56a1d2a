//! # Tweet Collector Library
//!
//! Searches the Twitter/X v1.1 standard search API for a keyword within a date
//! window and aggregates the retweet and favorite counts of the results.
//!
//! ## Features
//!
//! - OAuth 1.0a (HMAC-SHA1) signed requests
//! - Id-based pagination capped at a requested item count
//! - Retweet detection via the embedded original status
//! - Structured logging
//!
//! ## Configuration
//!
//! The following environment variables are required:
//! - `api_key`, `api_key_secret`: Consumer credentials
//! - `access_token`, `access_token_secret`: User credentials
//!
//! Optionally, `TWITTER_API_BASE_URL` overrides `https://api.twitter.com/1.1`.

pub mod collector;
pub mod config;
pub mod error;
pub mod oauth;
pub mod twitter;

// Re-export commonly used types and functions
pub use collector::{collect, ResultSet, SearchRequest};
pub use config::{get_api_base_url, TwitterConfig};
pub use error::CollectorError;
pub use oauth::build_oauth1_header;
pub use twitter::{EmbeddedPost, Post, PostCursor, SearchApi, SearchPage, SearchQuery, TwitterApi};
