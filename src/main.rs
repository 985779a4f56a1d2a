//! # Tweet Collector
//!
//! Runs a single hardcoded search and prints the aggregated engagement counts.
//!
//! ## Environment Variables
//!
//! - `api_key`, `api_key_secret`, `access_token`, `access_token_secret`: OAuth 1.0a credentials
//! - `TWITTER_API_BASE_URL`: Optional API base URL override
//! - `RUST_LOG`: Log level (e.g. `RUST_LOG=debug`)

use log::info;

use tweet_collector::{collect, SearchRequest, TwitterApi, TwitterConfig};

const KEYWORD: &str = "bitcoin";
const DATE_SINCE: &str = "2020-01-01";
const DATE_UNTIL: &str = "2020-01-02";
const MAX_ITEMS: i64 = 100;

/// Main entry point for the tweet collector.
///
/// Loads credentials, collects up to 100 `bitcoin` posts from 2020-01-01, and
/// writes the result to stdout as JSON.
///
/// # Errors
///
/// Returns an error (non-zero exit) if a credential is missing, or if the API
/// rejects the credentials, rate limits the request, or cannot be reached.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize the logging system
    env_logger::init();

    let config = TwitterConfig::from_env()?;
    let api = TwitterApi::new(config);

    let request = SearchRequest {
        keyword: KEYWORD.to_string(),
        date_since: DATE_SINCE.to_string(),
        date_until: DATE_UNTIL.to_string(),
        max_items: MAX_ITEMS,
    };

    let results = collect(&api, &request).await?;
    info!(
        "Search complete: {} favorite counts, {} retweeted texts",
        results.favorite_count.len(),
        results.tweet_content.len()
    );

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
