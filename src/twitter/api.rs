//! Core Twitter API utilities.
//!
//! This module contains the `SearchApi` seam the collector is written against and
//! `TwitterApi`, its implementation over the v1.1 REST API with OAuth 1.0a signed
//! requests.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{header::AUTHORIZATION, Client, StatusCode};

use crate::config::{get_api_base_url, TwitterConfig};
use crate::error::CollectorError;
use crate::oauth::{build_oauth1_header, percent_encode};

use super::models::{SearchPage, SearchResponse};

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in characters before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!("{}... [truncated, {} total bytes]", truncated, text.len())
    } else {
        sanitized
    }
}

/// Parameters for a single search page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub lang: String,
    pub date_since: String,
    pub date_until: String,
    /// Posts requested for this page.
    pub count: u32,
    /// Upper id bound (inclusive); `None` for the first page.
    pub max_id: Option<u64>,
}

impl SearchQuery {
    /// Query parameters in the order they are sent.
    ///
    /// The standard search endpoint has no lower date parameter, so `date_since`
    /// travels as a `since:` operator inside `q`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let q = if self.date_since.is_empty() {
            self.keyword.clone()
        } else {
            format!("{} since:{}", self.keyword, self.date_since)
        };

        let mut params = vec![
            ("q".to_string(), q),
            ("lang".to_string(), self.lang.clone()),
            ("until".to_string(), self.date_until.clone()),
            ("count".to_string(), self.count.to_string()),
            ("tweet_mode".to_string(), "extended".to_string()),
        ];
        if let Some(max_id) = self.max_id {
            params.push(("max_id".to_string(), max_id.to_string()));
        }
        params
    }
}

/// A source of search result pages.
///
/// The collector depends only on this trait, so an already authenticated client
/// is passed in explicitly and tests can substitute their own.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetches one page of posts for `query`.
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage, CollectorError>;
}

/// Twitter/X v1.1 API client holding the OAuth 1.0a credentials.
pub struct TwitterApi {
    client: Client,
    config: TwitterConfig,
    base_url: String,
}

impl TwitterApi {
    /// Creates a client against the base URL from `TWITTER_API_BASE_URL`
    /// (default `https://api.twitter.com/1.1`).
    pub fn new(config: TwitterConfig) -> Self {
        Self::with_base_url(config, get_api_base_url())
    }

    pub fn with_base_url(config: TwitterConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: base_url.into(),
        }
    }

    /// Sends a signed GET request and returns the body on success.
    ///
    /// Non-success statuses are classified into `CollectorError` variants.
    /// Nothing is retried.
    async fn make_authenticated_request(
        &self,
        path: &str,
        params: &[(String, String)],
        operation_name: &str,
    ) -> Result<String, CollectorError> {
        info!(
            "Making authenticated request for operation: {}",
            operation_name
        );

        let url = format!("{}/{}", self.base_url, path);
        let auth_header = build_oauth1_header(&self.config, "GET", &url, params)?;
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let response = self
            .client
            .get(format!("{}?{}", url, query))
            .header(AUTHORIZATION, auth_header)
            .send()
            .await?;

        let status = response.status();
        info!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        if status.is_success() {
            let response_text = response.text().await?;
            debug!(
                "Response summary for '{}': {} bytes received",
                operation_name,
                response_text.len()
            );
            return Ok(response_text);
        }

        let reset = response
            .headers()
            .get("x-rate-limit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok());
        let error_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!("Failed to read error body for '{}': {}", operation_name, e);
                String::new()
            }
        };
        error!("Operation '{}' failed - Status: {}", operation_name, status);
        debug!(
            "Error response for '{}': {}",
            operation_name,
            sanitize_for_logging(&error_text, 200)
        );
        Err(classify_failure(status, &error_text, reset))
    }
}

/// Maps a non-success response to the error taxonomy.
pub(crate) fn classify_failure(
    status: StatusCode,
    body: &str,
    reset: Option<i64>,
) -> CollectorError {
    match status {
        StatusCode::UNAUTHORIZED => {
            warn!("Received 401 Unauthorized - credentials were rejected");
            CollectorError::Authentication(sanitize_for_logging(body, 200))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            warn!("Received 429 Too Many Requests - rate limit reached");
            CollectorError::RateLimited { reset }
        }
        _ => CollectorError::Api {
            status: status.as_u16(),
            message: sanitize_for_logging(body, 200),
        },
    }
}

#[async_trait]
impl SearchApi for TwitterApi {
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage, CollectorError> {
        info!(
            "Searching tweets for '{}' (count: {}, max_id: {:?})",
            query.keyword, query.count, query.max_id
        );

        let response_text = self
            .make_authenticated_request("search/tweets.json", &query.to_params(), "search_tweets")
            .await?;
        let response: SearchResponse = serde_json::from_str(&response_text)?;
        Ok(SearchPage::from(response))
    }
}
