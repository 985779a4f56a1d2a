//! Keyword search collection.
//!
//! Pages through the search results for one request and gathers the text,
//! retweet count, and favorite count of each post into three sequences.

use futures_util::TryStreamExt;
use log::{debug, info};
use serde::Serialize;

use crate::error::CollectorError;
use crate::twitter::{sanitize_for_logging, Post, PostCursor, SearchApi};

/// A single search invocation.
///
/// Nothing here is validated; the values go to the API as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    /// Inclusive lower date bound, e.g. `2020-01-01`.
    pub date_since: String,
    /// Exclusive upper date bound.
    pub date_until: String,
    pub max_items: i64,
}

/// Engagement data gathered from a search.
///
/// `favorite_count` receives one entry per post. `tweet_content` and
/// `retweet_count` receive entries for retweets only, so the three vectors
/// are not aligned by post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub tweet_content: Vec<String>,
    pub retweet_count: Vec<u64>,
    pub favorite_count: Vec<u64>,
}

impl ResultSet {
    /// Appends the metrics of one post.
    pub fn record(&mut self, post: &Post) {
        match post {
            Post::Repost { embedded, .. } => {
                self.tweet_content.push(embedded.text.clone());
                self.retweet_count.push(embedded.retweet_count);
                self.favorite_count.push(embedded.favorite_count);
            }
            Post::Original { favorite_count, .. } => {
                self.favorite_count.push(*favorite_count);
            }
        }
    }
}

/// Collects engagement metrics for up to `request.max_items` posts.
///
/// `api` must already hold valid credentials. Errors from it are returned
/// unchanged and abandon any partial results.
///
/// # Example
///
/// ```rust,no_run
/// use tweet_collector::{collect, SearchRequest, TwitterApi, TwitterConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let api = TwitterApi::new(TwitterConfig::from_env()?);
///     let request = SearchRequest {
///         keyword: "bitcoin".to_string(),
///         date_since: "2020-01-01".to_string(),
///         date_until: "2020-01-02".to_string(),
///         max_items: 100,
///     };
///     let results = collect(&api, &request).await?;
///     println!("{:?}", results);
///     Ok(())
/// }
/// ```
pub async fn collect<A: SearchApi + ?Sized>(
    api: &A,
    request: &SearchRequest,
) -> Result<ResultSet, CollectorError> {
    info!(
        "Collecting up to {} posts for '{}' ({} to {})",
        request.max_items, request.keyword, request.date_since, request.date_until
    );

    let posts = PostCursor::new(
        api,
        &request.keyword,
        &request.date_since,
        &request.date_until,
        request.max_items,
    )
    .into_stream();
    futures_util::pin_mut!(posts);
    let mut results = ResultSet::default();

    while let Some(post) = posts.try_next().await? {
        match &post {
            Post::Repost { id, embedded } => debug!(
                "Post {} is a retweet of: {}",
                id,
                sanitize_for_logging(&embedded.text, 80)
            ),
            Post::Original { id, .. } => debug!("Post {} is an original", id),
        }
        results.record(&post);
    }

    info!(
        "Collected {} posts ({} retweets)",
        results.favorite_count.len(),
        results.retweet_count.len()
    );
    Ok(results)
}
