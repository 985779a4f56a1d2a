//! Id-based pagination over search results.

use std::collections::VecDeque;

use futures_util::Stream;
use log::{debug, info};

use crate::error::CollectorError;

use super::api::{SearchApi, SearchQuery};
use super::models::Post;

/// Largest page the standard search endpoint will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pages through search results for one query, up to `limit` posts.
///
/// Each page after the first asks for posts strictly older than the oldest one
/// already seen. The stream cannot be rewound; build a new cursor to search again.
pub struct PostCursor<'a, A: SearchApi + ?Sized> {
    api: &'a A,
    query: SearchQuery,
    limit: i64,
    state: CursorState,
}

#[derive(Default, Debug)]
struct CursorState {
    posts: VecDeque<Post>,
    yielded: i64,
    exhausted: bool,
    errored: bool,
}

impl<'a, A: SearchApi + ?Sized> PostCursor<'a, A> {
    /// `limit` is not validated: zero or negative yields nothing.
    pub fn new(
        api: &'a A,
        keyword: &str,
        date_since: &str,
        date_until: &str,
        limit: i64,
    ) -> Self {
        Self {
            api,
            query: SearchQuery {
                keyword: keyword.to_string(),
                lang: "en".to_string(),
                date_since: date_since.to_string(),
                date_until: date_until.to_string(),
                count: MAX_PAGE_SIZE,
                max_id: None,
            },
            limit,
            state: CursorState::default(),
        }
    }

    /// Turns the cursor into a lazy stream of posts.
    ///
    /// Pages are fetched only when the buffer runs dry. The stream ends once the
    /// limit is reached or the results run out, and right after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Post, CollectorError>> + 'a {
        futures_util::stream::unfold(self, |mut cursor| async move {
            // An error ends the stream
            if cursor.state.errored {
                return None;
            }

            // Limit reached
            if cursor.state.yielded >= cursor.limit {
                return None;
            }

            if cursor.state.posts.is_empty() && !cursor.state.exhausted {
                if let Err(e) = cursor.fetch_page().await {
                    cursor.state.errored = true;
                    return Some((Err(e), cursor));
                }
            }

            let post = cursor.state.posts.pop_front()?;
            cursor.state.yielded += 1;
            Some((Ok(post), cursor))
        })
    }

    async fn fetch_page(&mut self) -> Result<(), CollectorError> {
        let remaining = self.limit - self.state.yielded;
        self.query.count = remaining.clamp(1, MAX_PAGE_SIZE as i64) as u32;

        let page = self.api.search_page(&self.query).await?;
        info!("Fetched page with {} posts", page.posts.len());

        match page.min_id() {
            Some(min_id) if min_id > 0 => self.query.max_id = Some(min_id - 1),
            _ => {
                debug!("No older posts to request, pagination finished");
                self.state.exhausted = true;
            }
        }

        self.state.posts.extend(page.posts);
        Ok(())
    }
}
