//! Wire types for the v1.1 standard search endpoint and the post model built
//! from them.

use serde::Deserialize;

/// Body of `GET search/tweets.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Status>,
}

/// A status as returned in extended tweet mode.
///
/// `full_text` is present in extended mode; `text` is the compat-mode fallback.
#[derive(Debug, Deserialize)]
pub(crate) struct Status {
    pub id: u64,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub retweeted_status: Option<Box<Status>>,
}

impl Status {
    fn into_text(self) -> String {
        self.full_text.or(self.text).unwrap_or_default()
    }
}

/// The original post carried inside a retweet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedPost {
    pub text: String,
    pub retweet_count: u64,
    pub favorite_count: u64,
}

/// A search result, classified by whether it reshares another post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Post {
    /// A post with no embedded original.
    Original { id: u64, favorite_count: u64 },
    /// A retweet; metrics come from the embedded original.
    Repost { id: u64, embedded: EmbeddedPost },
}

impl Post {
    pub fn id(&self) -> u64 {
        match self {
            Post::Original { id, .. } | Post::Repost { id, .. } => *id,
        }
    }
}

impl From<Status> for Post {
    fn from(status: Status) -> Self {
        match status.retweeted_status {
            Some(original) => {
                let original = *original;
                Post::Repost {
                    id: status.id,
                    embedded: EmbeddedPost {
                        retweet_count: original.retweet_count,
                        favorite_count: original.favorite_count,
                        text: original.into_text(),
                    },
                }
            }
            None => Post::Original {
                id: status.id,
                favorite_count: status.favorite_count,
            },
        }
    }
}

/// One page of search results, in API order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub posts: Vec<Post>,
}

impl SearchPage {
    /// Smallest post id on the page, used to request the next (older) page.
    pub fn min_id(&self) -> Option<u64> {
        self.posts.iter().map(Post::id).min()
    }
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        SearchPage {
            posts: response.statuses.into_iter().map(Post::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "statuses": [
            {
                "id": 1212092628029698048,
                "full_text": "RT @someone: bitcoin to the moon",
                "retweet_count": 42,
                "favorite_count": 0,
                "retweeted_status": {
                    "id": 1212000000000000000,
                    "full_text": "bitcoin to the moon",
                    "retweet_count": 42,
                    "favorite_count": 310
                }
            },
            {
                "id": 1212092628029698047,
                "full_text": "buying more bitcoin",
                "retweet_count": 1,
                "favorite_count": 7
            }
        ],
        "search_metadata": { "count": 2 }
    }"#;

    #[test]
    fn test_page_classifies_reposts_and_originals() {
        let response: SearchResponse = serde_json::from_str(PAGE).unwrap();
        let page = SearchPage::from(response);

        assert_eq!(
            page.posts,
            vec![
                Post::Repost {
                    id: 1212092628029698048,
                    embedded: EmbeddedPost {
                        text: "bitcoin to the moon".to_string(),
                        retweet_count: 42,
                        favorite_count: 310,
                    },
                },
                Post::Original {
                    id: 1212092628029698047,
                    favorite_count: 7,
                },
            ]
        );
        assert_eq!(page.min_id(), Some(1212092628029698047));
    }

    #[test]
    fn test_embedded_text_falls_back_to_compat_text() {
        let status: Status = serde_json::from_str(
            r#"{"id": 5, "retweeted_status": {"id": 4, "text": "short form"}}"#,
        )
        .unwrap();
        match Post::from(status) {
            Post::Repost { embedded, .. } => {
                assert_eq!(embedded.text, "short form");
                assert_eq!(embedded.retweet_count, 0);
            }
            other => panic!("expected repost, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_response_has_no_min_id() {
        let response: SearchResponse = serde_json::from_str(r#"{"statuses": []}"#).unwrap();
        assert_eq!(SearchPage::from(response).min_id(), None);
    }
}
