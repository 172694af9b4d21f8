use thiserror::Error;
use url::Url;

use crate::story::{AuthorId, ItemId};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} failed with status {status} {status_text}")]
    Api {
        url: Url,
        status: u16,
        status_text: String,
    },

    #[error("decode body of {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("story {story} references author {author:?} that was not resolved")]
    MissingAuthor { story: ItemId, author: AuthorId },

    #[error("fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AggregationError {
    /// HTTP status of the failing request, when the API answered with one.
    pub fn api_status(&self) -> Option<u16> {
        match self {
            AggregationError::Fetch(FetchError::Api { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
