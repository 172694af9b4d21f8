use url::Url;

use crate::error::FetchError;
use crate::fetcher::Fetcher;
use crate::story::{Author, ItemId, StoryInfo};

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// Typed access to the three read endpoints of the Hacker News API.
#[derive(Clone)]
pub struct HnApi {
    fetcher: Fetcher,
    base_url: Url,
}

impl HnApi {
    pub fn new(fetcher: Fetcher, base_url: Url) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            anyhow::bail!("base url {base_url} cannot hold path segments");
        }
        Ok(Self { fetcher, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_top_story_ids(&self) -> Result<Vec<ItemId>, FetchError> {
        self.fetcher
            .get_json(self.endpoint(&["topstories.json"]))
            .await
    }

    pub async fn fetch_story_info(&self, id: ItemId) -> Result<StoryInfo, FetchError> {
        self.fetcher
            .get_json(self.endpoint(&["item", &format!("{id}.json")]))
            .await
    }

    pub async fn fetch_author_info(&self, id: &str) -> Result<Author, FetchError> {
        self.fetcher
            .get_json(self.endpoint(&["user", &format!("{id}.json")]))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn api(base: &str) -> HnApi {
        let fetcher = Fetcher::new("test-agent", 1, Duration::from_secs(1), None).unwrap();
        HnApi::new(fetcher, Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoints_append_to_base_path() {
        for base in [
            "https://hacker-news.firebaseio.com/v0",
            "https://hacker-news.firebaseio.com/v0/",
        ] {
            let api = api(base);
            assert_eq!(
                api.endpoint(&["topstories.json"]).as_str(),
                "https://hacker-news.firebaseio.com/v0/topstories.json"
            );
            assert_eq!(
                api.endpoint(&["item", "42.json"]).as_str(),
                "https://hacker-news.firebaseio.com/v0/item/42.json"
            );
        }
    }

    #[test]
    fn author_id_stays_one_segment() {
        let api = api("http://localhost:1234/");
        assert_eq!(
            api.endpoint(&["user", "a/b.json"]).as_str(),
            "http://localhost:1234/user/a%2Fb.json"
        );
    }

    #[test]
    fn rejects_non_hierarchical_base() {
        let fetcher = Fetcher::new("test-agent", 1, Duration::from_secs(1), None).unwrap();
        assert!(HnApi::new(fetcher, Url::parse("mailto:nobody@example.com").unwrap()).is_err());
    }
}
