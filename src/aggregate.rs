use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::task::JoinSet;

use crate::api::HnApi;
use crate::error::{AggregationError, FetchError};
use crate::progress::Progress;
use crate::sample::sample_distinct;
use crate::story::{Author, AuthorId, ItemId, StoryEntry, StoryInfo};

pub const DEFAULT_COUNT: usize = 10;

/// Joins a random sample of top stories with their authors.
#[derive(Clone)]
pub struct Aggregator {
    api: HnApi,
    count: usize,
    rng: Arc<Mutex<StdRng>>,
    progress: Option<Arc<Progress>>,
}

impl Aggregator {
    pub fn new(api: HnApi, count: usize) -> Self {
        Self {
            api,
            count,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            progress: None,
        }
    }

    /// Makes the sampling step reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn with_progress(mut self, progress: Arc<Progress>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub async fn fetch_top_stories(&self) -> Result<Vec<StoryEntry>, AggregationError> {
        self.stage("fetching top story ids");
        let all_ids = self.api.fetch_top_story_ids().await?;
        let ids = self.select_ids(&all_ids);
        tracing::info!(available = all_ids.len(), selected = ids.len(), "selected top stories");

        self.stage(format!("fetching {} stories", ids.len()));
        let api = self.api.clone();
        let stories: Vec<StoryInfo> = fan_out(ids, move |id| {
            let api = api.clone();
            async move { api.fetch_story_info(id).await }
        })
        .await?;

        let author_ids = distinct_authors(&stories);
        self.stage(format!("fetching {} authors", author_ids.len()));
        let api = self.api.clone();
        let authors: Vec<Author> = fan_out(author_ids, move |id: AuthorId| {
            let api = api.clone();
            async move { api.fetch_author_info(&id).await }
        })
        .await?;

        let entries = join_authors(stories, authors)?;
        tracing::info!(
            stories = entries.len(),
            authors = entries
                .iter()
                .map(|e| e.author.id.as_str())
                .collect::<HashSet<_>>()
                .len(),
            "aggregated top stories"
        );
        Ok(entries)
    }

    fn select_ids(&self, all_ids: &[ItemId]) -> Vec<ItemId> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        sample_distinct(all_ids, self.count, &mut *rng)
    }

    fn stage(&self, msg: impl Into<String>) {
        if let Some(p) = &self.progress {
            p.set_stage(msg);
        }
    }
}

/// Runs `fetch` for every key concurrently and waits for all of them.
///
/// Results keep the order of `keys`. The first failure is returned and the
/// remaining tasks are aborted when the set is dropped.
async fn fan_out<K, T, F, Fut>(keys: Vec<K>, fetch: F) -> Result<Vec<T>, AggregationError>
where
    F: Fn(K) -> Fut,
    Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    T: Send + 'static,
{
    let mut set = JoinSet::new();
    let mut slots: Vec<Option<T>> = Vec::with_capacity(keys.len());
    for (idx, key) in keys.into_iter().enumerate() {
        let fut = fetch(key);
        set.spawn(async move { (idx, fut.await) });
        slots.push(None);
    }

    while let Some(joined) = set.join_next().await {
        let (idx, res) = joined?;
        slots[idx] = Some(res?);
    }

    Ok(slots.into_iter().flatten().collect())
}

fn distinct_authors(stories: &[StoryInfo]) -> Vec<AuthorId> {
    let mut seen = HashSet::new();
    stories
        .iter()
        .filter(|s| seen.insert(s.by.as_str()))
        .map(|s| s.by.clone())
        .collect()
}

fn join_authors(
    stories: Vec<StoryInfo>,
    authors: Vec<Author>,
) -> Result<Vec<StoryEntry>, AggregationError> {
    let by_id: HashMap<AuthorId, Author> =
        authors.into_iter().map(|a| (a.id.clone(), a)).collect();

    stories
        .into_iter()
        .map(|story_info| match by_id.get(&story_info.by) {
            Some(author) => Ok(StoryEntry {
                author: author.clone(),
                story_info,
            }),
            None => {
                tracing::error!(story = story_info.id, author = %story_info.by, "author missing from lookup");
                Err(AggregationError::MissingAuthor {
                    story: story_info.id,
                    author: story_info.by,
                })
            }
        })
        .collect()
}
