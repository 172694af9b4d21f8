use serde::Deserialize;

pub type ItemId = u64;
pub type AuthorId = String;

const DISCUSSION_URL: &str = "https://news.ycombinator.com/item?id=";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoryInfo {
    pub id: ItemId,
    pub title: String,
    pub score: i64,
    /// Unix seconds.
    pub time: i64,
    /// Absent on text posts such as "Ask HN".
    #[serde(default)]
    pub url: Option<String>,
    pub by: AuthorId,
}

impl StoryInfo {
    /// Link target for display, falling back to the discussion page.
    pub fn link(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => format!("{DISCUSSION_URL}{}", self.id),
        }
    }
}

/// Only the `{id, karma}` projection of the user record; everything else is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub karma: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryEntry {
    pub story_info: StoryInfo,
    pub author: Author,
}
