use chrono::DateTime;

use crate::cli::OutputFormat;
use crate::presenter::ViewState;
use crate::story::StoryEntry;
use crate::{html, text};

pub const APP_TITLE: &str = "HackerNews";
pub const LOADING_MESSAGE: &str = "Loading...";
pub const FAILURE_MESSAGE: &str = "Unable to show articles, something wrong happened";

/// Entries in display order: ascending by score. Ties keep fetch order.
pub fn sort_by_score(entries: &[StoryEntry]) -> Vec<&StoryEntry> {
    let mut sorted: Vec<&StoryEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.story_info.score);
    sorted
}

pub fn format_time(unix_secs: i64) -> String {
    match DateTime::from_timestamp(unix_secs, 0) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => unix_secs.to_string(),
    }
}

pub fn render_state(state: &ViewState, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => text::render_state(state),
        OutputFormat::Html => html::build_page(state),
    }
}
