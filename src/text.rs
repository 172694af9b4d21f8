use std::fmt::Write as _;

use crate::presenter::ViewState;
use crate::render::{self, APP_TITLE, FAILURE_MESSAGE, LOADING_MESSAGE};
use crate::story::StoryEntry;

pub fn render_state(state: &ViewState) -> String {
    let mut out = format!("{APP_TITLE}\n\n");
    match state {
        ViewState::Loading => {
            let _ = writeln!(out, "{LOADING_MESSAGE}");
        }
        ViewState::Failed(_) => {
            let _ = writeln!(out, "{FAILURE_MESSAGE}");
        }
        ViewState::Loaded(entries) => out.push_str(&render_list(entries)),
    }
    out
}

/// One block per story, lowest score first, score right-aligned in the gutter.
pub fn render_list(entries: &[StoryEntry]) -> String {
    let sorted = render::sort_by_score(entries);
    let width = sorted
        .iter()
        .map(|e| e.story_info.score.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for entry in sorted {
        let story = &entry.story_info;
        let pad = " ".repeat(width);
        let _ = writeln!(out, "{:>width$}  {}", story.score, story.title);
        let _ = writeln!(
            out,
            "{pad}  At {} by {} ({})",
            render::format_time(story.time),
            entry.author.id,
            entry.author.karma
        );
        let _ = writeln!(out, "{pad}  Read: {}", story.link());
        out.push('\n');
    }
    out
}
