use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::builtin;
use crate::presenter::ViewState;
use crate::render::{self, APP_TITLE, FAILURE_MESSAGE, LOADING_MESSAGE};
use crate::story::StoryEntry;

pub fn build_page(state: &ViewState) -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (APP_TITLE) }
                style { (PreEscaped(builtin::BUILTIN_CSS)) }
            }
            body {
                h1 class="main-header" { (APP_TITLE) }
                div class="container" {
                    (render_body(state))
                }
            }
        }
    };
    markup.into_string()
}

fn render_body(state: &ViewState) -> Markup {
    match state {
        ViewState::Loading => html! { h2 class="loading" { (LOADING_MESSAGE) } },
        ViewState::Failed(_) => html! { span class="error" { (FAILURE_MESSAGE) } },
        ViewState::Loaded(entries) => render_list(entries),
    }
}

pub fn render_list(entries: &[StoryEntry]) -> Markup {
    html! {
        @for entry in render::sort_by_score(entries) {
            (render_story(entry))
        }
    }
}

pub fn render_story(entry: &StoryEntry) -> Markup {
    let story = &entry.story_info;
    let link = story.link();

    html! {
        article id=(format!("story_{}", story.id)) class="article" {
            div class="article-heading" {
                h2 { (story.title) }
                span class="score" { (story.score) }
            }
            div class="author" {
                span class="author-name" {
                    "At " (render::format_time(story.time)) " by " (entry.author.id)
                }
                " "
                span class="karma" { "(" (entry.author.karma) ")" }
            }
            span { "Read: " }
            a href=(link) rel="noopener noreferrer" { (link) }
        }
    }
}
