mod aggregate;
mod api;
mod builtin;
mod cli;
mod error;
mod fetcher;
mod html;
mod presenter;
mod progress;
mod render;
mod sample;
mod story;
mod text;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use cli::Args;
use progress::Progress;

pub use aggregate::{Aggregator, DEFAULT_COUNT};
pub use api::{DEFAULT_BASE_URL, HnApi};
pub use cli::{Args as CliArgs, OutputFormat, ProgressMode};
pub use error::{AggregationError, FetchError};
pub use fetcher::Fetcher;
pub use presenter::{Presenter, Refresh, ViewState};
pub use render::{FAILURE_MESSAGE, LOADING_MESSAGE, render_state, sort_by_score};
pub use sample::sample_distinct;
pub use story::{Author, AuthorId, ItemId, StoryEntry, StoryInfo};

pub async fn run(args: Args) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = Progress::new(progress_enabled, args.max_concurrency);

    let fetcher = Fetcher::new(
        &args.user_agent,
        args.max_concurrency,
        Duration::from_secs(args.timeout_secs),
        Some(progress.clone()),
    )?;
    let api = HnApi::new(fetcher, args.base_url.clone())?;
    let aggregator = Aggregator::new(api, args.count).with_progress(progress.clone());
    let presenter = Presenter::new(aggregator);

    tracing::info!(
        base_url = %args.base_url,
        count = args.count,
        format = ?args.format,
        refresh_every = ?args.refresh_every,
        "starting"
    );

    let res = match args.refresh_every {
        None => run_once(&presenter, &args, &progress).await,
        Some(secs) => {
            until_interrupted(
                refresh_loop(&presenter, &args, &progress, secs),
                tokio::signal::ctrl_c(),
            )
            .await
        }
    };
    progress.finish();
    tracing::info!(
        requests = progress.requests_done(),
        failed = progress.requests_failed(),
        "finished"
    );
    res
}

async fn run_once(
    presenter: &Presenter,
    args: &Args,
    progress: &Arc<Progress>,
) -> anyhow::Result<()> {
    presenter.refresh().await;
    progress.set_stage("Rendering");
    write_output(presenter, args)?;

    if let ViewState::Failed(err) = &*presenter.state() {
        anyhow::bail!("fetching top stories failed: {err}");
    }
    Ok(())
}

async fn refresh_loop(
    presenter: &Presenter,
    args: &Args,
    progress: &Arc<Progress>,
    secs: u64,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        progress.set_stage("Loading...");
        if presenter.refresh().await == Refresh::Ignored {
            continue;
        }
        progress.set_stage(format!("Waiting {secs}s for next refresh"));
        write_output(presenter, args)?;
    }
}

/// Drives `work` until `interrupt` fires. If the interrupt cannot be set up,
/// `work` keeps running on its own.
async fn until_interrupted<W, I>(work: W, interrupt: I) -> anyhow::Result<()>
where
    W: Future<Output = anyhow::Result<()>>,
    I: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(work);
    tokio::select! {
        res = &mut work => res,
        signal = interrupt => match signal {
            Ok(()) => {
                tracing::info!("interrupted; stopping");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot listen for Ctrl-C; refreshing until killed");
                work.await
            }
        },
    }
}

fn write_output(presenter: &Presenter, args: &Args) -> anyhow::Result<()> {
    let rendered = render_state(&presenter.state(), args.format);
    emit(&rendered, args.out.as_deref())
}

/// Replaces the file at `out`, or appends to stdout when there is none.
fn emit(rendered: &str, out: Option<&Path>) -> anyhow::Result<()> {
    use std::io::Write as _;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("create {}", parent.display()))?;
                }
            }
            std::fs::write(path, rendered).with_context(|| format!("write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .context("write stdout")?;
        }
    }
    Ok(())
}
