use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;

use crate::aggregate::DEFAULT_COUNT;
use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text list.
    Text,
    /// Self-contained HTML page.
    Html,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Root of the Hacker News API.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Number of top stories to sample.
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Output format: `text` or `html`.
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the output to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Max concurrent HTTP requests.
    #[arg(long, default_value_t = 32)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds (at least 1).
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// HTTP User-Agent.
    #[arg(long, default_value = "hn-top-stories/0.1")]
    pub user_agent: String,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,

    /// Fetch a fresh sample every SECS seconds until interrupted.
    ///
    /// With `--out` each cycle replaces the file; on stdout each cycle prints
    /// one more block.
    #[arg(long, value_name = "SECS")]
    pub refresh_every: Option<u64>,
}
