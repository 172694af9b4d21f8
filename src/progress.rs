use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use indicatif::{
    HumanBytes, HumanDuration, MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle,
};
use url::Url;

pub struct Progress {
    enabled: bool,
    start: Instant,
    max_concurrency: usize,

    // UI
    mp: Option<MultiProgress>,
    stage: ProgressBar,
    requests: ProgressBar,

    // Counters
    http_in_flight: AtomicU64,
    http_done: AtomicU64,
    http_failed: AtomicU64,
    http_bytes: AtomicU64,
    last_http_label: Mutex<String>,
}

impl Progress {
    pub fn new(enabled: bool, max_concurrency: usize) -> Arc<Self> {
        let start = Instant::now();

        let (mp, stage, requests) = if enabled {
            let mp = MultiProgress::with_draw_target(ProgressDrawTarget::stderr());

            let stage = mp.add(ProgressBar::new_spinner());
            if let Ok(style) =
                ProgressStyle::with_template("{spinner} {msg}  [{elapsed_precise}]")
            {
                stage.set_style(style);
            }
            stage.enable_steady_tick(Duration::from_millis(80));
            stage.set_message("Loading...");

            let requests = mp.add(ProgressBar::new_spinner());
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                requests.set_style(style);
            }
            requests.enable_steady_tick(Duration::from_millis(120));

            (Some(mp), stage, requests)
        } else {
            (None, ProgressBar::hidden(), ProgressBar::hidden())
        };

        Arc::new(Self {
            enabled,
            start,
            max_concurrency: max_concurrency.max(1),
            mp,
            stage,
            requests,
            http_in_flight: AtomicU64::new(0),
            http_done: AtomicU64::new(0),
            http_failed: AtomicU64::new(0),
            http_bytes: AtomicU64::new(0),
            last_http_label: Mutex::new(String::new()),
        })
    }

    pub fn set_stage(&self, msg: impl Into<String>) {
        if !self.enabled {
            return;
        }
        self.stage.set_message(msg.into());
    }

    pub fn http_start(&self, url: &Url) {
        self.http_in_flight.fetch_add(1, Ordering::Relaxed);
        if self.enabled {
            if let Ok(mut last) = self.last_http_label.lock() {
                *last = format!("GET {}", url.path());
            }
            self.refresh_requests();
        }
    }

    pub fn http_ok(&self, url: &Url, bytes: usize) {
        self.http_in_flight.fetch_sub(1, Ordering::Relaxed);
        self.http_done.fetch_add(1, Ordering::Relaxed);
        self.http_bytes.fetch_add(bytes as u64, Ordering::Relaxed);

        if self.enabled {
            if let Ok(mut last) = self.last_http_label.lock() {
                *last = format!("GET {} ok {}B", url.path(), bytes);
            }
            self.refresh_requests();
        }
    }

    pub fn http_err(&self, url: &Url) {
        self.http_in_flight.fetch_sub(1, Ordering::Relaxed);
        self.http_failed.fetch_add(1, Ordering::Relaxed);
        if self.enabled {
            if let Ok(mut last) = self.last_http_label.lock() {
                *last = format!("GET {} failed", url.path());
            }
            self.refresh_requests();
        }
    }

    pub fn requests_done(&self) -> u64 {
        self.http_done.load(Ordering::Relaxed)
    }

    pub fn requests_failed(&self) -> u64 {
        self.http_failed.load(Ordering::Relaxed)
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        self.refresh_requests();
        self.stage.finish_and_clear();
        self.requests.finish_and_clear();
        if let Some(mp) = &self.mp {
            // Best effort: ensure the last render flushes.
            let _ = mp.println(format!("Done in {}", HumanDuration(self.start.elapsed())));
        }
    }

    fn refresh_requests(&self) {
        let in_flight = self.http_in_flight.load(Ordering::Relaxed);
        let done = self.http_done.load(Ordering::Relaxed);
        let failed = self.http_failed.load(Ordering::Relaxed);
        let bytes = self.http_bytes.load(Ordering::Relaxed);

        let last = self
            .last_http_label
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        self.requests.set_message(format!(
            "HTTP: done {done} | failed {failed} | in-flight {in_flight}/{max} | {bytes} | {last}",
            max = self.max_concurrency,
            bytes = HumanBytes(bytes),
        ));
    }
}
