use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use crate::aggregate::Aggregator;
use crate::error::AggregationError;
use crate::story::StoryEntry;

#[derive(Debug)]
pub enum ViewState {
    Loading,
    Loaded(Vec<StoryEntry>),
    Failed(AggregationError),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// A full cycle ran and its outcome is now the current state.
    Completed,
    /// Another cycle was already in flight; nothing changed.
    Ignored,
}

/// Holds what the display should show and drives fetch cycles.
///
/// Only one cycle runs at a time. A refresh requested while a cycle is in
/// flight is dropped, so the state always reflects the latest cycle that ran.
pub struct Presenter {
    aggregator: Aggregator,
    state: watch::Sender<ViewState>,
    in_flight: AtomicBool,
}

impl Presenter {
    pub fn new(aggregator: Aggregator) -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            aggregator,
            state,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> watch::Ref<'_, ViewState> {
        self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub async fn refresh(&self) -> Refresh {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::debug!("refresh ignored; a fetch cycle is already in flight");
            return Refresh::Ignored;
        }
        let _guard = InFlight(&self.in_flight);

        self.state.send_replace(ViewState::Loading);
        let next = match self.aggregator.fetch_top_stories().await {
            Ok(entries) => ViewState::Loaded(entries),
            Err(err) => {
                tracing::error!(error = %err, "fetch cycle failed");
                ViewState::Failed(err)
            }
        };
        self.state.send_replace(next);
        Refresh::Completed
    }
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
