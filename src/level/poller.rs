//! Periodic level polling

use super::client::LevelClient;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, warn};

/// What the gauge shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelState {
    /// Last successfully fetched level; kept through later failures.
    pub level: Option<f64>,
    /// True until the first fetch finishes.
    pub loading: bool,
    /// Message from the most recent failed fetch, cleared on success.
    pub error: Option<String>,
    /// True while at least one manual refresh is pending.
    pub refreshing: bool,
    pub last_update: Option<DateTime<Utc>>,
}

impl Default for LevelState {
    fn default() -> Self {
        Self {
            level: None,
            loading: true,
            error: None,
            refreshing: false,
            last_update: None,
        }
    }
}

/// Fetches the level on a fixed interval and publishes [`LevelState`].
///
/// At most one fetch runs at a time. A periodic tick that finds a fetch in
/// flight is dropped; a manual refresh waits its turn, so readings are applied
/// in the order they were requested.
pub struct LevelPoller {
    client: LevelClient,
    every: Duration,
    state: watch::Sender<LevelState>,
    in_flight: Mutex<()>,
    pending_refreshes: AtomicUsize,
}

impl LevelPoller {
    pub fn new(client: LevelClient, every: Duration) -> Self {
        let (state, _) = watch::channel(LevelState::default());
        Self {
            client,
            every: every.max(Duration::from_millis(1)),
            state,
            in_flight: Mutex::new(()),
            pending_refreshes: AtomicUsize::new(0),
        }
    }

    pub fn interval(&self) -> Duration {
        self.every
    }

    pub fn state(&self) -> LevelState {
        self.state.borrow().clone()
    }

    /// Receiver that wakes on every state change
    pub fn subscribe(&self) -> watch::Receiver<LevelState> {
        self.state.subscribe()
    }

    /// One periodic fetch. Returns false when skipped because another fetch
    /// was still running.
    pub async fn poll_once(&self) -> bool {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("previous level fetch still running, skipping tick");
            return false;
        };
        self.fetch_and_publish().await;
        true
    }

    /// Out-of-band fetch requested by the user.
    ///
    /// `refreshing` stays true until every overlapping refresh has finished
    /// or been cancelled.
    pub async fn refresh(&self) {
        let _pending = PendingRefresh::begin(self);
        let _guard = self.in_flight.lock().await;
        self.fetch_and_publish().await;
    }

    /// Fetch immediately, then every interval, until the handle is stopped or dropped.
    pub fn start(self: Arc<Self>) -> PollerHandle {
        let poller = Arc::clone(&self);
        let task = tokio::spawn(async move {
            let mut ticker = interval(poller.every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            debug!(
                url = poller.client.url(),
                interval_ms = poller.every.as_millis() as u64,
                "starting level poller"
            );

            loop {
                ticker.tick().await;
                poller.poll_once().await;
            }
        });

        PollerHandle { poller: self, task }
    }

    async fn fetch_and_publish(&self) {
        match self.client.fetch_level().await {
            Ok(level) => {
                self.state.send_modify(|state| {
                    state.level = Some(level);
                    state.error = None;
                    state.loading = false;
                    state.last_update = Some(Utc::now());
                });
            }
            Err(e) => {
                if e.is_transient() {
                    warn!(error = %e, "error fetching tank level");
                } else {
                    error!(error = %e, "error fetching tank level");
                }
                self.state.send_modify(|state| {
                    state.error = Some(e.to_string());
                    state.loading = false;
                });
            }
        }
    }
}

// Counts a refresh from the moment it is requested until it is dropped.
// The count only changes inside `send_modify`, so the published flag
// always matches it.
struct PendingRefresh<'a> {
    poller: &'a LevelPoller,
}

impl<'a> PendingRefresh<'a> {
    fn begin(poller: &'a LevelPoller) -> Self {
        poller.state.send_modify(|state| {
            poller.pending_refreshes.fetch_add(1, Ordering::SeqCst);
            state.refreshing = true;
        });
        Self { poller }
    }
}

impl Drop for PendingRefresh<'_> {
    fn drop(&mut self) {
        let poller = self.poller;
        poller.state.send_modify(|state| {
            let left = poller.pending_refreshes.fetch_sub(1, Ordering::SeqCst) - 1;
            state.refreshing = left > 0;
        });
    }
}

/// Running poll loop. Dropping the handle cancels the loop.
pub struct PollerHandle {
    poller: Arc<LevelPoller>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    pub fn poller(&self) -> &Arc<LevelPoller> {
        &self.poller
    }

    pub fn subscribe(&self) -> watch::Receiver<LevelState> {
        self.poller.subscribe()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the interval. A fetch already in flight is abandoned.
    pub fn stop(self) {
        debug!("stopping level poller");
        drop(self);
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
