// Refresh scheduler - One periodic fetch loop per widget
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::application::fetcher::Fetcher;
use crate::domain::outcome::{FetchError, FetchOutcome};

/// Receives every accepted fetch outcome for one widget. Implementations
/// must be cheap and non-blocking; they run on the scheduler task.
pub trait OutcomeSink: Send + Sync {
    fn apply(&self, outcome: FetchOutcome);
}

/// Owns the periodic fetch loop for one widget.
///
/// Fires once on start (after an optional jitter delay), then once per
/// interval. At most one fetch is in flight at a time; ticks that elapse
/// while a fetch is outstanding are skipped, not queued. `stop` is
/// idempotent and guarantees no outcome is delivered after it returns,
/// even for a fetch already in flight.
pub struct RefreshScheduler {
    cancel: CancellationToken,
    // Closed by `stop`; delivery happens under this lock so `stop` can act
    // as a barrier against an outcome racing the shutdown.
    gate: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn start(
        source_id: impl Into<String>,
        interval: Duration,
        initial_delay: Duration,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn OutcomeSink>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let gate = Arc::new(Mutex::new(true));
        let task = tokio::spawn(run_loop(
            source_id.into(),
            interval,
            initial_delay,
            fetcher,
            sink,
            cancel.clone(),
            gate.clone(),
        ));
        Self { cancel, gate, task }
    }

    /// Stop the loop and suppress any in-flight outcome. Safe to call more
    /// than once; after the first call returns, `apply` is never invoked
    /// again for this scheduler.
    pub fn stop(&self) {
        self.cancel.cancel();
        // Waits for an in-progress delivery to finish, then closes the gate.
        if let Ok(mut open) = self.gate.lock() {
            *open = false;
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

async fn run_loop(
    source_id: String,
    interval: Duration,
    initial_delay: Duration,
    fetcher: Arc<dyn Fetcher>,
    sink: Arc<dyn OutcomeSink>,
    cancel: CancellationToken,
    gate: Arc<Mutex<bool>>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + initial_delay, interval);
    // A tick that elapses mid-fetch is skipped rather than queued.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(source = %source_id, "refresh loop stopped");
                return;
            }
            _ = ticker.tick() => {}
        }

        let outcome = match fetcher.fetch(&cancel).await {
            Ok(payload) => FetchOutcome::success(payload),
            Err(FetchError::Canceled) => continue,
            Err(error) => {
                tracing::warn!(source = %source_id, %error, "fetch failed");
                FetchOutcome::failure(error)
            }
        };

        match gate.lock() {
            Ok(open) if *open => sink.apply(outcome),
            _ => return,
        }
    }
}
