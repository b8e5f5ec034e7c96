// Dashboard controller - Owns every widget's state and refresh lifecycle
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;

use crate::application::fetcher::Fetcher;
use crate::application::scheduler::{OutcomeSink, RefreshScheduler};
use crate::domain::outcome::FetchOutcome;
use crate::domain::source::Source;
use crate::domain::widget::{WidgetSnapshot, WidgetState};

// Widgets sharing an interval would otherwise tick in lockstep and burst
// requests at the free public APIs behind them.
const MAX_START_JITTER_MS: u64 = 400;

const UPDATE_CHANNEL_CAPACITY: usize = 64;

struct WidgetEntry {
    source: Source,
    state: Arc<RwLock<WidgetState>>,
    scheduler: RefreshScheduler,
}

/// Applies outcomes for one widget and publishes the fresh snapshot to
/// live-update subscribers. The write lock is held only for the apply and
/// snapshot copy, never across an await.
struct StateSink {
    source: Source,
    state: Arc<RwLock<WidgetState>>,
    updates: broadcast::Sender<WidgetSnapshot>,
}

impl OutcomeSink for StateSink {
    fn apply(&self, outcome: FetchOutcome) {
        let snapshot = {
            let Ok(mut state) = self.state.write() else {
                return;
            };
            state.apply(outcome);
            state.snapshot(&self.source)
        };
        tracing::debug!(
            source = %self.source.id,
            phase = ?snapshot.phase,
            generation = snapshot.generation,
            "applied fetch outcome"
        );
        // Nobody listening (or everyone lagged) is fine.
        let _ = self.updates.send(snapshot);
    }
}

/// Aggregates N independently-scheduled widgets behind a uniform query
/// interface. Mounting starts one scheduler per source; unmounting stops
/// them all and removes the entries, so a query after unmount reports
/// "no such widget" rather than a half-torn-down state.
pub struct DashboardController {
    widgets: RwLock<HashMap<String, WidgetEntry>>,
    order: Vec<String>,
    updates: broadcast::Sender<WidgetSnapshot>,
}

impl DashboardController {
    /// Create one widget state (phase `Loading`) and one refresh scheduler
    /// per source, with a small random start stagger.
    pub fn mount(entries: Vec<(Source, Arc<dyn Fetcher>)>) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        let mut rng = rand::rng();
        let mut widgets = HashMap::new();
        let mut order = Vec::with_capacity(entries.len());

        for (source, fetcher) in entries {
            let state = Arc::new(RwLock::new(WidgetState::new()));
            let sink = Arc::new(StateSink {
                source: source.clone(),
                state: state.clone(),
                updates: updates.clone(),
            });
            let jitter = Duration::from_millis(rng.random_range(0..MAX_START_JITTER_MS));
            let scheduler = RefreshScheduler::start(
                source.id.clone(),
                source.interval,
                jitter,
                fetcher,
                sink,
            );
            tracing::info!(
                source = %source.id,
                interval_secs = source.interval.as_secs(),
                "mounted widget"
            );
            order.push(source.id.clone());
            widgets.insert(source.id.clone(), WidgetEntry { source, state, scheduler });
        }

        Self {
            widgets: RwLock::new(widgets),
            order,
            updates,
        }
    }

    /// Consistent snapshot of one widget, or `None` if no such widget is
    /// mounted. Never blocks on an in-flight fetch.
    pub fn query(&self, source_id: &str) -> Option<WidgetSnapshot> {
        let widgets = self.widgets.read().ok()?;
        let entry = widgets.get(source_id)?;
        let state = entry.state.read().ok()?;
        Some(state.snapshot(&entry.source))
    }

    /// Snapshots of every mounted widget, in mount order.
    pub fn snapshots(&self) -> Vec<WidgetSnapshot> {
        self.order
            .iter()
            .filter_map(|id| self.query(id))
            .collect()
    }

    /// Click-to-open target for one widget: the deep link resolved by the
    /// last success, or the source default before the first success.
    pub fn link(&self, source_id: &str) -> Option<String> {
        let widgets = self.widgets.read().ok()?;
        let entry = widgets.get(source_id)?;
        let state = entry.state.read().ok()?;
        Some(state.link(&entry.source))
    }

    /// Subscribe to live snapshot updates (one per applied outcome).
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetSnapshot> {
        self.updates.subscribe()
    }

    /// Stop every scheduler and drop every widget state. Safe to call with
    /// fetches in flight; their outcomes are suppressed. Idempotent.
    pub fn unmount(&self) {
        let entries: Vec<WidgetEntry> = match self.widgets.write() {
            Ok(mut widgets) => widgets.drain().map(|(_, entry)| entry).collect(),
            Err(_) => return,
        };
        for entry in &entries {
            entry.scheduler.stop();
        }
        if !entries.is_empty() {
            tracing::info!(count = entries.len(), "unmounted dashboard");
        }
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.unmount();
    }
}
