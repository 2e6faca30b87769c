use crate::dashboard::{Applied, Dashboard};
use crate::schedule::ScheduledTask;
use chrono::Local;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use vaas_chart::ChartSink;
use vaas_client::TelemetrySource;
use vaas_core::Message;

/// Poll period used until `start` or `set_interval` says otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Stopped,
    Active,
}

/// State shared between the poller handle and its tick tasks.
struct Shared<S> {
    source:    S,
    dashboard: Mutex<Dashboard>,
    sink:      Box<dyn ChartSink>,
    next_seq:  AtomicU64,
}

impl<S> Shared<S> {
    fn dashboard(&self) -> MutexGuard<'_, Dashboard> {
        // Poisoned locks are recovered; `apply` has no partial-update path.
        self.dashboard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Periodically fetches hardware and per-camera telemetry into a [`Dashboard`].
///
/// Stopped → Active on [`start`](Self::start), Active → Stopped on
/// [`stop`](Self::stop). [`set_interval`](Self::set_interval) while Active
/// restarts with the new period and stays Active.
pub struct TelemetryPoller<S: TelemetrySource> {
    shared:   Arc<Shared<S>>,
    interval: Duration,
    timer:    Option<ScheduledTask>,
    events:   Option<mpsc::Sender<Message>>,
}

impl<S: TelemetrySource> TelemetryPoller<S> {
    pub fn new(source: S, dashboard: Dashboard, sink: impl ChartSink) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                dashboard: Mutex::new(dashboard),
                sink: Box::new(sink),
                next_seq: AtomicU64::new(0),
            }),
            interval: DEFAULT_INTERVAL,
            timer:    None,
            events:   None,
        }
    }

    /// Publish lifecycle and tick [`Message`]s on `tx`. Messages are dropped
    /// while the channel is full.
    #[must_use]
    pub fn with_events(mut self, tx: mpsc::Sender<Message>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Fetch immediately, then every `interval` until [`stop`](Self::stop).
    ///
    /// Calling `start` while Active replaces the running timer.
    pub fn start(&mut self, interval: Duration) {
        // Old timer first, so two are never pending at once.
        self.timer = None;
        self.interval = interval;

        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        self.timer = Some(ScheduledTask::every(interval, move || {
            run_tick(Arc::clone(&shared), events.clone())
        }));

        info!(interval_ms = interval.as_millis() as u64, "telemetry polling started");
        publish(&self.events, Message::PollerStarted { interval });
    }

    /// Cancel the pending repeat. In-flight ticks still apply when they resolve.
    /// Calling `stop` while Stopped does nothing.
    pub fn stop(&mut self) {
        let Some(timer) = self.timer.take() else {
            return;
        };
        timer.cancel();

        info!("telemetry polling stopped");
        publish(&self.events, Message::PollerStopped);
    }

    /// Change the poll period; restarts the timer when Active.
    pub fn set_interval(&mut self, interval: Duration) {
        let restarted = self.is_active();
        if restarted {
            self.start(interval);
        } else {
            self.interval = interval;
        }
        publish(&self.events, Message::IntervalChanged { interval, restarted });
    }

    /// Flip between Active and Stopped; returns the new state.
    pub fn toggle(&mut self) -> PollerState {
        match self.state() {
            PollerState::Active => self.stop(),
            PollerState::Stopped => self.start(self.interval),
        }
        self.state()
    }

    pub fn state(&self) -> PollerState {
        if self.timer.is_some() {
            PollerState::Active
        } else {
            PollerState::Stopped
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == PollerState::Active
    }

    /// `true` while a repeat is scheduled. At most one ever is.
    pub fn has_pending_repeat(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read the dashboard without holding the lock beyond `f`.
    pub fn with_dashboard<R>(&self, f: impl FnOnce(&Dashboard) -> R) -> R {
        let dashboard = self.shared.dashboard();
        f(&dashboard)
    }

    /// Unload hook: stop polling and drop all history.
    pub fn shutdown(&mut self) {
        self.stop();
        self.shared.dashboard().clear();
        publish(&self.events, Message::Shutdown);
    }
}

/// One tick: fetch both resources, then apply them together.
async fn run_tick<S: TelemetrySource>(shared: Arc<Shared<S>>, events: Option<mpsc::Sender<Message>>) {
    let seq = shared.next_seq.fetch_add(1, Ordering::Relaxed);

    let fetched = futures::try_join!(shared.source.hardware(), shared.source.gpu_per_camera());
    let (hardware, cameras) = match fetched {
        Ok(pair) => pair,
        Err(e) => {
            if e.is_transient() {
                warn!(seq, "telemetry tick failed: {e}");
            } else {
                error!(seq, "telemetry tick failed: {e}");
            }
            publish(&events, Message::TickFailed { seq, reason: e.to_string() });
            return;
        }
    };

    let label = Local::now().format("%H:%M:%S").to_string();
    let camera_count = cameras.cameras.len();
    let applied = shared.dashboard().apply(seq, label, hardware, cameras);

    match applied {
        Applied::Frame(frame) => {
            shared.sink.paint(*frame);
            debug!(seq, cameras = camera_count, "tick applied");
            publish(&events, Message::TickApplied { seq, cameras: camera_count });
        }
        Applied::Discarded { newest } => {
            publish(&events, Message::TickDiscarded { seq, newest });
        }
    }
}

fn publish(events: &Option<mpsc::Sender<Message>>, msg: Message) {
    if let Some(tx) = events {
        let _ = tx.try_send(msg);
    }
}
