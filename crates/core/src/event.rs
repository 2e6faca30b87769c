use std::time::Duration;

/// Lifecycle and tick messages published by the telemetry poller.
///
/// Sources:
/// - `TelemetryPoller::start` / `stop` / `set_interval` → `Poller*`, `IntervalChanged`
/// - Per-tick tasks                                     → `Tick*`
/// - Config watcher task                                → `ConfigReloaded`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ── Poller lifecycle ──────────────────────────────────────────────────────
    /// Stopped → Active (or restart while Active).
    PollerStarted { interval: Duration },
    /// Active → Stopped.
    PollerStopped,
    /// Poll period changed; `restarted` is `true` when the poller was Active.
    IntervalChanged { interval: Duration, restarted: bool },

    // ── Ticks ─────────────────────────────────────────────────────────────────
    /// Both fetches resolved and the sample was written to history.
    TickApplied { seq: u64, cameras: usize },
    /// One of the fetches failed; history is left stale.
    TickFailed { seq: u64, reason: String },
    /// The tick resolved after a newer one and was dropped (drop-stale policy).
    TickDiscarded { seq: u64, newest: u64 },

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk and was reloaded.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
