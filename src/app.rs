//! Wires the poller, renderer and operator input together.
//!
//! Background tasks:
//! - Telemetry poller (GPU + per-camera GPU memory)
//! - System status refresh (uptime, containers)
//! - Config file watcher (live refresh-rate changes)
//! - stdin command reader

use crate::command::Command;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vaas_chart::{ChannelSink, ChartFrame};
use vaas_client::{ApiClient, TelemetrySource};
use vaas_config::{load as load_config, ConfigEvent, ConfigWatcher, VaasConfig};
use vaas_core::{next_camera_name, HardwareReport, Message, SystemStatus};
use vaas_poller::{Dashboard, PollerState, ScheduledTask, TelemetryPoller};
use vaas_widgets::{
    ChartWidget, ContainersWidget, GpuCardsWidget, GpuProcessesWidget, Notifier,
    SystemStatsWidget, ToastKind,
};

/// Run until `q` or Ctrl-C.
pub async fn run(config_path: PathBuf) -> Result<()> {
    let mut config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let client = ApiClient::new(&config.api)?;
    info!(api = client.base_url(), "using admin API");

    let (sink, mut frames) = ChannelSink::new(4);
    let (event_tx, mut events) = mpsc::channel(32);
    let mut poller = TelemetryPoller::new(client.clone(), Dashboard::from_config(&config), sink)
        .with_events(event_tx);

    let (status_tx, mut statuses) = mpsc::channel(1);
    let mut status_task = spawn_status_refresh(
        client.clone(),
        config.monitor.system_status_interval(),
        status_tx.clone(),
    );

    let (_watcher, mut reloads) = ConfigWatcher::spawn(&config_path);

    let mut view = View::new(Notifier::new(config.ui.toast_duration()));
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    println!("{}", Command::USAGE);
    if config.monitor.autostart {
        poller.start(config.monitor.refresh_interval());
    } else {
        poller.set_interval(config.monitor.refresh_interval());
        view.toast("Monitoring paused; press p to start", ToastKind::Info);
    }
    view.redraw(&poller);

    loop {
        tokio::select! {
            Some(frame) = frames.recv() => view.set_frame(frame),

            Some(msg) = events.recv() => view.on_message(msg),

            Some(status) = statuses.recv() => view.set_status(status),

            Some(event) = reloads.recv() => {
                match event {
                    ConfigEvent::Reloaded(next) => {
                        if next.monitor.system_status_ms != config.monitor.system_status_ms {
                            status_task = spawn_status_refresh(
                                client.clone(),
                                next.monitor.system_status_interval(),
                                status_tx.clone(),
                            );
                        }
                        let pending = apply_reload(&mut poller, &config, &next);
                        if !pending.is_empty() {
                            warn!(?pending, "these settings apply after a restart");
                        }
                        config = *next;
                        view.on_message(Message::ConfigReloaded);
                    }
                    ConfigEvent::Rejected(reason) => {
                        view.toast(format!("Config not reloaded: {reason}"), ToastKind::Error);
                    }
                }
            }

            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => execute(cmd, &mut poller, &config, &mut view),
                    Err(e) => view.toast(e, ToastKind::Error),
                },
                Ok(None) => {
                    debug!("stdin closed; commands disabled");
                    stdin_open = false;
                }
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    stdin_open = false;
                }
            },

            _ = &mut shutdown => {
                info!("Ctrl-C received");
                break;
            }
        }

        view.redraw(&poller);
    }

    status_task.cancel();
    poller.shutdown();
    info!("vaas-monitor stopped");
    Ok(())
}

/// Refresh `/admin/system/status` on its own timer; failures are only logged.
fn spawn_status_refresh(
    client: ApiClient,
    period: Duration,
    tx: mpsc::Sender<SystemStatus>,
) -> ScheduledTask {
    ScheduledTask::every(period, move || {
        let client = client.clone();
        let tx = tx.clone();
        async move {
            match client.system_status().await {
                Ok(status) => {
                    let _ = tx.try_send(status);
                }
                Err(e) => warn!("system status refresh failed: {e}"),
            }
        }
    })
}

/// Apply the parts of a reloaded config that can change at runtime.
///
/// Returns the changed settings that only take effect after a restart.
fn apply_reload<S: TelemetrySource>(
    poller: &mut TelemetryPoller<S>,
    current: &VaasConfig,
    next: &VaasConfig,
) -> Vec<&'static str> {
    if next.monitor.refresh_ms != current.monitor.refresh_ms {
        poller.set_interval(next.monitor.refresh_interval());
    }

    let mut pending = Vec::new();
    if next.api != current.api {
        pending.push("api");
    }
    if next.monitor.history_len != current.monitor.history_len {
        pending.push("monitor.history_len");
    }
    if next.monitor.overlap != current.monitor.overlap {
        pending.push("monitor.overlap");
    }
    if next.ui.palette != current.ui.palette {
        pending.push("ui.palette");
    }
    pending
}

fn execute<S: TelemetrySource>(
    cmd: Command,
    poller: &mut TelemetryPoller<S>,
    config: &VaasConfig,
    view: &mut View,
) {
    match cmd {
        Command::Toggle => {
            let msg = match poller.toggle() {
                PollerState::Active => "Monitoring resumed",
                PollerState::Stopped => "Monitoring paused",
            };
            view.toast(msg, ToastKind::Info);
        }
        Command::Refresh(ms) if config.monitor.is_preset(ms) => {
            poller.set_interval(Duration::from_millis(ms));
            if !poller.is_active() {
                view.toast(
                    format!("Refresh set to {:.1}s; monitoring is paused", ms as f64 / 1000.0),
                    ToastKind::Info,
                );
            }
        }
        Command::Refresh(ms) => {
            view.toast(
                format!(
                    "{ms} ms is not a preset (choose one of {:?})",
                    config.monitor.refresh_presets
                ),
                ToastKind::Error,
            );
        }
        Command::NextCamera(existing) => {
            println!("next camera name: {}", next_camera_name(&existing));
        }
        Command::Help => println!("{}", Command::USAGE),
        Command::Quit => {}
    }
}

/// Terminal front-end state. Anything that changes what is on screen marks
/// the view dirty; [`View::redraw`] repaints once per loop turn.
struct View {
    notifier:   Notifier,
    status:     Option<SystemStatus>,
    frame:      Option<ChartFrame>,
    dirty:      bool,
    chart:      ChartWidget,
    gpus:       GpuCardsWidget,
    processes:  GpuProcessesWidget,
    system:     SystemStatsWidget,
    containers: ContainersWidget,
}

impl View {
    fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            status:     None,
            frame:      None,
            dirty:      false,
            chart:      ChartWidget::new(std::io::stdout().is_terminal()),
            gpus:       GpuCardsWidget::new(),
            processes:  GpuProcessesWidget::new(),
            system:     SystemStatsWidget::new(),
            containers: ContainersWidget::new(),
        }
    }

    fn toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.notifier.show(message, kind);
        self.dirty = true;
    }

    fn set_frame(&mut self, frame: ChartFrame) {
        self.frame = Some(frame);
        self.dirty = true;
    }

    fn set_status(&mut self, status: SystemStatus) {
        self.status = Some(status);
        self.dirty = true;
    }

    fn set_loading(&mut self, loading: bool) {
        if self.notifier.is_loading() != loading {
            self.notifier.set_loading(loading);
            self.dirty = true;
        }
    }

    fn redraw<S: TelemetrySource>(&mut self, poller: &TelemetryPoller<S>) {
        if !std::mem::take(&mut self.dirty) {
            return;
        }
        let lines = poller.with_dashboard(|dash| self.render(dash.hardware()));
        println!("{}\n{}", "─".repeat(60), lines.join("\n"));
    }

    /// Every panel that has data, then the loading marker and the toast.
    fn render(&mut self, hardware: Option<&HardwareReport>) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(hw) = hardware {
            lines.extend(self.system.view(&hw.system));
            lines.extend(self.gpus.view(hw));
            lines.extend(self.processes.view(&hw.gpu_processes));
        }
        if let Some(frame) = &self.frame {
            lines.extend(self.chart.view(frame));
        }
        if let Some(status) = &self.status {
            lines.extend(self.containers.view(status));
        }

        if self.notifier.is_loading() {
            lines.push("loading…".to_string());
        }
        if let Some(toast) = self.notifier.current() {
            lines.push(format!("» {}", toast.message));
        }
        lines
    }

    /// Poll failures stay in the log; only operator-visible changes raise a toast.
    fn on_message(&mut self, msg: Message) {
        match msg {
            Message::PollerStarted { interval } => {
                debug!(?interval, "poller started");
                self.set_loading(true);
            }
            Message::IntervalChanged { interval, restarted: true } => {
                self.toast(
                    format!("Refreshing every {:.1}s", interval.as_secs_f64()),
                    ToastKind::Success,
                );
            }
            Message::IntervalChanged { interval, restarted: false } => {
                debug!(?interval, "interval recorded while paused");
            }
            Message::ConfigReloaded => self.toast("Config reloaded", ToastKind::Success),
            Message::TickFailed { seq, reason } => {
                debug!(seq, "tick failed: {reason}");
                self.set_loading(false);
            }
            Message::TickDiscarded { seq, newest } => debug!(seq, newest, "tick discarded"),
            Message::TickApplied { .. } | Message::PollerStopped | Message::Shutdown => {
                self.set_loading(false);
            }
        }
    }
}
