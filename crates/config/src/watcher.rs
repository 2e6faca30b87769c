use crate::{load, VaasConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Bursts of filesystem events closer together than this collapse into one reload.
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Outcome of re-reading the config file after a change on disk.
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// The file parsed and validated.
    Reloaded(Box<VaasConfig>),
    /// The file changed but is unreadable or invalid; keep the previous config.
    Rejected(String),
}

/// Watches the config file and emits a reloaded [`VaasConfig`] after each change.
///
/// The parent directory is watched rather than the file itself so editors
/// that save via rename-and-replace keep triggering reloads.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// use vaas_config::{ConfigEvent, ConfigWatcher};
/// let (_watcher, mut rx) = ConfigWatcher::spawn("/home/user/.config/vaas/monitor.toml");
/// while let Some(event) = rx.recv().await {
///     if let ConfigEvent::Reloaded(cfg) = event {
///         println!("refresh is now {} ms", cfg.monitor.refresh_ms);
///     }
/// }
/// # }
/// ```
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path`.
    /// Returns the watcher handle and a receiver of reload outcomes.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<ConfigEvent>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<ConfigEvent>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

    let (fs_tx, mut fs_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = fs_rx.recv().await {
        if !touches(&event, &path) {
            continue;
        }

        // Editors tend to emit several writes per save.
        tokio::time::sleep(DEBOUNCE).await;
        while fs_rx.try_recv().is_ok() {}

        let outcome = match load(&path) {
            Ok(cfg) => ConfigEvent::Reloaded(Box::new(cfg)),
            Err(e) => {
                warn!("Config reload rejected: {e}");
                ConfigEvent::Rejected(e.to_string())
            }
        };

        if tx.send(outcome).await.is_err() {
            break; // receiver dropped
        }
    }
}

fn touches(event: &notify::Result<notify::Event>, path: &Path) -> bool {
    use notify::EventKind::{Create, Modify};

    match event {
        Ok(e) => {
            matches!(e.kind, Modify(_) | Create(_))
                && e.paths.iter().any(|p| p.file_name() == path.file_name())
        }
        Err(e) => {
            debug!("Watcher error: {e}");
            false
        }
    }
}
