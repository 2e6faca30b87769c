use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays up unless configured otherwise.
pub const DEFAULT_TOAST: Duration = Duration::from_millis(3_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind:    ToastKind,
    expires_at:  Instant,
}

impl Toast {
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Single-slot toast plus a loading flag.
///
/// A new toast replaces the current one; each toast disappears on its own
/// after the configured duration.
#[derive(Debug)]
pub struct Notifier {
    current:  Option<Toast>,
    duration: Duration,
    loading:  bool,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST)
    }
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
            loading: false,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> &Toast {
        let message = message.into();
        match kind {
            ToastKind::Error => tracing::warn!("{message}"),
            _ => tracing::info!("{message}"),
        }

        self.current.insert(Toast {
            message,
            kind,
            expires_at: Instant::now() + self.duration,
        })
    }

    /// Visible toast, if any. Expired toasts are dropped here.
    pub fn current(&mut self) -> Option<&Toast> {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_duration() {
        let mut notifier = Notifier::default();
        notifier.show("Monitoring paused", ToastKind::Info);

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert_eq!(notifier.current().map(|t| t.message.as_str()), Some("Monitoring paused"));

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_toast_replaces_and_restarts_timer() {
        let mut notifier = Notifier::new(Duration::from_secs(1));
        notifier.show("first", ToastKind::Success);
        tokio::time::sleep(Duration::from_millis(800)).await;
        notifier.show("second", ToastKind::Error);
        tokio::time::sleep(Duration::from_millis(800)).await;

        let toast = notifier.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);
    }

    #[test]
    fn loading_flag() {
        let mut notifier = Notifier::default();
        assert!(!notifier.is_loading());
        notifier.set_loading(true);
        assert!(notifier.is_loading());
    }
}
