use crate::sync::ChartFrame;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Destination for chart frames.
///
/// `paint` is called from the poller's tick tasks and must return without
/// waiting on the renderer.
pub trait ChartSink: Send + Sync + 'static {
    fn paint(&self, frame: ChartFrame);
}

/// Forwards frames over a bounded channel, dropping frames while the
/// consumer is behind.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<ChartFrame>,
}

impl ChannelSink {
    /// Create a sink and the receiver the renderer drains.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ChartFrame>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }
}

impl ChartSink for ChannelSink {
    fn paint(&self, frame: ChartFrame) {
        match self.tx.try_send(frame) {
            Ok(()) => trace!("chart frame queued"),
            Err(mpsc::error::TrySendError::Full(_)) => debug!("renderer lagging; frame dropped"),
            Err(mpsc::error::TrySendError::Closed(_)) => trace!("renderer gone; frame dropped"),
        }
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ChartSink for NullSink {
    fn paint(&self, _frame: ChartFrame) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;
    use vaas_history::TelemetryHistory;

    fn frame(label: &str) -> ChartFrame {
        let mut history = TelemetryHistory::new(4);
        history.record(label, None, []);
        ChartFrame::build(&history, &Palette::default())
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (sink, mut rx) = ChannelSink::new(1);
        sink.paint(frame("t0"));
        sink.paint(frame("t1"));

        assert_eq!(rx.try_recv().unwrap().labels, vec!["t0"]);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (sink, rx) = ChannelSink::new(1);
        drop(rx);
        sink.paint(frame("t0"));
    }
}
