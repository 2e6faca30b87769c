use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Shortest period accepted; `tokio::time::interval` rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating job with an explicit cancel handle.
///
/// The first run happens as soon as the timer task is scheduled, then one
/// run per `period`. Every run is spawned as its own task and never awaited
/// by the timer, so a slow run can overlap the next one.
///
/// Dropping the handle cancels the timer. Runs already in flight are not
/// affected.
#[derive(Debug)]
pub struct ScheduledTask {
    timer: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn every<F, Fut>(period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let period = period.max(MIN_PERIOD);

        let timer = tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tokio::spawn(job());
            }
        });

        Self { timer }
    }

    /// Stop scheduling further runs. Safe to call more than once.
    pub fn cancel(&self) {
        self.timer.abort();
    }

    /// `true` once the timer will not fire again.
    pub fn is_cancelled(&self) -> bool {
        self.timer.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
